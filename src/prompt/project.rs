//! Project-level analysis template.

use crate::types::{Project, Task};

use super::{NOT_SPECIFIED, or_marker};

/// Compose the free-text project-analysis prompt.
///
/// Summarizes task progress (completed / in progress / pending counts and
/// a completion percentage) so the model reasons over current state rather
/// than inventing one.
pub fn project_analysis(project: &Project, tasks: &[Task]) -> String {
    let tasks_section = tasks
        .iter()
        .map(|t| {
            format!(
                "- {}: {} (Estado: {})",
                or_marker(&t.title, NOT_SPECIFIED),
                or_marker(&t.description, "No disponible"),
                or_marker(&t.status, NOT_SPECIFIED),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let completed = count_status(tasks, "completed");
    let in_progress = count_status(tasks, "in_progress");
    let total = tasks.len();
    let pending = total - completed - in_progress;
    let completion_pct = if total > 0 {
        (completed * 100 + total / 2) / total
    } else {
        0
    };

    let name = or_marker(&project.name, NOT_SPECIFIED);
    let description = or_marker(&project.description, "No hay descripción disponible");

    format!(
        r#"# Análisis de Proyecto
Analiza el siguiente proyecto y su estado actual.

## Información del Proyecto
Título: {name}
Descripción: {description}

## Estado Actual
- Tareas completadas: {completed} ({completion_pct}%)
- Tareas en progreso: {in_progress}
- Tareas pendientes: {pending}
- Total de tareas: {total}

## Tareas
{tasks_section}

## Instrucciones
Analiza la información proporcionada y genera un informe ejecutivo del proyecto que incluya:
1. Resumen del estado actual
2. Análisis de progreso
3. Posibles riesgos o cuellos de botella
4. Recomendaciones

## Formato de Respuesta
Proporciona un informe estructurado en formato Markdown.
"#
    )
}

fn count_status(tasks: &[Task], status: &str) -> usize {
    tasks
        .iter()
        .filter(|t| t.status.as_deref() == Some(status))
        .count()
}
