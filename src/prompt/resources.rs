//! Resource-assignment templates.
//!
//! Candidate resources are partitioned into human and material sections —
//! the model must pick the developer from the human section. Callers are
//! responsible for rejecting requests with no available human resource
//! before composing (see [`Gateway`](crate::gateway::Gateway)); these
//! functions render whatever they are given.

use crate::types::{Project, Resource, Task};

use super::{NOT_SPECIFIED, or_marker};

/// Compose the structured single-task resource-assignment prompt.
pub fn resource_assignment(task: &Task, resources: &[Resource]) -> String {
    let humans: Vec<&Resource> = resources
        .iter()
        .filter(|r| r.is_human && r.is_available)
        .collect();
    let materials: Vec<&Resource> = resources
        .iter()
        .filter(|r| !r.is_human && r.is_available)
        .collect();

    let human_section = if humans.is_empty() {
        "No hay recursos humanos disponibles.".to_string()
    } else {
        humans
            .iter()
            .map(|r| {
                format!(
                    "- {}: {} (Experiencia: {}, Disponibilidad: {}) - Tecnologías: {}",
                    r.name,
                    or_marker(&r.role, "No role"),
                    or_marker(&r.experience, "No especificada"),
                    or_marker(&r.availability, "No especificada"),
                    r.technologies.join(", "),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let material_section = if materials.is_empty() {
        "No hay recursos materiales disponibles.".to_string()
    } else {
        materials
            .iter()
            .map(|r| {
                format!(
                    "- {}: {} (Disponibilidad: {})",
                    r.name,
                    or_marker(&r.resource_type, "Material"),
                    or_marker(&r.availability, "No especificada"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let title = or_marker(&task.title, NOT_SPECIFIED);
    let description = or_marker(&task.description, "No hay descripción disponible");
    let project = or_marker(&task.project_name, NOT_SPECIFIED);
    let status = or_marker(&task.status, NOT_SPECIFIED);
    let priority = or_marker(&task.priority, "No especificada");

    let mut optional_lines = String::new();
    if let Some(task_type) = &task.task_type {
        optional_lines.push_str(&format!("Tipo: {task_type}\n"));
    }
    if let Some(difficulty) = task.difficulty {
        optional_lines.push_str(&format!("Dificultad: {difficulty}/5\n"));
    }
    if !task.tags.is_empty() {
        optional_lines.push_str(&format!("Etiquetas: {}\n", task.tags.join(", ")));
    }

    format!(
        r#"# Asignación de Recursos
Determina el recurso más adecuado para la siguiente tarea.

## Información de la Tarea
Título: {title}
Descripción: {description}
Proyecto: {project}
Estado: {status}
Prioridad: {priority}
{optional_lines}
## Recursos Humanos Disponibles
{human_section}

## Recursos Materiales Disponibles
{material_section}

## Instrucciones
Analiza la tarea y los recursos disponibles para determinar:
1. El recurso humano más adecuado para esta tarea basándote en sus habilidades técnicas, experiencia y disponibilidad.
2. El recurso humano DEBE ser asignado de la lista de recursos humanos disponibles.
3. La asignación debe maximizar la eficiencia y calidad del trabajo.

## Formato de Respuesta
Proporciona la respuesta en formato JSON con los siguientes campos:
1. "tarea": Título de la tarea
2. "recurso_asignado": Objeto con la siguiente estructura:
   - "desarrollador": Nombre del recurso humano asignado (OBLIGATORIO)
   - "nivel": Nivel del desarrollador ("Junior", "Mid", "Senior")
   - "tecnología": Tecnología principal requerida para la tarea
   - "herramientas": Array de herramientas necesarias para la tarea

Ejemplo de respuesta esperada:
{{
  "tarea": "{title}",
  "recurso_asignado": {{
    "desarrollador": "Nombre del desarrollador",
    "nivel": "Senior",
    "tecnología": "Rust",
    "herramientas": ["cargo", "git"]
  }}
}}
"#
    )
}

/// Compose the structured whole-project resource-assignment prompt.
pub fn project_resource_assignment(
    project: &Project,
    tasks: &[Task],
    resources: &[Resource],
) -> String {
    let tasks_section = tasks
        .iter()
        .map(|t| {
            format!(
                "- ID: {}, Título: {}, Descripción: {}, Prioridad: {}",
                t.id,
                or_marker(&t.title, NOT_SPECIFIED),
                or_marker(&t.description, "No disponible"),
                or_marker(&t.priority, "No especificada"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let resources_section = resources
        .iter()
        .map(|r| {
            format!(
                "- {}: {} ({}) - Disponibilidad: {} - Tecnologías: {}",
                r.name,
                or_marker(&r.role, "No role"),
                or_marker(&r.experience, "No experience"),
                or_marker(&r.availability, "No disponible"),
                r.technologies.join(", "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let name = or_marker(&project.name, NOT_SPECIFIED);
    let description = or_marker(&project.description, "No hay descripción disponible");

    format!(
        r#"# Asignación de Recursos para Proyecto
Determina la asignación óptima de recursos para el siguiente proyecto.

## Información del Proyecto
Título: {name}
Descripción: {description}

## Tareas del Proyecto
{tasks_section}

## Recursos Disponibles
{resources_section}

## Instrucciones
Analiza las tareas del proyecto y los recursos disponibles para determinar la asignación óptima de recursos.
Considera habilidades técnicas, experiencia, disponibilidad y otros factores relevantes.
Cada tarea debe asignarse a un solo recurso, pero un recurso puede tener varias tareas.

## Formato de Respuesta
Proporciona la respuesta en formato JSON con los siguientes campos:
1. "proyecto": Nombre del proyecto
2. "equipo_sugerido": Array con los nombres de los desarrolladores asignados
3. "tareas_asignadas": Objeto donde las claves son los nombres de los desarrolladores y los valores son las tareas asignadas

Ejemplo de respuesta esperada:
{{
  "proyecto": "{name}",
  "equipo_sugerido": ["Ana", "Luis"],
  "tareas_asignadas": {{
    "Ana": ["Diseñar la API"],
    "Luis": ["Configurar la base de datos"]
  }}
}}
"#
    )
}
