//! Task-centric templates: analysis, documentation, time estimation, and
//! code suggestion.

use crate::types::{Resource, Task};

use super::{NOT_SPECIFIED, or_marker};

/// Compose the structured task-analysis prompt.
///
/// Asks for the exact JSON contract the `task_analysis` defaulting rules
/// expect (`tarea`, `tipo`, `palabras_clave`, `complejidad`,
/// `tiempo_estimado`).
pub fn task_analysis(task: &Task) -> String {
    let title = or_marker(&task.title, "No title provided");
    let description = or_marker(&task.description, "No description available");
    let project = or_marker(&task.project_name, "No project specified");
    let status = or_marker(&task.status, "No status specified");
    let priority = or_marker(&task.priority, "No priority specified");
    let task_type = or_marker(&task.task_type, "Unspecified");
    let phase = or_marker(&task.phase, "No phase specified");
    let tags = task.tags.join(", ");
    let difficulty = task
        .difficulty
        .map(|d| format!("{d}/5"))
        .unwrap_or_else(|| "Unspecified".to_string());
    let example_estimate = task
        .estimated_duration
        .map(|d| format!("{d} días"))
        .unwrap_or_else(|| "5 días".to_string());

    format!(
        r#"# Tarea de Proyecto
Analiza la siguiente tarea y determina sus parámetros.

## Información de la Tarea
Título: {title}
Descripción: {description}
Proyecto: {project}
Estado: {status}
Prioridad: {priority}
Tipo: {task_type}
Fase: {phase}
Etiquetas: {tags}
Dificultad: {difficulty}

## Instrucciones
Analiza la información proporcionada y genera un análisis en formato JSON con los siguientes campos:
1. "tarea": El título exacto de la tarea tal como se proporciona arriba (usar el valor "{title}")
2. "tipo": El tipo o categoría de la tarea basado en la información proporcionada
3. "palabras_clave": Un array de palabras clave relevantes para la tarea. Incluir las etiquetas proporcionadas y añadir otras relevantes.
4. "complejidad": La complejidad estimada de la tarea (string: "Baja", "Media", "Alta"), basada en la dificultad y descripción proporcionadas
5. "tiempo_estimado": Una estimación del tiempo necesario para completar la tarea (string con formato "X días" o "X semanas")

IMPORTANTE:
- El campo "tarea" debe contener el título exacto de la tarea: "{title}"
- Usa la información proporcionada (tipo, etiquetas, dificultad) para dar una respuesta más precisa.

## Formato de Respuesta
Proporciona únicamente un objeto JSON válido sin explicaciones adicionales ni texto de markdown.

Ejemplo de respuesta esperada:
{{
  "tarea": "{title}",
  "tipo": "{task_type}",
  "palabras_clave": ["autenticación", "seguridad", "API", "JWT"],
  "complejidad": "Media",
  "tiempo_estimado": "{example_estimate}"
}}
"#
    )
}

/// Compose the free-text documentation-generation prompt.
pub fn task_documentation(task: &Task) -> String {
    let title = or_marker(&task.title, NOT_SPECIFIED);
    let description = or_marker(&task.description, "No hay descripción disponible");
    let project = or_marker(&task.project_name, NOT_SPECIFIED);
    let status = or_marker(&task.status, NOT_SPECIFIED);

    format!(
        r#"# Generación de Documentación para Tarea
Genera documentación técnica para la siguiente tarea.

## Información de la Tarea
Título: {title}
Descripción: {description}
Proyecto: {project}
Estado: {status}

## Instrucciones
Basándote en la información proporcionada, genera documentación técnica que incluya:
1. Resumen general de la tarea
2. Requisitos técnicos
3. Pasos de implementación sugeridos
4. Consideraciones importantes
5. Criterios de aceptación

## Formato de Respuesta
Proporciona la documentación en formato Markdown, con secciones claramente definidas y ejemplos cuando sea útil.
"#
    )
}

/// Compose the structured time-estimation prompt, optionally tailored to a
/// specific developer.
pub fn time_estimation(task: &Task, developer: Option<&Resource>) -> String {
    let title = or_marker(&task.title, NOT_SPECIFIED);
    let description = or_marker(&task.description, "No hay descripción disponible");
    let project = or_marker(&task.project_name, NOT_SPECIFIED);
    let status = or_marker(&task.status, NOT_SPECIFIED);

    let developer_section = developer
        .map(|dev| {
            format!(
                "\n## Información del Desarrollador\nNombre: {}\nExperiencia: {}\nRol: {}\nTecnologías: {}\n",
                dev.name,
                or_marker(&dev.experience, NOT_SPECIFIED),
                or_marker(&dev.role, NOT_SPECIFIED),
                dev.technologies.join(", "),
            )
        })
        .unwrap_or_default();

    format!(
        r#"# Estimación de Tiempo para Tarea
Realiza una estimación del tiempo necesario para completar la siguiente tarea.

## Información de la Tarea
Título: {title}
Descripción: {description}
Proyecto: {project}
Estado: {status}
{developer_section}
## Instrucciones
Basándote en la información proporcionada, estima el tiempo que tomaría completar esta tarea.
Considera los siguientes factores:
- Complejidad de la tarea
- Tecnologías involucradas
- Experiencia necesaria
- Posibles obstáculos o dependencias

## Formato de Respuesta
Proporciona la respuesta en formato JSON con los siguientes campos:
1. "estimacion_optimista": Tiempo esperado en condiciones ideales (string, e.g. "2 días")
2. "estimacion_probable": Tiempo esperado en condiciones normales (string, e.g. "4 días")
3. "estimacion_pesimista": Tiempo esperado considerando posibles dificultades (string, e.g. "7 días")
4. "estimacion_recomendada": Tu estimación final recomendada (string, e.g. "5 días")
5. "factores_considerados": Array de factores que influyen en la estimación
6. "confianza": Nivel de confianza en la estimación (número del 1-10)

JSON:
"#
    )
}

/// Compose the free-text code-suggestion prompt, optionally with task
/// context.
pub fn code_suggestion(request: &str, task: Option<&Task>) -> String {
    let context_section = task
        .map(|t| {
            format!(
                "\n## Contexto de la Tarea\nTítulo: {}\nDescripción: {}\n",
                or_marker(&t.title, NOT_SPECIFIED),
                or_marker(&t.description, "No hay descripción disponible"),
            )
        })
        .unwrap_or_default();

    format!(
        r#"# Sugerencia de Código
{context_section}
## Solicitud
{request}

## Instrucciones
Proporciona código que resuelva la solicitud anterior. Asegúrate de que sea:
1. Funcional y optimizado
2. Bien comentado y explicado
3. Siguiendo las mejores prácticas

## Formato de Respuesta
Proporciona el código con una breve explicación de lo que hace. Usa bloques de código markdown.
"#
    )
}
