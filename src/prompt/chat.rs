//! Free-form chat continuation template.

use crate::types::{ChatTurn, Speaker};

/// Compose the chat-continuation prompt.
///
/// Prior turns are linearized oldest-first regardless of the order (or
/// fetch limit) the caller retrieved them with, and each is labelled by
/// role so the model can tell who said what.
pub fn chat_continuation(message: &str, history: &[ChatTurn]) -> String {
    let history_section = if history.is_empty() {
        String::new()
    } else {
        let mut turns: Vec<&ChatTurn> = history.iter().collect();
        turns.sort_by_key(|turn| turn.created_at);

        let lines = turns
            .iter()
            .map(|turn| {
                let label = match turn.speaker {
                    Speaker::User => "Usuario",
                    Speaker::Assistant => "Asistente",
                };
                format!("{label}: {}", turn.text)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("\n## Historial de Conversación\n{lines}\n")
    };

    format!(
        r#"# Asistente IA para Gestión de Proyectos

Eres un asistente especializado en gestión de proyectos de software, desarrollo y metodologías ágiles.
{history_section}
## Mensaje Actual del Usuario
{message}

## Instrucciones
Responde al mensaje del usuario de manera directa, profesional y útil.
Proporciona información precisa y ejemplos prácticos cuando sea posible.
Si hay código, formátalo correctamente utilizando bloques de código markdown.
Si no sabes la respuesta, indícalo honestamente sin inventar información.
"#
    )
}
