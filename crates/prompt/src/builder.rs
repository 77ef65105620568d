//! Prompt builder for rendering templates with the question and FAQ context.

use crate::types::{BuiltPrompt, PromptDefinition};
use helpdesk_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Render a prompt definition for one question.
///
/// `faq_context` is the newline-joined `Q:`/`A:` block list chosen by the
/// router; it is inserted verbatim (no HTML escaping).
///
/// # Example
/// ```
/// use helpdesk_prompt::{build_prompt, PromptDefinition};
///
/// let built = build_prompt(
///     &PromptDefinition::builtin(),
///     "Where is the printer?",
///     "Q: How to contact IT support?\nA: Call ext. 1234.",
/// )
/// .unwrap();
/// assert!(built.user.ends_with("User question: Where is the printer?"));
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    question: &str,
    faq_context: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let mut variables = HashMap::new();
    variables.insert("question", question);
    variables.insert("faqContext", faq_context);

    let system = definition
        .system
        .as_deref()
        .map(|template| render_template(template, &variables))
        .transpose()?;
    let user = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt {
        system,
        user,
        source_prompt_id: definition.id.clone(),
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<&str, &str>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text prompts, never HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question", "Hello, world!");

        let result = render_template("Question: {{question}}", &vars).unwrap();
        assert_eq!(result, "Question: Hello, world!");
    }

    #[test]
    fn test_builtin_prompt_layout() {
        let context = "Q: How to apply for leave?\nA: Use the HR portal -> Leave Request.";
        let built = build_prompt(&PromptDefinition::builtin(), "Can I take Friday off?", context)
            .unwrap();

        assert_eq!(
            built.user,
            format!(
                "FAQ context:\n{}\n\nUser question: Can I take Friday off?",
                context
            )
        );
        assert!(built.system.is_some());
        assert_eq!(built.source_prompt_id, "support.answer.default");
    }

    #[test]
    fn test_no_html_escaping() {
        let built = build_prompt(
            &PromptDefinition::builtin(),
            "Why can't I log in? <urgent>",
            "Q: a & b\nA: c",
        )
        .unwrap();

        assert!(built.user.contains("can't I log in? <urgent>"));
        assert!(built.user.contains("Q: a & b"));
        assert!(!built.user.contains("&amp;"));
    }

    #[test]
    fn test_missing_system_stays_none() {
        let mut def = PromptDefinition::builtin();
        def.system = None;
        let built = build_prompt(&def, "q", "").unwrap();
        assert!(built.system.is_none());
    }

    #[test]
    fn test_broken_template_is_prompt_error() {
        let mut def = PromptDefinition::builtin();
        def.template = "{{#if question}}unclosed".to_string();
        let result = build_prompt(&def, "q", "");
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }
}
