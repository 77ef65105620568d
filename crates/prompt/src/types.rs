//! Prompt types for helpdesk.

use serde::{Deserialize, Serialize};

/// Identifier of the prompt compiled into the binary.
pub const BUILTIN_PROMPT_ID: &str = "support.answer.default";

const BUILTIN_SYSTEM: &str = "You are a helpful support assistant. Answer briefly and precisely. \
If the question is technical (IT/hardware) recommend escalation to IT support. \
If the question is HR/policy, answer from FAQ if possible and mention escalation contact if unsure.";

const BUILTIN_TEMPLATE: &str = "FAQ context:\n{{faqContext}}\n\nUser question: {{question}}";

/// A prompt definition, either built in or loaded from YAML.
///
/// Both `system` and `template` are Handlebars templates. The variables
/// available to them are `question` and `faqContext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// System message template
    #[serde(default)]
    pub system: Option<String>,

    /// User message template
    pub template: String,
}

impl PromptDefinition {
    /// The support-assistant prompt used when no override is configured.
    pub fn builtin() -> Self {
        Self {
            id: BUILTIN_PROMPT_ID.to_string(),
            title: "Support assistant answer".to_string(),
            api_version: "1.0".to_string(),
            system: Some(BUILTIN_SYSTEM.to_string()),
            template: BUILTIN_TEMPLATE.to_string(),
        }
    }
}

impl Default for PromptDefinition {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A fully rendered prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message
    pub user: String,

    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: support.answer.terse
title: Terse answers
apiVersion: "1.0"
system: "Answer in one sentence."
template: "{{question}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "support.answer.terse");
        assert_eq!(def.system.as_deref(), Some("Answer in one sentence."));
        assert_eq!(def.template, "{{question}}");
    }

    #[test]
    fn test_system_is_optional() {
        let yaml = "id: x\ntitle: X\napiVersion: \"1.0\"\ntemplate: \"{{question}}\"\n";
        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(def.system.is_none());
    }

    #[test]
    fn test_builtin_prompt() {
        let def = PromptDefinition::builtin();
        assert_eq!(def.id, BUILTIN_PROMPT_ID);
        assert!(def.template.contains("{{faqContext}}"));
        assert!(def.template.contains("{{question}}"));
        assert!(def
            .system
            .as_deref()
            .is_some_and(|s| s.contains("support assistant")));
    }
}
