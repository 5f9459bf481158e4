//! Prompt templates.
//!
//! Templates use a plain `{{name}}` placeholder syntax. There are no
//! conditionals; every placeholder must resolve or rendering fails.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// Fixed values baked into the template.
    pub defaults: HashMap<String, String>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Render the template with the given arguments.
    ///
    /// Fixed defaults win over caller arguments of the same name. Arguments
    /// that appear in no placeholder are ignored.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find(OPEN) {
            rendered.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| {
                PromptError::template(format!("unclosed placeholder in prompt '{}'", self.name))
            })?;

            let key = after_open[..end].trim();
            let value = self
                .defaults
                .get(key)
                .or_else(|| arguments.get(key))
                .ok_or_else(|| PromptError::missing_argument(key))?;
            rendered.push_str(value);

            rest = &after_open[end + CLOSE.len()..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &str) -> PromptTemplate {
        PromptTemplate {
            name: "test".to_string(),
            description: None,
            arguments: Vec::new(),
            defaults: HashMap::from([("tool".to_string(), "list_todos".to_string())]),
            template: text.to_string(),
        }
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_arguments_and_defaults() {
        let rendered = template("Todos of {{creator}} via {{ tool }}.")
            .render(&args(&[("creator", "alice")]))
            .unwrap();
        assert_eq!(rendered, "Todos of alice via list_todos.");
    }

    #[test]
    fn test_defaults_cannot_be_overridden() {
        let rendered = template("{{tool}}")
            .render(&args(&[("tool", "delete_todo")]))
            .unwrap();
        assert_eq!(rendered, "list_todos");
    }

    #[test]
    fn test_missing_value_fails() {
        let err = template("Hi {{creator}}").render(&HashMap::new()).unwrap_err();
        assert!(matches!(err, PromptError::MissingArgument(name) if name == "creator"));
    }

    #[test]
    fn test_unclosed_placeholder_fails() {
        let err = template("Hi {{creator").render(&args(&[("creator", "a")])).unwrap_err();
        assert!(matches!(err, PromptError::TemplateError(_)));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let rendered = template("{{creator}}")
            .render(&args(&[("creator", "{{tool}}")]))
            .unwrap();
        assert_eq!(rendered, "{{tool}}");
    }
}
