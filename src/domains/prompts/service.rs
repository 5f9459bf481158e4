//! Prompt service implementation.
//!
//! The PromptService keeps the registered prompt templates and renders them
//! on request. Prompts are defined in `definitions/` and registered via
//! `registry.rs`.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::{debug, info};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registry of available prompts, keyed by name.
    prompts: HashMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a PromptService holding every built-in prompt.
    pub fn new() -> Self {
        let mut service = Self {
            prompts: HashMap::new(),
        };

        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        info!("PromptService ready with {} prompt(s)", service.prompts.len());

        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        debug!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts, sorted by name.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        let mut prompts: Vec<Prompt> = self
            .prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        prompts
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            if !arg.required.unwrap_or(false) {
                continue;
            }
            match arguments.get(&arg.name) {
                None => return Err(PromptError::missing_argument(&arg.name)),
                Some(value) if value.trim().is_empty() => {
                    return Err(PromptError::invalid_argument(&arg.name, "must not be blank"));
                }
                Some(_) => {}
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PromptService {
        PromptService::new()
    }

    fn creator(name: &str) -> Option<HashMap<String, String>> {
        Some(HashMap::from([("creator".to_string(), name.to_string())]))
    }

    #[tokio::test]
    async fn test_lists_compact_list() {
        let prompts = service().list_prompts().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "compact_list");
    }

    #[tokio::test]
    async fn test_default_registers_builtin_prompts() {
        let names: Vec<_> = PromptService::default()
            .list_prompts()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["compact_list".to_string()]);
    }

    #[tokio::test]
    async fn test_compact_list_renders_creator_and_tool() {
        let result = service()
            .get_prompt("compact_list", creator("alice"))
            .await
            .unwrap();

        assert_eq!(result.messages.len(), 1);
        let message = serde_json::to_value(&result.messages[0]).unwrap();
        assert_eq!(message["role"], "user");

        let text = message["content"]["text"].as_str().unwrap();
        assert!(text.starts_with(
            "Please list all todos created by alice using the list_todos tool."
        ));
        assert!(text.contains("bullet list containing only the title"));
        assert!(text.ends_with("Only include todos that are not done."));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let err = service().get_prompt("compact_list", None).await.unwrap_err();
        assert!(matches!(err, PromptError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn test_blank_required_argument() {
        let err = service()
            .get_prompt("compact_list", creator("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidArgument(..)));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let err = service().get_prompt("nonexistent", None).await.unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));
    }
}
