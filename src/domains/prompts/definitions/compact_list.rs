//! Compact todo list prompt definition.

use super::PromptDefinition;
use crate::domains::tools::definitions::ListTodosTool;
use rmcp::model::PromptArgument;

/// Asks the agent for a terse bullet list of a creator's open todos.
pub struct CompactListPrompt;

impl PromptDefinition for CompactListPrompt {
    const NAME: &'static str = "compact_list";
    const DESCRIPTION: &'static str =
        "List the titles of a creator's todos that are not done, as a bullet list";

    fn template() -> &'static str {
        "Please list all todos created by {{creator}} using the {{tool}} tool. \
         Format the response as a bullet list containing only the title of each todo. \
         Only include todos that are not done."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "creator".to_string(),
            title: Some("Creator".to_string()),
            description: Some("Name of the creator whose todos should be listed".to_string()),
            required: Some(true),
        }]
    }

    fn defaults() -> Vec<(&'static str, &'static str)> {
        vec![("tool", ListTodosTool::NAME)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_list_metadata() {
        assert_eq!(CompactListPrompt::NAME, "compact_list");
        assert!(CompactListPrompt::template().contains("{{creator}}"));

        let args = CompactListPrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "creator");
        assert_eq!(args[0].required, Some(true));
    }
}
