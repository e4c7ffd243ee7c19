use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::error::McpError;
use crate::news::NewsSource;
use crate::tools::{Tool, news::GetNewsTool};

use super::types::{CallToolResult, Property, Tool as McpTool, ToolContent, ToolInputSchema};

pub struct RequestHandler {
    tools: HashMap<String, Box<dyn Tool + Send + Sync>>,
}

macro_rules! register_tool {
    ($tools:expr, $name:expr, $tool:expr) => {
        $tools.insert($name.to_string(), Box::new($tool));
    };
}

impl RequestHandler {
    pub fn new(source: Arc<NewsSource>, config: &Config) -> anyhow::Result<Self> {
        let mut tools: HashMap<String, Box<dyn Tool + Send + Sync>> = HashMap::new();

        register_tool!(tools, "get_news", GetNewsTool::new(source.clone(), config));

        if source.is_empty() {
            warn!("News source has no articles; every request will render a no-results block");
        }

        Ok(Self { tools })
    }

    pub async fn list_tools(&self) -> Vec<McpTool> {
        let mut tool_list = Vec::new();

        for (name, tool) in &self.tools {
            tool_list.push(self.tool_to_mcp_tool(name, tool.as_ref()));
        }

        tool_list
    }

    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| McpError::NotFound(format!("Tool not found: {}", name)))?;

        let result = tool.execute(arguments).await?;

        // Convert result to tool content
        let content = if let Some(text) = result.as_str() {
            vec![ToolContent::Text {
                text: text.to_string(),
            }]
        } else {
            vec![ToolContent::Text {
                text: serde_json::to_string_pretty(&result)?,
            }]
        };

        Ok(CallToolResult { content })
    }

    // Helper functions for creating tool schemas
    fn create_string_prop(description: &str, _required: bool) -> Property {
        Property {
            property_type: "string".to_string(),
            description: Some(description.to_string()),
            default: None,
            enum_values: None,
        }
    }

    fn create_number_prop(description: &str, default: i32) -> Property {
        Property {
            property_type: "number".to_string(),
            description: Some(description.to_string()),
            default: Some(Value::Number(default.into())),
            enum_values: None,
        }
    }

    fn create_enum_prop(description: &str, default: &str, options: Vec<&str>) -> Property {
        Property {
            property_type: "string".to_string(),
            description: Some(description.to_string()),
            default: Some(Value::String(default.to_string())),
            enum_values: Some(
                options
                    .into_iter()
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
        }
    }

    fn tool_to_mcp_tool(&self, name: &str, tool: &(dyn Tool + Send + Sync)) -> McpTool {
        // Create input schema based on tool name
        let (properties, required) = match name {
            "get_news" => {
                let mut props = HashMap::new();
                props.insert(
                    "topic".to_string(),
                    Self::create_string_prop("News topic or query", true),
                );
                props.insert(
                    "format".to_string(),
                    Self::create_enum_prop(
                        "Display format (carousel or single card)",
                        "carousel",
                        vec!["carousel", "card"],
                    ),
                );
                props.insert(
                    "limit".to_string(),
                    Self::create_number_prop("Number of articles to return (default: 5)", 5),
                );
                (props, vec!["topic".to_string()])
            }
            _ => (HashMap::new(), vec![]),
        };

        McpTool {
            name: name.to_string(),
            description: tool.description().to_string(),
            input_schema: ToolInputSchema {
                schema_type: "object".to_string(),
                properties,
                required,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler() -> RequestHandler {
        RequestHandler::new(Arc::new(NewsSource::builtin()), &Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_list_tools_advertises_get_news_schema() {
        let tools = handler().list_tools().await;
        assert_eq!(tools.len(), 1);

        let tool = &tools[0];
        assert_eq!(tool.name, "get_news");
        assert_eq!(tool.input_schema.schema_type, "object");
        assert_eq!(tool.input_schema.required, vec!["topic".to_string()]);

        let format = &tool.input_schema.properties["format"];
        assert_eq!(format.default, Some(json!("carousel")));
        assert_eq!(
            format.enum_values,
            Some(vec![json!("carousel"), json!("card")])
        );

        let limit = &tool.input_schema.properties["limit"];
        assert_eq!(limit.default, Some(json!(5)));
    }

    #[tokio::test]
    async fn test_call_tool_returns_html_text_content() {
        let result = handler()
            .call_tool("get_news", json!({"topic": "technology", "format": "card"}))
            .await
            .unwrap();

        assert_eq!(result.content.len(), 1);
        let ToolContent::Text { text } = &result.content[0];
        assert!(text.contains("news-card"));
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_not_found() {
        let result = handler().call_tool("get_weather", json!({})).await;
        assert!(matches!(result, Err(McpError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_call_tool_propagates_invalid_parameter() {
        let result = handler().call_tool("get_news", json!({"topic": ""})).await;
        assert!(matches!(result, Err(McpError::InvalidParameter(_))));
    }
}
