pub mod news;

use crate::error::McpResult;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Tool {
    fn description(&self) -> &str;
    async fn execute(&self, params: Value) -> McpResult<Value>;
}
