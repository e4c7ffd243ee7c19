pub mod config;
pub mod error;
pub mod mcp;
pub mod news;
pub mod render;
pub mod tools;
pub mod utils;

pub use config::Config;
pub use error::{McpError, McpResult};
pub use news::{Article, NewsSource};
pub use render::DisplayFormat;
