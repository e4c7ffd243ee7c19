pub mod article;
pub mod source;

pub use article::Article;
pub use source::NewsSource;
