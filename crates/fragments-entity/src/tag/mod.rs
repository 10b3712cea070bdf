//! Tag domain entities.

pub mod model;

pub use model::{SnippetTagName, Tag, TagSummary};
