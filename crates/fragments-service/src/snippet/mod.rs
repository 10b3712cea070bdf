//! Snippets and their tag sets.

pub mod service;
pub mod tags;

pub use service::{SnippetInput, SnippetService};
pub use tags::normalize_tags;
