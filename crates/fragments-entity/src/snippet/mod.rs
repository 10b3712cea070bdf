//! Snippet domain entities.

pub mod model;

pub use model::{Snippet, SnippetFields};
