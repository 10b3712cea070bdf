//! Folder hierarchy management.

pub mod hierarchy;
pub mod service;

pub use hierarchy::{HierarchyError, HierarchyGuard, ParentLookup, TxParentLookup};
pub use service::{FolderInput, FolderService};
