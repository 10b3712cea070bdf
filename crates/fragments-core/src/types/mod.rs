//! Core type definitions used across the Fragments workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse, Pagination};
