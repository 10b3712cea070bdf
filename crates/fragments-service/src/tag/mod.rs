//! Tag listing.

pub mod service;

pub use service::TagService;
