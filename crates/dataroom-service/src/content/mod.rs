//! Content & permission gateway.

pub mod service;

pub use service::{Breadcrumb, ContentListing, ContentService};
