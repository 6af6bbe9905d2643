//! Activity feed service.

pub mod service;

pub use service::ActivityService;
