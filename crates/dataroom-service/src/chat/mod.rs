//! Room chat service.

pub mod service;

pub use service::ChatService;
