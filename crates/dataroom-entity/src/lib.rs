//! # dataroom-entity
//!
//! Domain entity models for Vantage Dataroom. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod activity;
pub mod file;
pub mod folder;
pub mod guest;
pub mod member;
pub mod message;
pub mod permission;
pub mod room;
