//! Product Catalog - A product CRUD service with a read cache
//!
//! Products live behind a storage gateway (in-memory or SQLite). Reads by id
//! and by category are cached and invalidated on writes; the whole cache is
//! also cleared on a fixed period.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{ProductError, Result};
pub use tasks::spawn_sweep_task;
