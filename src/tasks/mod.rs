//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache Sweep: Clears every product cache entry at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
