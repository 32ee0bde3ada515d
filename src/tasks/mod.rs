//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache stats reporter: logs per-partition statistics at configured
//!   intervals

mod stats_reporter;

pub use stats_reporter::spawn_stats_reporter;
