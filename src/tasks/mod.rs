//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Removes expired entries from the upstream cache and the
//!   session store at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
