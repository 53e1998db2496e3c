//! Background Tasks Module
//!
//! # Tasks
//! - TTL Sweep: Removes expired [`TtlStore`](crate::TtlStore) entries every `ttl / 2`

mod cleanup;

pub(crate) use cleanup::{spawn_cleanup_task, spawn_cleanup_thread};
