//! TTL Sweep Task
//!
//! Background task that periodically removes expired TTL store entries.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Builder;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::ttl::TtlEntries;

/// Spawns a task on the current Tokio runtime that sweeps `entries` every
/// `interval` until `cancel` fires.
///
/// # Arguments
/// * `entries` - Map shared with the owning store
/// * `interval` - Time between sweeps; the first sweep happens one full
///   interval after spawning
/// * `cancel` - Token that ends the task
///
/// # Returns
/// A JoinHandle completing once the task has observed `cancel`.
pub(crate) fn spawn_cleanup_task<V>(
    entries: Arc<TtlEntries<V>>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(run_sweep(entries, interval, cancel))
}

/// Runs the same sweep loop on a dedicated OS thread driving its own
/// single-threaded runtime, for stores built outside any runtime.
///
/// # Errors
/// Fails if the runtime cannot be built or the thread cannot be spawned.
pub(crate) fn spawn_cleanup_thread<V>(
    entries: Arc<TtlEntries<V>>,
    interval: Duration,
    cancel: CancellationToken,
) -> io::Result<thread::JoinHandle<()>>
where
    V: Send + Sync + 'static,
{
    let runtime = Builder::new_current_thread().enable_time().build()?;

    thread::Builder::new()
        .name("ttl-sweep".to_string())
        .spawn(move || runtime.block_on(run_sweep(entries, interval, cancel)))
}

async fn run_sweep<V>(entries: Arc<TtlEntries<V>>, interval: Duration, cancel: CancellationToken) {
    info!(
        interval_ms = interval.as_millis() as u64,
        "Starting TTL sweep task"
    );

    // Missed ticks are not replayed in a burst
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = entries.cleanup();
                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        }
    }

    info!("TTL sweep task stopped");
}
