//! Process-wide worker pool for blocking I/O tasks.
//!
//! # Design Decisions
//! - One lazily-initialized runtime shared by every dispatch; it is never
//!   drained or shut down
//! - Worker threads are created on demand and reclaimed after 60 seconds
//!   of inactivity

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

const IDLE_KEEP_ALIVE: Duration = Duration::from_secs(60);
// The runtime requires a finite cap; this stands in for "unbounded".
const MAX_IO_THREADS: usize = 32_768;

static IO_POOL: OnceLock<Runtime> = OnceLock::new();

/// The shared pool. First call initializes it.
pub(crate) fn io_pool() -> &'static Runtime {
    IO_POOL.get_or_init(|| {
        let thread_number = AtomicUsize::new(1);
        Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(MAX_IO_THREADS)
            .thread_keep_alive(IDLE_KEEP_ALIVE)
            .thread_name_fn(move || {
                let n = thread_number.fetch_add(1, Ordering::Relaxed);
                format!("dual-http-io-{n}")
            })
            .build()
            .expect("io pool construction failed")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_shared() {
        let first = io_pool() as *const Runtime;
        let second = io_pool() as *const Runtime;
        assert_eq!(first, second);
    }

    #[test]
    fn test_worker_thread_naming() {
        let (tx, rx) = std::sync::mpsc::channel();
        let _ = io_pool().spawn_blocking(move || {
            let name = std::thread::current().name().unwrap_or("").to_string();
            tx.send(name).unwrap();
        });
        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(name.starts_with("dual-http-io-"), "{name}");
    }
}
