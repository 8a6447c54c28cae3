//! Thread-offload primitives: run a blocking producer on the shared worker
//! pool and hand its result to a continuation.
//!
//! # Data Flow
//! ```text
//! caller thread                     worker thread
//! Dispatch::new(producer)
//!     .then(continuation)
//!     .start() ──────────────────→  value = producer()
//!     returns immediately           continuation(value)
//! ```
//!
//! # Design Decisions
//! - The producer is a constructor argument, so a dispatch can never be
//!   started without one
//! - The continuation runs on the same worker thread, strictly after the
//!   producer; nothing orders concurrently started dispatches
//! - No cancellation; the only timeout is whatever the producer enforces

mod pool;

/// A producer plus an optional continuation for its value.
pub struct Dispatch<T> {
    producer: Box<dyn FnOnce() -> T + Send>,
    then: Option<Box<dyn FnOnce(T) + Send>>,
}

impl<T: Send + 'static> Dispatch<T> {
    pub fn new(producer: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            producer: Box::new(producer),
            then: None,
        }
    }

    /// Continuation invoked with the produced value.
    pub fn then(mut self, continuation: impl FnOnce(T) + Send + 'static) -> Self {
        self.then = Some(Box::new(continuation));
        self
    }

    /// Hand the pipeline to a worker thread and return immediately.
    pub fn start(self) {
        let Dispatch { producer, then } = self;
        let _ = pool::io_pool().spawn_blocking(move || {
            let value = producer();
            if let Some(then) = then {
                then(value);
            }
        });
    }
}

/// A fallible producer with separate success and error continuations.
///
/// Exactly one of the two continuations runs, at most once.
pub struct TryDispatch<T, E> {
    producer: Box<dyn FnOnce() -> Result<T, E> + Send>,
    then: Option<Box<dyn FnOnce(T) + Send>>,
    or_else: Option<Box<dyn FnOnce(E) + Send>>,
}

impl<T: Send + 'static, E: Send + 'static> TryDispatch<T, E> {
    pub fn new(producer: impl FnOnce() -> Result<T, E> + Send + 'static) -> Self {
        Self {
            producer: Box::new(producer),
            then: None,
            or_else: None,
        }
    }

    /// Continuation for `Ok` values.
    pub fn then(mut self, continuation: impl FnOnce(T) + Send + 'static) -> Self {
        self.then = Some(Box::new(continuation));
        self
    }

    /// Continuation for the error channel.
    pub fn or_else(mut self, continuation: impl FnOnce(E) + Send + 'static) -> Self {
        self.or_else = Some(Box::new(continuation));
        self
    }

    pub fn start(self) {
        let TryDispatch {
            producer,
            then,
            or_else,
        } = self;
        let _ = pool::io_pool().spawn_blocking(move || match producer() {
            Ok(value) => {
                if let Some(then) = then {
                    then(value);
                }
            }
            Err(error) => {
                if let Some(or_else) = or_else {
                    or_else(error);
                }
            }
        });
    }
}
