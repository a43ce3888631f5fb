//! Background Task Control
//!
//! The interpreter may resume script fragments between commands. Those
//! tasks read functions out of the active backend, so they are halted before
//! the backend changes or records are rewritten underneath them.

use parking_lot::Mutex;

/// Stops every suspended script execution
pub trait TaskController {
    /// Halt all background tasks synchronously
    fn halt_all(&self);
}

/// Controller for an interpreter without background tasks
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTasks;

impl TaskController for NoTasks {
    fn halt_all(&self) {}
}

/// A background task: a function resumed every `interval_ms`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundTask {
    pub function: String,
    pub interval_ms: u64,
}

/// Shared task table
///
/// The interpreter registers tasks through an `Arc<TaskList>`; the engine
/// holds the same `Arc` and empties the table on `halt_all`.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Mutex<Vec<BackgroundTask>>,
    halts: Mutex<u64>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `function` to run every `interval_ms`
    pub fn spawn(&self, function: impl Into<String>, interval_ms: u64) {
        self.tasks.lock().push(BackgroundTask {
            function: function.into(),
            interval_ms,
        });
    }

    /// Stop one task by function name. Returns false if it was not running.
    pub fn stop(&self, function: &str) -> bool {
        let mut tasks = self.tasks.lock();
        let before = tasks.len();
        tasks.retain(|t| t.function != function);
        tasks.len() != before
    }

    /// Snapshot of the running tasks
    pub fn running(&self) -> Vec<BackgroundTask> {
        self.tasks.lock().clone()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// How many times `halt_all` has been called
    pub fn halt_count(&self) -> u64 {
        *self.halts.lock()
    }
}

impl TaskController for TaskList {
    fn halt_all(&self) {
        let stopped = {
            let mut tasks = self.tasks.lock();
            let n = tasks.len();
            tasks.clear();
            n
        };
        *self.halts.lock() += 1;

        if stopped > 0 {
            tracing::warn!("Halted {} background task(s)", stopped);
        }
    }
}
