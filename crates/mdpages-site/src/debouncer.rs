//! Change debouncing for watch mode.
//!
//! Every change means "rebuild everything", so the debouncer only keeps the
//! changed paths and one deadline. Each new change pushes the deadline back;
//! the batch is released once the tree has been quiet for the whole window.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Pending {
    paths: Vec<PathBuf>,
    deadline: Option<Instant>,
}

/// Collects changes from the watcher thread until they settle.
#[derive(Debug)]
pub(crate) struct ChangeDebouncer {
    pending: Mutex<Pending>,
    quiet_period: Duration,
}

impl ChangeDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            pending: Mutex::new(Pending::default()),
            quiet_period,
        }
    }

    /// Record a changed path and restart the quiet period.
    pub fn record(&self, path: PathBuf) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.paths.contains(&path) {
            pending.paths.push(path);
        }
        pending.deadline = Some(Instant::now() + self.quiet_period);
    }

    /// Take the pending batch if its quiet period is over.
    pub fn take_ready(&self) -> Option<Vec<PathBuf>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(std::mem::take(&mut *pending).paths),
            _ => None,
        }
    }

    /// When the pending batch becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn test_batch_released_after_quiet_period() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(10));
        debouncer.record(PathBuf::from("/site/src/index.md"));

        assert!(debouncer.take_ready().is_none());
        thread::sleep(Duration::from_millis(20));

        assert_eq!(
            debouncer.take_ready(),
            Some(vec![PathBuf::from("/site/src/index.md")])
        );
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.take_ready().is_none());
    }

    #[test]
    fn test_zero_window_ready_immediately() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);
        debouncer.record(PathBuf::from("/a.md"));

        assert_eq!(debouncer.take_ready().map(|b| b.len()), Some(1));
    }

    #[test]
    fn test_repeated_path_listed_once_in_order() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);
        for path in ["/b.md", "/a.md", "/b.md", "/b.md"] {
            debouncer.record(PathBuf::from(path));
        }

        assert_eq!(
            debouncer.take_ready(),
            Some(vec![PathBuf::from("/b.md"), PathBuf::from("/a.md")])
        );
    }

    #[test]
    fn test_create_then_remove_still_yields_batch() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);
        let path = PathBuf::from("/tmp.md");
        debouncer.record(path.clone());
        debouncer.record(path.clone());

        assert_eq!(debouncer.take_ready(), Some(vec![path]));
    }

    #[test]
    fn test_new_change_extends_deadline() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(40));

        debouncer.record(PathBuf::from("/a.md"));
        thread::sleep(Duration::from_millis(25));
        debouncer.record(PathBuf::from("/b.md"));
        thread::sleep(Duration::from_millis(25));

        assert!(debouncer.take_ready().is_none());
        assert!(debouncer.deadline().is_some());
    }
}
