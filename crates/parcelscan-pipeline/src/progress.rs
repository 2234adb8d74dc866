//! Advisory progress reporting
//!
//! The pipeline emits `(current, total, status)` tuples as a side channel.
//! Reporting is advisory only: correctness must not depend on any sink
//! being attached.

/// Receives progress updates during a run.
pub trait ProgressSink {
    /// Report progress: `current` of `total`, with a short status line.
    fn update(&self, current: usize, total: usize, status: &str);
}

/// A sink that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _current: usize, _total: usize, _status: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CollectingProgress {
        updates: Mutex<Vec<(usize, usize, String)>>,
    }

    impl ProgressSink for CollectingProgress {
        fn update(&self, current: usize, total: usize, status: &str) {
            self.updates
                .lock()
                .unwrap()
                .push((current, total, status.to_string()));
        }
    }

    #[test]
    fn test_sink_receives_updates_in_order() {
        let sink = CollectingProgress {
            updates: Mutex::new(Vec::new()),
        };

        sink.update(1, 3, "scanning messages");
        sink.update(2, 3, "scanning messages");

        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], (1, 3, "scanning messages".to_string()));
        assert_eq!(updates[1].0, 2);
    }

    #[test]
    fn test_null_progress_is_a_no_op() {
        NullProgress.update(1, 10, "anything");
    }
}
