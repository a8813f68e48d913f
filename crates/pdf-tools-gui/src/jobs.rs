use pdf_async_runtime::JobKind;

/// The background job the window is waiting on.
///
/// Only one merge, reverse or export runs at a time. Options load and save are
/// never tracked, so their replies cannot end another job.
#[derive(Debug, Default)]
pub struct JobTracker {
    running: Option<JobKind>,
}

impl JobTracker {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn running(&self) -> Option<JobKind> {
        self.running
    }

    /// Start `kind`; fails if another job is still running
    pub fn start(&mut self, kind: JobKind) -> bool {
        if kind == JobKind::Options || self.running.is_some() {
            return false;
        }
        self.running = Some(kind);
        true
    }

    /// Clear the running job if `kind` is the one that finished
    pub fn finish(&mut self, kind: JobKind) -> bool {
        if self.running == Some(kind) {
            self.running = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_job_at_a_time() {
        let mut jobs = JobTracker::default();
        assert!(jobs.start(JobKind::Merge));
        assert!(!jobs.start(JobKind::Export));
        assert_eq!(jobs.running(), Some(JobKind::Merge));

        assert!(jobs.finish(JobKind::Merge));
        assert!(!jobs.is_running());
        assert!(jobs.start(JobKind::Reverse));
    }

    #[test]
    fn test_options_reply_does_not_end_export() {
        let mut jobs = JobTracker::default();
        assert!(jobs.start(JobKind::Export));

        assert!(!jobs.finish(JobKind::Options));
        assert!(!jobs.finish(JobKind::Merge));
        assert_eq!(jobs.running(), Some(JobKind::Export));

        assert!(jobs.finish(JobKind::Export));
        assert!(!jobs.is_running());
    }

    #[test]
    fn test_options_are_never_tracked() {
        let mut jobs = JobTracker::default();
        assert!(!jobs.start(JobKind::Options));
        assert!(!jobs.is_running());
    }
}
