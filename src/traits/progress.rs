//! Progress reporting for long-running extraction runs.

/// Receives human-readable status strings during an extraction run.
///
/// Reported at run start, per-chunk start, per-chunk completion,
/// per-chunk error and result assembly. Any `Fn(&str)` closure works.
pub trait ProgressSink: Send + Sync {
    fn report(&self, status: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, status: &str) {
        self(status)
    }
}
