//! Diagnostic sink for call-set mismatches.
//!
//! The evaluator never prints; it hands each mismatch to a
//! [`MismatchObserver`]. The default observer emits a `tracing` event.

use tracing::warn;

use super::compare::CallSetMismatch;
use super::types::TaskInfo;

/// Receives a notification every time generated calls differ from the
/// ground truth.
pub trait MismatchObserver: Send + Sync {
    fn on_mismatch(&self, task: &TaskInfo, mismatch: &CallSetMismatch);
}

/// Logs mismatches at `warn` level with the task's provenance fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MismatchObserver for TracingObserver {
    fn on_mismatch(&self, task: &TaskInfo, mismatch: &CallSetMismatch) {
        warn!(
            uid = task.uid.as_deref().unwrap_or("-"),
            data_source = task.data_source.as_deref().unwrap_or("-"),
            generated = ?mismatch.generated,
            expected = ?mismatch.expected,
            unexpected = mismatch.unexpected.len(),
            missing = mismatch.missing.len(),
            "tool calls mismatch"
        );
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl MismatchObserver for SilentObserver {
    fn on_mismatch(&self, _task: &TaskInfo, _mismatch: &CallSetMismatch) {}
}
