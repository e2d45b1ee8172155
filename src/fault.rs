// src/fault.rs

//! Internal-consistency faults
//!
//! Reaching a classifier or decision branch with something outside the
//! known taxonomy is a bug in the caller. It is logged loudly and the
//! operator gets a generic message; the running operation continues.

use crate::output::{OutputSink, Severity};
use tracing::error;

/// Text shown to the operator for an internal fault
pub const BUG_MESSAGE: &str = "You should not see this message. Please report this bug.";

/// Log an internal fault and tell the operator to report it
pub fn report_internal_fault(out: &dyn OutputSink, detail: &dyn std::fmt::Display) {
    error!(target: "pkgsentry::internal", "internal fault: {}", detail);
    out.emit(BUG_MESSAGE, Severity::Error);
}
