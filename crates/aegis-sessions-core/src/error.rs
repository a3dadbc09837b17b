// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for scan session state.

use crate::session::SessionStatus;
use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionsError>;

/// Errors that can occur when parsing wire values or applying events.
#[derive(Debug, Error)]
pub enum SessionsError {
	#[error("unknown session status: {0}")]
	InvalidStatus(String),

	#[error("unknown scan type: {0}")]
	InvalidScanType(String),

	#[error("unknown report type: {0}")]
	InvalidReportType(String),

	/// The scan service reported `NEEDS_APPROVAL` without naming the action
	/// awaiting authorization. The report is rejected wholesale: no gate
	/// opens and the session keeps its last known good status.
	#[error("scan service reported NEEDS_APPROVAL without a pending action")]
	NeedsApprovalWithoutAction,

	/// An operator action was issued outside the state it is valid in.
	/// Rejected locally, before any network call.
	#[error("{action} is not allowed while session status is {status}")]
	ActionNotAllowed {
		/// The operator action that was attempted.
		action: &'static str,
		/// The session status at call time.
		status: SessionStatus,
	},
}
