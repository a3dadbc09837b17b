// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The client-side session record and its wire enums.

use serde::{Deserialize, Serialize};

use crate::error::SessionsError;
use crate::log::LogEntry;

/// Session status, 1:1 with the scan service's wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
	/// No scan configured.
	Idle,
	/// Scan in progress.
	Running,
	/// The agent is blocked on an operator verdict for a flagged action.
	NeedsApproval,
	/// Scan finished; findings are available.
	Completed,
	/// Scan halted by the kill switch or by the service.
	Terminated,
}

impl SessionStatus {
	/// Whether this status is terminal. Terminal sessions receive no
	/// further polls; only a reset leaves them.
	#[must_use]
	pub fn is_terminal(&self) -> bool {
		matches!(self, SessionStatus::Completed | SessionStatus::Terminated)
	}
}

impl std::fmt::Display for SessionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SessionStatus::Idle => write!(f, "IDLE"),
			SessionStatus::Running => write!(f, "RUNNING"),
			SessionStatus::NeedsApproval => write!(f, "NEEDS_APPROVAL"),
			SessionStatus::Completed => write!(f, "COMPLETED"),
			SessionStatus::Terminated => write!(f, "TERMINATED"),
		}
	}
}

impl std::str::FromStr for SessionStatus {
	type Err = SessionsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"IDLE" => Ok(SessionStatus::Idle),
			"RUNNING" => Ok(SessionStatus::Running),
			"NEEDS_APPROVAL" => Ok(SessionStatus::NeedsApproval),
			"COMPLETED" => Ok(SessionStatus::Completed),
			"TERMINATED" => Ok(SessionStatus::Terminated),
			_ => Err(SessionsError::InvalidStatus(s.to_string())),
		}
	}
}

/// What kind of scan the operator requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
	/// Web application scan.
	Web,
	/// Network/host scan.
	Network,
}

impl std::fmt::Display for ScanType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ScanType::Web => write!(f, "web"),
			ScanType::Network => write!(f, "network"),
		}
	}
}

impl std::str::FromStr for ScanType {
	type Err = SessionsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"web" => Ok(ScanType::Web),
			"network" => Ok(ScanType::Network),
			_ => Err(SessionsError::InvalidScanType(s.to_string())),
		}
	}
}

/// Which findings template applies once the scan completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
	SqlInjection,
	SensitiveData,
}

impl std::fmt::Display for ReportType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ReportType::SqlInjection => write!(f, "sql_injection"),
			ReportType::SensitiveData => write!(f, "sensitive_data"),
		}
	}
}

impl std::str::FromStr for ReportType {
	type Err = SessionsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sql_injection" => Ok(ReportType::SqlInjection),
			"sensitive_data" => Ok(ReportType::SensitiveData),
			_ => Err(SessionsError::InvalidReportType(s.to_string())),
		}
	}
}

/// The client-side record of one scan engagement.
///
/// Mutated exclusively through [`Session::apply`]; everything else holds
/// read-only or event-dispatch access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
	pub status: SessionStatus,

	/// Scan targets, immutable once the session starts.
	pub targets: Vec<String>,
	/// `None` until a scan is configured.
	pub scan_type: Option<ScanType>,

	/// Server-authoritative log, replaced wholesale on each poll.
	pub logs: Vec<LogEntry>,

	/// The action awaiting authorization. Present iff
	/// `status == NeedsApproval`.
	pub pending_action: Option<String>,

	/// Set once the service classifies the completed scan's findings.
	pub report_type: Option<ReportType>,

	/// Human-readable diagnostic, cleared on every successful transition.
	pub last_error: Option<String>,
}

impl Session {
	/// A pristine idle session with empty logs.
	#[must_use]
	pub fn new() -> Self {
		Self {
			status: SessionStatus::Idle,
			targets: Vec::new(),
			scan_type: None,
			logs: Vec::new(),
			pending_action: None,
			report_type: None,
			last_error: None,
		}
	}

	/// Whether a blocking approval prompt must be shown.
	#[must_use]
	pub fn is_gate_open(&self) -> bool {
		self.status == SessionStatus::NeedsApproval
	}

	/// Whether the scan is being observed (running or gated).
	#[must_use]
	pub fn is_active(&self) -> bool {
		matches!(
			self.status,
			SessionStatus::Running | SessionStatus::NeedsApproval
		)
	}
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn session_status_roundtrip(status in prop_oneof![
			Just(SessionStatus::Idle),
			Just(SessionStatus::Running),
			Just(SessionStatus::NeedsApproval),
			Just(SessionStatus::Completed),
			Just(SessionStatus::Terminated),
		]) {
			let s = status.to_string();
			let parsed: SessionStatus = s.parse().unwrap();
			prop_assert_eq!(status, parsed);
		}

		#[test]
		fn scan_type_roundtrip(scan_type in prop_oneof![
			Just(ScanType::Web),
			Just(ScanType::Network),
		]) {
			let s = scan_type.to_string();
			let parsed: ScanType = s.parse().unwrap();
			prop_assert_eq!(scan_type, parsed);
		}

		#[test]
		fn report_type_roundtrip(report_type in prop_oneof![
			Just(ReportType::SqlInjection),
			Just(ReportType::SensitiveData),
		]) {
			let s = report_type.to_string();
			let parsed: ReportType = s.parse().unwrap();
			prop_assert_eq!(report_type, parsed);
		}

		#[test]
		fn display_matches_serde_wire_form(status in prop_oneof![
			Just(SessionStatus::Idle),
			Just(SessionStatus::Running),
			Just(SessionStatus::NeedsApproval),
			Just(SessionStatus::Completed),
			Just(SessionStatus::Terminated),
		]) {
			let json = serde_json::to_string(&status).unwrap();
			prop_assert_eq!(json, format!("\"{}\"", status));
		}
	}

	#[test]
	fn unknown_status_is_rejected() {
		let err = "EXPLODED".parse::<SessionStatus>().unwrap_err();
		assert!(matches!(
			err,
			crate::error::SessionsError::InvalidStatus(_)
		));
	}

	#[test]
	fn terminal_statuses() {
		assert!(SessionStatus::Completed.is_terminal());
		assert!(SessionStatus::Terminated.is_terminal());
		assert!(!SessionStatus::Idle.is_terminal());
		assert!(!SessionStatus::Running.is_terminal());
		assert!(!SessionStatus::NeedsApproval.is_terminal());
	}

	#[test]
	fn new_session_is_pristine() {
		let session = Session::new();
		assert_eq!(session.status, SessionStatus::Idle);
		assert!(session.targets.is_empty());
		assert!(session.scan_type.is_none());
		assert!(session.logs.is_empty());
		assert!(session.pending_action.is_none());
		assert!(session.report_type.is_none());
		assert!(session.last_error.is_none());
	}
}
