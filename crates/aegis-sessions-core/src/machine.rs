// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The event-applying state machine for scan sessions.
//!
//! Every transport response and operator action is expressed as a
//! [`SessionEvent`] and applied atomically. This is the only code path
//! that mutates a [`Session`], which is what makes the gate invariant
//! (`pending_action` present iff `NEEDS_APPROVAL`) and the no-regression
//! rule enforceable in one place.

use crate::error::{Result, SessionsError};
use crate::log::LogEntry;
use crate::session::{ReportType, ScanType, Session, SessionStatus};

/// Operator-visible notice recorded when the kill switch fires.
pub const KILL_SWITCH_NOTICE: &str = "scan terminated by operator kill switch";

/// One successful `/poll_status` exchange, already parsed into domain types.
#[derive(Debug, Clone)]
pub struct PollReport {
	pub status: SessionStatus,
	pub logs: Vec<LogEntry>,
	pub pending_action: Option<String>,
	pub report_type: Option<ReportType>,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
	/// The scan service accepted a start request.
	StartAccepted {
		targets: Vec<String>,
		scan_type: ScanType,
	},
	/// The start request was rejected or failed in transport.
	StartRejected { message: String },
	/// A poll exchange succeeded.
	PollReport(PollReport),
	/// A poll exchange failed in transport. Observation continues.
	PollFailed { detail: String },
	/// The service acknowledged an approve or deny verdict. The gate
	/// closes locally without waiting for the next poll to confirm.
	GateResolved,
	/// The operator fired the kill switch. Authoritative locally and
	/// immediately, even if the remote acknowledgement is still racing
	/// the next scheduled poll.
	KillConfirmed,
	/// The service acknowledged a reset.
	Reset,
}

impl Session {
	/// Applies one event, returning an error when the event is rejected.
	///
	/// A rejected event never leaves the session in a broken state: guard
	/// and protocol violations mutate nothing except `last_error`.
	pub fn apply(&mut self, event: SessionEvent) -> Result<()> {
		match event {
			SessionEvent::StartAccepted { targets, scan_type } => {
				if self.status != SessionStatus::Idle {
					return Err(SessionsError::ActionNotAllowed {
						action: "start_scan",
						status: self.status,
					});
				}
				self.status = SessionStatus::Running;
				self.targets = targets;
				self.scan_type = Some(scan_type);
				self.last_error = None;
				Ok(())
			}
			SessionEvent::StartRejected { message } => {
				self.last_error = Some(message);
				Ok(())
			}
			SessionEvent::PollReport(report) => self.apply_poll(report),
			SessionEvent::PollFailed { detail } => {
				self.last_error = Some(format!("lost connection: {detail}"));
				Ok(())
			}
			SessionEvent::GateResolved => {
				if self.status == SessionStatus::NeedsApproval {
					self.status = SessionStatus::Running;
					self.pending_action = None;
					self.last_error = None;
				}
				Ok(())
			}
			SessionEvent::KillConfirmed => {
				if self.is_active() {
					self.status = SessionStatus::Terminated;
					self.pending_action = None;
					self.last_error = Some(KILL_SWITCH_NOTICE.to_string());
				}
				Ok(())
			}
			SessionEvent::Reset => {
				*self = Session::new();
				Ok(())
			}
		}
	}

	fn apply_poll(&mut self, report: PollReport) -> Result<()> {
		// Polls are only meaningful while the scan is being observed. A
		// report landing after a local kill, a completion, or a reset is
		// confirming already-applied state: status never moves backward.
		if !self.is_active() {
			return Ok(());
		}

		if report.status == SessionStatus::NeedsApproval
			&& report.pending_action.as_deref().map_or(true, str::is_empty)
		{
			self.last_error = Some(SessionsError::NeedsApprovalWithoutAction.to_string());
			return Err(SessionsError::NeedsApprovalWithoutAction);
		}

		self.status = report.status;
		self.logs = report.logs;
		self.pending_action = if report.status == SessionStatus::NeedsApproval {
			report.pending_action
		} else {
			None
		};
		if report.report_type.is_some() {
			self.report_type = report.report_type;
		}
		self.last_error = None;
		Ok(())
	}
}
