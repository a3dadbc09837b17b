// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log entries streamed back from the scan service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of scan output, as reported by the scan service.
///
/// The server owns log ordering and retention; each poll replaces the
/// client's copy wholesale. The client never fabricates entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
	pub timestamp: DateTime<Utc>,
	pub message: String,
}

impl LogEntry {
	/// Classifies the embedded severity marker, if any.
	///
	/// Markers are display emphasis only and carry no control-flow meaning.
	#[must_use]
	pub fn severity(&self) -> LogSeverity {
		if self.message.contains("[ALERT]") {
			LogSeverity::Alert
		} else if self.message.contains("[SUCCESS]") {
			LogSeverity::Success
		} else {
			LogSeverity::Info
		}
	}
}

/// Display emphasis derived from a log message's severity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
	/// No marker present.
	Info,
	/// Message contains `[ALERT]`.
	Alert,
	/// Message contains `[SUCCESS]`.
	Success,
}
