// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Core types for the Aegis scan session control surface.
//!
//! This crate owns the client-side view of one scan engagement: the
//! [`Session`] record, the status/scan-type/report-type wire enums, the
//! log model, and the event-applying state machine that is the single
//! place session state is allowed to change.
//!
//! Nothing in this crate performs IO. The transport and scheduling live in
//! `aegis-sessions-client`; the presentation layer only ever reads derived
//! state from a [`Session`] snapshot.

pub mod error;
pub mod log;
pub mod machine;
pub mod session;

pub use error::{Result, SessionsError};
pub use log::{LogEntry, LogSeverity};
pub use machine::{PollReport, SessionEvent, KILL_SWITCH_NOTICE};
pub use session::{ReportType, ScanType, Session, SessionStatus};
