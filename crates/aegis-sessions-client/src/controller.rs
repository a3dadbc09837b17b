// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The operator-facing scan controller.
//!
//! Owns the [`Session`] record and the poll task, and exposes the four
//! operator actions plus a read-only snapshot surface for the presentation
//! layer. Gate guards are enforced locally, before any network call, so a
//! stale UI cannot double-submit a verdict or bypass the gate.

use std::sync::Arc;

use aegis_sessions_core::{
	ScanType, Session, SessionEvent, SessionStatus, SessionsError,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::scheduler::{self, CancellationToken, PollTask};
use crate::transport::{HttpScanTransport, ScanTransport};

/// Builder for constructing a [`ScanController`].
pub struct ScanControllerBuilder {
	base_url: Option<String>,
	config: ClientConfig,
	transport: Option<Arc<dyn ScanTransport>>,
}

impl ScanControllerBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			base_url: None,
			config: ClientConfig::default(),
			transport: None,
		}
	}

	/// Sets the base URL of the scan service.
	///
	/// Example: `http://127.0.0.1:5000`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the cadence of the poll loop.
	pub fn poll_interval(mut self, interval: std::time::Duration) -> Self {
		self.config.poll_interval = interval;
		self
	}

	/// Sets the per-request HTTP timeout.
	pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	/// Substitutes the transport implementation. Used by tests; when set,
	/// the base URL is not required.
	pub fn transport(mut self, transport: Arc<dyn ScanTransport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Builds the controller with a pristine idle session.
	pub fn build(self) -> Result<ScanController> {
		let transport = match self.transport {
			Some(transport) => transport,
			None => {
				let base_url = self.base_url.ok_or(ClientError::MissingBaseUrl)?;
				Arc::new(HttpScanTransport::new(
					base_url,
					self.config.request_timeout,
				)) as Arc<dyn ScanTransport>
			}
		};

		info!("scan controller initialized");

		Ok(ScanController {
			inner: Arc::new(ControllerInner {
				transport,
				config: self.config,
				session: RwLock::new(Session::new()),
				poll_task: Mutex::new(None),
			}),
		})
	}
}

impl Default for ScanControllerBuilder {
	fn default() -> Self {
		Self::new()
	}
}

pub(crate) struct ControllerInner {
	pub(crate) transport: Arc<dyn ScanTransport>,
	pub(crate) config: ClientConfig,
	pub(crate) session: RwLock<Session>,
	poll_task: Mutex<Option<PollTask>>,
}

impl ControllerInner {
	/// One poll cycle. Returns `false` when the loop should stop.
	pub(crate) async fn poll_once(&self, token: &CancellationToken) -> bool {
		let result = self.transport.poll().await;
		if token.is_cancelled() {
			return false;
		}

		let mut session = self.session.write().await;
		match result {
			Ok(report) => {
				if let Err(e) = session.apply(SessionEvent::PollReport(report)) {
					warn!(error = %e, "rejected poll report");
				}
				if session.status.is_terminal() {
					info!(status = %session.status, "scan finished, poll loop stopping");
					return false;
				}
				true
			}
			Err(e) => {
				// Transient network loss must not end observation.
				warn!(error = %e, "poll failed");
				let _ = session.apply(SessionEvent::PollFailed {
					detail: e.to_string(),
				});
				true
			}
		}
	}
}

enum Verdict {
	Approve,
	Deny,
}

impl Verdict {
	fn action(&self) -> &'static str {
		match self {
			Verdict::Approve => "approve",
			Verdict::Deny => "deny",
		}
	}
}

/// Control surface for one scan engagement.
///
/// Cheap to clone; all clones share the same session. The presentation
/// layer reads derived state through the snapshot accessors and triggers
/// the operator actions; it never mutates session fields directly.
///
/// # Example
///
/// ```ignore
/// use aegis_sessions_client::ScanController;
/// use aegis_sessions_core::ScanType;
///
/// let controller = ScanController::builder()
///     .base_url("http://127.0.0.1:5000")
///     .build()?;
///
/// controller
///     .start_scan(vec!["https://example.com".into()], ScanType::Web)
///     .await?;
///
/// if controller.is_gate_open().await {
///     // show the pending action to the operator, then:
///     controller.deny().await?;
/// }
/// ```
#[derive(Clone)]
pub struct ScanController {
	inner: Arc<ControllerInner>,
}

impl ScanController {
	/// Creates a new builder for constructing a controller.
	pub fn builder() -> ScanControllerBuilder {
		ScanControllerBuilder::new()
	}

	/// Submits a scan and, on acceptance, arms the poll loop.
	///
	/// Only callable while the session is idle. A rejected or failed start
	/// leaves the session idle with `last_error` set.
	pub async fn start_scan(
		&self,
		targets: Vec<String>,
		scan_type: ScanType,
	) -> Result<()> {
		{
			let session = self.inner.session.read().await;
			if session.status != SessionStatus::Idle {
				return Err(SessionsError::ActionNotAllowed {
					action: "start_scan",
					status: session.status,
				}
				.into());
			}
		}

		match self.inner.transport.start(&targets, scan_type).await {
			Ok(outcome) if outcome.accepted => {
				{
					let mut session = self.inner.session.write().await;
					session.apply(SessionEvent::StartAccepted { targets, scan_type })?;
				}
				info!(%scan_type, "scan started");
				self.arm_scheduler().await;
				Ok(())
			}
			Ok(outcome) => {
				let message = outcome
					.message
					.unwrap_or_else(|| "start request rejected".to_string());
				let mut session = self.inner.session.write().await;
				session.apply(SessionEvent::StartRejected {
					message: message.clone(),
				})?;
				Err(ClientError::StartRejected(message))
			}
			Err(e) => {
				let mut session = self.inner.session.write().await;
				session.apply(SessionEvent::StartRejected {
					message: e.to_string(),
				})?;
				Err(e.into())
			}
		}
	}

	/// Authorizes the pending action. Fails fast when no gate is open.
	pub async fn approve(&self) -> Result<()> {
		self.resolve_gate(Verdict::Approve).await
	}

	/// Rejects the pending action; the scan continues on an alternate
	/// path. Fails fast when no gate is open.
	pub async fn deny(&self) -> Result<()> {
		self.resolve_gate(Verdict::Deny).await
	}

	async fn resolve_gate(&self, verdict: Verdict) -> Result<()> {
		let action = verdict.action();
		{
			let session = self.inner.session.read().await;
			if !session.is_gate_open() {
				return Err(SessionsError::ActionNotAllowed {
					action,
					status: session.status,
				}
				.into());
			}
		}

		let result = match verdict {
			Verdict::Approve => self.inner.transport.approve().await,
			Verdict::Deny => self.inner.transport.deny().await,
		};
		let ack = match result {
			Ok(ack) => ack,
			Err(e) => {
				let mut session = self.inner.session.write().await;
				let _ = session.apply(SessionEvent::PollFailed {
					detail: e.to_string(),
				});
				return Err(e.into());
			}
		};
		if !ack.accepted {
			warn!(action, "scan service refused gate verdict");
			return Err(ClientError::Refused(action));
		}

		let mut session = self.inner.session.write().await;
		session.apply(SessionEvent::GateResolved)?;
		info!(action, "approval gate resolved");
		Ok(())
	}

	/// Emergency halt. Authoritative locally and immediately: the remote
	/// kill is best-effort, and a failure to reach the service does not
	/// keep the session alive. The kill control must stay usable during
	/// connectivity problems.
	pub async fn kill_switch(&self) -> Result<()> {
		{
			let session = self.inner.session.read().await;
			if !session.is_active() {
				return Err(SessionsError::ActionNotAllowed {
					action: "kill_switch",
					status: session.status,
				}
				.into());
			}
		}

		match self.inner.transport.kill().await {
			Ok(ack) if !ack.accepted => {
				warn!("kill request not acknowledged, terminating locally anyway")
			}
			Err(e) => warn!(error = %e, "kill request failed, terminating locally anyway"),
			Ok(_) => {}
		}

		{
			let mut session = self.inner.session.write().await;
			session.apply(SessionEvent::KillConfirmed)?;
		}
		self.disarm_scheduler().await;
		info!("scan terminated by kill switch");
		Ok(())
	}

	/// Returns the session to pristine idle. Callable once the session is
	/// terminal (or idle); an active scan must be killed first.
	pub async fn reset_session(&self) -> Result<()> {
		{
			let session = self.inner.session.read().await;
			if session.is_active() {
				return Err(SessionsError::ActionNotAllowed {
					action: "reset_session",
					status: session.status,
				}
				.into());
			}
		}

		let ack = self.inner.transport.reset().await?;
		if !ack.accepted {
			return Err(ClientError::Refused("reset_session"));
		}

		self.disarm_scheduler().await;
		{
			let mut session = self.inner.session.write().await;
			session.apply(SessionEvent::Reset)?;
		}
		info!("session reset");
		Ok(())
	}

	/// Whether a blocking approval prompt must be shown.
	pub async fn is_gate_open(&self) -> bool {
		self.inner.session.read().await.is_gate_open()
	}

	/// Current session status.
	pub async fn status(&self) -> SessionStatus {
		self.inner.session.read().await.status
	}

	/// The action awaiting authorization, when the gate is open.
	pub async fn pending_action(&self) -> Option<String> {
		self.inner.session.read().await.pending_action.clone()
	}

	/// The last diagnostic, rendered verbatim to the operator.
	pub async fn last_error(&self) -> Option<String> {
		self.inner.session.read().await.last_error.clone()
	}

	/// A full copy of the session for display.
	pub async fn snapshot(&self) -> Session {
		self.inner.session.read().await.clone()
	}

	async fn arm_scheduler(&self) {
		let task = scheduler::arm(Arc::clone(&self.inner));
		if let Some(previous) = self.inner.poll_task.lock().await.replace(task) {
			previous.disarm();
		}
	}

	async fn disarm_scheduler(&self) {
		if let Some(task) = self.inner.poll_task.lock().await.take() {
			task.disarm();
		}
	}
}
