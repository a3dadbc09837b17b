// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Transport for the scan service's polling/action protocol.
//!
//! One method per remote operation, each a single request/response
//! exchange. No operation retries automatically; retry policy belongs to
//! the caller (the poll scheduler for `poll`, none for the rest).

use aegis_sessions_core::{LogEntry, PollReport, ReportType, ScanType, SessionStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::TransportError;

/// Outcome of a start request.
#[derive(Debug, Clone)]
pub struct StartOutcome {
	pub accepted: bool,
	pub message: Option<String>,
}

/// Acknowledgement of an operator action.
#[derive(Debug, Clone, Copy)]
pub struct Ack {
	pub accepted: bool,
}

/// The seam between the controller and the remote scan service.
///
/// Production uses [`HttpScanTransport`]; tests substitute a mock.
#[async_trait]
pub trait ScanTransport: Send + Sync {
	async fn start(
		&self,
		targets: &[String],
		scan_type: ScanType,
	) -> Result<StartOutcome, TransportError>;

	async fn poll(&self) -> Result<PollReport, TransportError>;

	async fn approve(&self) -> Result<Ack, TransportError>;

	async fn deny(&self) -> Result<Ack, TransportError>;

	async fn kill(&self) -> Result<Ack, TransportError>;

	async fn reset(&self) -> Result<Ack, TransportError>;
}

#[derive(Debug, Serialize)]
struct StartScanRequest<'a> {
	targets: &'a [String],
	scan_type: ScanType,
}

#[derive(Debug, Deserialize)]
struct StartScanResponse {
	success: bool,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
	success: bool,
}

#[derive(Debug, Deserialize)]
struct PollStatusResponse {
	status: String,
	#[serde(default)]
	logs: Vec<LogEntry>,
	#[serde(default)]
	pending_action: Option<String>,
	#[serde(default)]
	report_type: Option<String>,
}

fn parse_report(body: PollStatusResponse) -> Result<PollReport, TransportError> {
	let status = body
		.status
		.parse::<SessionStatus>()
		.map_err(|e| TransportError::MalformedBody(e.to_string()))?;
	let report_type = body
		.report_type
		.map(|s| s.parse::<ReportType>())
		.transpose()
		.map_err(|e| TransportError::MalformedBody(e.to_string()))?;

	Ok(PollReport {
		status,
		logs: body.logs,
		pending_action: body.pending_action,
		report_type,
	})
}

/// HTTP implementation of [`ScanTransport`] against the scan service's
/// JSON protocol.
pub struct HttpScanTransport {
	http: reqwest::Client,
	base_url: String,
}

impl HttpScanTransport {
	/// Creates a transport for the scan service at `base_url`.
	///
	/// The per-request timeout guarantees every operation resolves.
	pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
		let base_url: String = base_url.into();
		Self {
			http: aegis_common_http::new_client_with_timeout(request_timeout),
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn exchange<T: serde::de::DeserializeOwned>(
		&self,
		request: reqwest::RequestBuilder,
	) -> Result<T, TransportError> {
		let response = request
			.send()
			.await
			.map_err(|e| TransportError::Unreachable(e.to_string()))?;

		if !response.status().is_success() {
			return Err(TransportError::BadStatus(response.status().as_u16()));
		}

		response
			.json::<T>()
			.await
			.map_err(|e| TransportError::MalformedBody(e.to_string()))
	}

	async fn action(&self, path: &'static str) -> Result<Ack, TransportError> {
		debug!(path, "issuing scan service action");
		let body: AckResponse = self.exchange(self.http.post(self.url(path))).await?;
		Ok(Ack {
			accepted: body.success,
		})
	}
}

#[async_trait]
impl ScanTransport for HttpScanTransport {
	async fn start(
		&self,
		targets: &[String],
		scan_type: ScanType,
	) -> Result<StartOutcome, TransportError> {
		debug!(%scan_type, target_count = targets.len(), "starting scan");
		let body: StartScanResponse = self
			.exchange(
				self.http
					.post(self.url("/start_scan"))
					.json(&StartScanRequest { targets, scan_type }),
			)
			.await?;
		Ok(StartOutcome {
			accepted: body.success,
			message: body.message,
		})
	}

	async fn poll(&self) -> Result<PollReport, TransportError> {
		let body: PollStatusResponse =
			self.exchange(self.http.get(self.url("/poll_status"))).await?;
		parse_report(body)
	}

	async fn approve(&self) -> Result<Ack, TransportError> {
		self.action("/approve_action").await
	}

	async fn deny(&self) -> Result<Ack, TransportError> {
		self.action("/deny_action").await
	}

	async fn kill(&self) -> Result<Ack, TransportError> {
		self.action("/kill_scan").await
	}

	async fn reset(&self) -> Result<Ack, TransportError> {
		self.action("/reset_scan").await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_is_normalized() {
		let transport =
			HttpScanTransport::new("http://127.0.0.1:5000/", Duration::from_secs(5));
		assert_eq!(transport.url("/poll_status"), "http://127.0.0.1:5000/poll_status");
	}

	#[test]
	fn start_request_serializes_wire_shape() {
		let targets = vec!["https://example.com".to_string()];
		let request = StartScanRequest {
			targets: &targets,
			scan_type: ScanType::Web,
		};
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"targets": ["https://example.com"],
				"scan_type": "web",
			})
		);
	}

	#[test]
	fn poll_body_parses_into_report() {
		let body: PollStatusResponse = serde_json::from_str(
			r#"{
				"status": "NEEDS_APPROVAL",
				"logs": [{"timestamp": "2025-06-01T12:00:00Z", "message": "[ALERT] gated"}],
				"pending_action": "drop table users"
			}"#,
		)
		.unwrap();
		let report = parse_report(body).unwrap();
		assert_eq!(report.status, SessionStatus::NeedsApproval);
		assert_eq!(report.pending_action.as_deref(), Some("drop table users"));
		assert_eq!(report.logs.len(), 1);
		assert!(report.report_type.is_none());
	}

	#[test]
	fn poll_body_parses_completion_report_type() {
		let body: PollStatusResponse = serde_json::from_str(
			r#"{"status": "COMPLETED", "logs": [], "report_type": "sql_injection"}"#,
		)
		.unwrap();
		let report = parse_report(body).unwrap();
		assert_eq!(report.status, SessionStatus::Completed);
		assert_eq!(report.report_type, Some(ReportType::SqlInjection));
	}

	#[test]
	fn unknown_status_is_malformed_body() {
		let body: PollStatusResponse =
			serde_json::from_str(r#"{"status": "EXPLODED", "logs": []}"#).unwrap();
		let err = parse_report(body).unwrap_err();
		assert!(matches!(err, TransportError::MalformedBody(_)));
	}

	#[test]
	fn unknown_report_type_is_malformed_body() {
		let body: PollStatusResponse = serde_json::from_str(
			r#"{"status": "COMPLETED", "logs": [], "report_type": "ransomware"}"#,
		)
		.unwrap();
		let err = parse_report(body).unwrap_err();
		assert!(matches!(err, TransportError::MalformedBody(_)));
	}

	#[test]
	fn missing_optional_fields_default() {
		let body: PollStatusResponse = serde_json::from_str(r#"{"status": "RUNNING"}"#).unwrap();
		let report = parse_report(body).unwrap();
		assert_eq!(report.status, SessionStatus::Running);
		assert!(report.logs.is_empty());
		assert!(report.pending_action.is_none());
	}
}
