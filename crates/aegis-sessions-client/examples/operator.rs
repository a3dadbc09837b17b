// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Example: drive one scan engagement against a running scan service.
//!
//! Run with:
//!   AEGIS_BASE_URL=http://127.0.0.1:5000 \
//!     cargo run --example operator -p aegis-sessions-client
//!
//! Any approval gate the agent opens is denied automatically. This
//! example observes; it does not authorize destructive actions.

use std::time::Duration;

use aegis_sessions_client::ScanController;
use aegis_sessions_core::{ScanType, SessionStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.init();

	let base_url =
		std::env::var("AEGIS_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
	let target =
		std::env::var("AEGIS_TARGET").unwrap_or_else(|_| "https://example.com".to_string());

	println!("Scan service: {}", base_url);
	println!("Target:       {}", target);

	let controller = ScanController::builder().base_url(&base_url).build()?;

	controller.start_scan(vec![target], ScanType::Web).await?;
	println!("Scan started, watching...");

	let mut printed_logs = 0;
	loop {
		tokio::time::sleep(Duration::from_secs(1)).await;
		let session = controller.snapshot().await;

		for entry in &session.logs[printed_logs.min(session.logs.len())..] {
			println!("  [{}] {}", entry.timestamp.to_rfc3339(), entry.message);
		}
		printed_logs = session.logs.len();

		if let Some(error) = &session.last_error {
			println!("  !! {}", error);
		}

		if let Some(action) = &session.pending_action {
			println!("Approval gate: agent requests `{}` -- denying", action);
			controller.deny().await?;
			continue;
		}

		if session.status.is_terminal() {
			println!("Scan finished: {}", session.status);
			if let Some(report_type) = session.report_type {
				println!("Report type:   {}", report_type);
			}
			break;
		}
	}

	if controller.status().await == SessionStatus::Terminated {
		println!("Session terminated; resetting.");
		controller.reset_session().await?;
	}

	Ok(())
}
