// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the scan session client.

use std::time::Duration;

/// Configuration for a [`crate::ScanController`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Cadence of the poll loop while a scan is active.
	pub poll_interval: Duration,
	/// Timeout applied to each HTTP exchange so no operation hangs
	/// indefinitely.
	pub request_timeout: Duration,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			poll_interval: Duration::from_secs(1),
			request_timeout: Duration::from_secs(10),
		}
	}
}
