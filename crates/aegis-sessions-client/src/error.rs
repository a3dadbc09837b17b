// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the scan session client.

use aegis_sessions_core::SessionsError;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A failed exchange with the scan service.
///
/// Every transport operation resolves to either a parsed response or one of
/// these values; raw `reqwest` errors never cross the component boundary.
#[derive(Debug, Error)]
pub enum TransportError {
	/// The request never produced a response (connection refused, DNS
	/// failure, timeout).
	#[error("scan service unreachable: {0}")]
	Unreachable(String),

	/// The service answered with a non-2xx HTTP status.
	#[error("scan service returned HTTP status {0}")]
	BadStatus(u16),

	/// The body did not parse as the expected shape, or carried an unknown
	/// enum value.
	#[error("malformed response body: {0}")]
	MalformedBody(String),
}

/// Errors surfaced to the operator-facing caller.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error(transparent)]
	Transport(#[from] TransportError),

	#[error(transparent)]
	Session(#[from] SessionsError),

	/// The scan service declined to start the scan.
	#[error("scan service rejected start request: {0}")]
	StartRejected(String),

	/// The scan service answered `success: false` for an operator action.
	#[error("scan service refused {0}")]
	Refused(&'static str),

	/// Builder misuse: neither a base URL nor a transport was supplied.
	#[error("base URL is required")]
	MissingBaseUrl,
}
