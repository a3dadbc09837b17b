// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client for the Aegis scan service: transport, poll scheduler, and the
//! operator-facing approval gate controller.
//!
//! The [`ScanController`] owns one scan engagement. It submits the scan,
//! polls the service on a fixed cadence while the scan is active, opens a
//! blocking approval gate when the remote agent requests a sensitive
//! action, and offers an emergency kill switch that terminates locally
//! even when the service is unreachable.
//!
//! ```ignore
//! use aegis_sessions_client::ScanController;
//! use aegis_sessions_core::ScanType;
//!
//! let controller = ScanController::builder()
//!     .base_url("http://127.0.0.1:5000")
//!     .build()?;
//!
//! controller
//!     .start_scan(vec!["https://example.com".into()], ScanType::Web)
//!     .await?;
//! ```

pub mod config;
pub mod controller;
pub mod error;
mod scheduler;
pub mod transport;

pub use config::ClientConfig;
pub use controller::{ScanController, ScanControllerBuilder};
pub use error::{ClientError, Result, TransportError};
pub use transport::{Ack, HttpScanTransport, ScanTransport, StartOutcome};
