// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The cancellable periodic poll task.
//!
//! Armed exactly when a start request is accepted; disarmed when the
//! session reaches a terminal status or is reset. Each tick performs one
//! poll, awaited inline, so polls never overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::controller::ControllerInner;

/// Cooperative cancellation flag shared between the controller and the
/// poll loop. Checked before a poll is issued and again before its result
/// is applied, so an in-flight poll resolving after disarm is dropped.
#[derive(Clone)]
pub(crate) struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	pub(crate) fn new() -> Self {
		Self {
			cancelled: Arc::new(AtomicBool::new(false)),
		}
	}

	pub(crate) fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	pub(crate) fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

/// Handle to an armed poll loop.
pub(crate) struct PollTask {
	handle: JoinHandle<()>,
	token: CancellationToken,
	shutdown_tx: broadcast::Sender<()>,
}

impl PollTask {
	/// Stops the loop immediately: no further ticks fire and any in-flight
	/// poll result is discarded.
	pub(crate) fn disarm(self) {
		self.token.cancel();
		let _ = self.shutdown_tx.send(());
		self.handle.abort();
	}
}

/// Spawns the poll loop for `inner`, returning its handle.
pub(crate) fn arm(inner: Arc<ControllerInner>) -> PollTask {
	let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
	let token = CancellationToken::new();
	let loop_token = token.clone();

	let handle = tokio::spawn(async move {
		let mut ticker = tokio::time::interval(inner.config.poll_interval);
		// A slow poll delays the next tick instead of causing a burst.
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			tokio::select! {
				_ = ticker.tick() => {
					if loop_token.is_cancelled() {
						break;
					}
					if !inner.poll_once(&loop_token).await {
						break;
					}
				}
				_ = shutdown_rx.recv() => {
					debug!("poll loop disarmed");
					break;
				}
			}
		}
	});

	PollTask {
		handle,
		token,
		shutdown_tx,
	}
}
