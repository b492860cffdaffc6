//! State bridge: forwards orchestrator snapshots into the action loop.
//!
//! One bridge runs per mounted validator. It ends when cancelled or when
//! the orchestrator (the watch sender) goes away.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use passmeter_core::OrchestratorState;

use crate::action::Action;

pub fn spawn_state_bridge(
    mut state_rx: watch::Receiver<OrchestratorState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = Arc::new(state_rx.borrow_and_update().clone());
                    if action_tx.send(Action::ValidationUpdated(snapshot)).is_err() {
                        break;
                    }
                }
            }
        }
        debug!("state bridge stopped");
    });
}
