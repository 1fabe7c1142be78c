//! Session driver: one calculator, one client, one history list.
//!
//! The state machine performs no I/O of its own; this layer forwards each
//! [`Dispatch`] to the evaluation service and folds the outcome back in,
//! converting client errors to the display messages the keypad shows.
//! Persisting returned history entries happens here too, so every settled
//! calculation survives a restart.

use abacus_api::ApiClient;
use abacus_core::{Calculator, Dispatch, EvalTicket, Key};
use abacus_history::{History, KvStore};
use tracing::debug;

pub struct Session<S> {
    calculator: Calculator,
    client: ApiClient,
    history: History<S>,
}

impl<S: KvStore> Session<S> {
    pub fn new(client: ApiClient, history: History<S>) -> Self {
        Self {
            calculator: Calculator::new(),
            client,
            history,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Mutable access for mode and unit changes; key presses go through
    /// [`press`](Self::press) so dispatches are never dropped.
    pub fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// The shared client; clones are cheap and reuse the connection pool.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Apply a key press. The returned request must be dispatched and its
    /// outcome fed back through [`settle`](Self::settle).
    pub fn press(&mut self, key: Key) -> Option<Dispatch> {
        self.calculator.press(key)
    }

    /// Fold an evaluation outcome back in and persist any history entry.
    pub fn settle(&mut self, ticket: EvalTicket, outcome: abacus_api::Result<f64>) {
        let outcome = outcome.map_err(|err| err.to_string());
        if let Some(entry) = self.calculator.settle(ticket, outcome) {
            debug!(%entry, "appending history entry");
            self.history.append(entry);
        }
    }

    /// Press and, when the press dispatches, evaluate inline.
    ///
    /// The interactive loop spawns dispatches to keep the UI responsive;
    /// this sequential form drives tests and scripted sessions.
    pub async fn press_and_settle(&mut self, key: Key) {
        if let Some(dispatch) = self.press(key) {
            let outcome = self.client.evaluate(&dispatch.request).await;
            self.settle(dispatch.ticket, outcome);
        }
    }

    /// Recall the history entry at `index` (oldest-first) into the display.
    pub fn recall(&mut self, index: usize) {
        let Some(entry) = self.history.entries().get(index).cloned() else {
            return;
        };
        self.calculator.recall(&entry);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
