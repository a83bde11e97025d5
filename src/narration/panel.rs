use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use chrono::{DateTime, Local};
use log::{info, warn};

use crate::core::params::PhysicsParams;
use crate::error::NarrationError;
use crate::narration::{TextGenerator, build_prompt};

#[derive(Clone, Debug, PartialEq)]
pub enum NarrationStatus {
    Idle,
    Pending {
        requested_at: DateTime<Local>,
    },
    Ready {
        text: String,
        received_at: DateTime<Local>,
    },
    Failed {
        message: String,
        received_at: DateTime<Local>,
    },
}

/// At most one request in flight; `poll` never blocks.
pub struct NarrationPanel {
    generator: Arc<dyn TextGenerator>,
    status: NarrationStatus,
    inbox: Option<Receiver<Result<String, NarrationError>>>,
}

impl NarrationPanel {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            status: NarrationStatus::Idle,
            inbox: None,
        }
    }

    pub fn status(&self) -> &NarrationStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, NarrationStatus::Pending { .. })
    }

    /// Starts a request for `params`. Returns false, and does nothing, while
    /// another request is still pending.
    pub fn request(&mut self, params: PhysicsParams) -> bool {
        if self.is_pending() {
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let generator = Arc::clone(&self.generator);
        let prompt = build_prompt(&params);
        let spawned = thread::Builder::new()
            .name("narration".to_string())
            .spawn(move || {
                // The panel may be gone by now; nobody is left to tell.
                let _ = tx.send(generator.generate(&prompt));
            });

        match spawned {
            Ok(_) => {
                self.inbox = Some(rx);
                self.status = NarrationStatus::Pending {
                    requested_at: Local::now(),
                };
                true
            }
            Err(err) => {
                warn!("could not start narration worker: {err}");
                self.status = NarrationStatus::Failed {
                    message: NarrationError::Transport(err.to_string()).to_string(),
                    received_at: Local::now(),
                };
                false
            }
        }
    }

    /// Picks up a finished request. Returns true when the status changed.
    pub fn poll(&mut self) -> bool {
        let Some(inbox) = self.inbox.as_ref() else {
            return false;
        };

        let result = match inbox.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(NarrationError::WorkerGone),
        };
        self.inbox = None;

        let received_at = Local::now();
        self.status = match result {
            Ok(text) => {
                info!("narration received ({} chars)", text.len());
                NarrationStatus::Ready { text, received_at }
            }
            Err(err) => {
                warn!("narration failed: {err}");
                NarrationStatus::Failed {
                    message: err.to_string(),
                    received_at,
                }
            }
        };
        true
    }

    /// Clears a finished result. A pending request is left alone.
    pub fn dismiss(&mut self) {
        if !self.is_pending() {
            self.status = NarrationStatus::Idle;
        }
    }
}
