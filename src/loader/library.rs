use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::foundation::error::{LoadError, StillreelResult};

/// Lifecycle of the external encoder.
///
/// Transitions only move forward: `Idle -> Loading -> Loaded | Failed`. Both terminal states are
/// kept for the loader's lifetime; a failed load is never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(LoadError),
}

type LoadOutcome = Result<(), LoadError>;

#[derive(Debug)]
struct Inner {
    state: LoadState,
    waiters: Vec<Sender<LoadOutcome>>,
    loads_issued: usize,
}

/// Loads the encoder at most once and fans the outcome out to every caller.
///
/// Each caller gets its own result channel. Waiters registered while a load is in flight are
/// served in registration order once it settles; a waiter that stopped listening is skipped
/// without affecting the rest.
#[derive(Debug)]
pub struct LibraryLoader {
    inner: Mutex<Inner>,
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryLoader {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: LoadState::Idle,
                waiters: Vec::new(),
                loads_issued: 0,
            }),
        }
    }

    pub fn state(&self) -> LoadState {
        self.lock().state.clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.lock().state, LoadState::Loaded)
    }

    /// Number of times a load was actually started.
    pub fn loads_issued(&self) -> usize {
        self.lock().loads_issued
    }

    /// Register interest in the load outcome.
    ///
    /// If nothing has been started yet, `load` runs on the calling thread before this returns.
    /// Otherwise `load` is dropped unused and the returned channel is served by whoever owns the
    /// in-flight load (or immediately, if the load already settled).
    pub fn request<F>(&self, load: F) -> Receiver<LoadOutcome>
    where
        F: FnOnce() -> StillreelResult<()>,
    {
        let (tx, rx) = mpsc::channel();
        let issue = {
            let mut inner = self.lock();
            match &inner.state {
                LoadState::Loaded => {
                    let _ = tx.send(Ok(()));
                    false
                }
                LoadState::Failed(err) => {
                    let _ = tx.send(Err(err.clone()));
                    false
                }
                LoadState::Loading => {
                    inner.waiters.push(tx);
                    false
                }
                LoadState::Idle => {
                    inner.state = LoadState::Loading;
                    inner.loads_issued += 1;
                    inner.waiters.push(tx);
                    true
                }
            }
        };

        if issue {
            tracing::debug!("encoder load started");
            let mut unwind = SettleOnUnwind {
                loader: self,
                armed: true,
            };
            let outcome = load().map_err(LoadError::failed);
            unwind.armed = false;
            self.settle(outcome);
        }
        rx
    }

    /// Block until the encoder is loaded, starting the load if needed.
    pub fn ensure_loaded<F>(&self, load: F) -> Result<(), LoadError>
    where
        F: FnOnce() -> StillreelResult<()>,
    {
        self.request(load)
            .recv()
            .unwrap_or(Err(LoadError::Abandoned))
    }

    fn settle(&self, outcome: LoadOutcome) {
        let waiters = {
            let mut inner = self.lock();
            inner.state = match &outcome {
                Ok(()) => LoadState::Loaded,
                Err(err) => LoadState::Failed(err.clone()),
            };
            std::mem::take(&mut inner.waiters)
        };

        match &outcome {
            Ok(()) => tracing::info!(waiters = waiters.len(), "encoder loaded"),
            Err(err) => tracing::error!(waiters = waiters.len(), %err, "encoder load failed"),
        }

        for tx in waiters {
            if tx.send(outcome.clone()).is_err() {
                tracing::debug!("load waiter went away before settlement");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles the loader as abandoned if the load closure unwinds, so queued waiters are released.
struct SettleOnUnwind<'a> {
    loader: &'a LibraryLoader,
    armed: bool,
}

impl Drop for SettleOnUnwind<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.loader.settle(Err(LoadError::Abandoned));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/library.rs"]
mod tests;
