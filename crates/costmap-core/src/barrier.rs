// crates/costmap-core/src/barrier.rs
//! # Join Barrier
//!
//! The boundary file and the table load independently and may finish in
//! either order. Whichever `offer_*` call completes the pair runs the join
//! and receives the dataset. A failed load latches the barrier into the
//! unavailable state so callers can show an explicit message instead of
//! waiting forever.

use crate::error::{CostMapError, Result};
use crate::model::{BoundaryFeature, CountryRecord, Dataset};
use log::{info, warn};
use std::sync::{Mutex, MutexGuard};

/// What an `offer_*` call produced.
#[derive(Debug)]
pub enum BarrierEvent {
    /// The other input has not arrived yet.
    Waiting,
    /// This call completed the pair; the join ran exactly once.
    Joined(Dataset),
    /// A load (this one or an earlier one) failed, or the join rejected
    /// the inputs.
    Unavailable(String),
    /// The join already ran; late offers are ignored.
    AlreadyJoined,
}

/// Observable state, for "loading…" / "data unavailable" displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarrierState {
    Waiting { boundaries: bool, rows: bool },
    Joined,
    Unavailable(String),
}

#[derive(Default)]
struct Slots {
    boundaries: Option<Vec<BoundaryFeature>>,
    rows: Option<Vec<CountryRecord>>,
    joined: bool,
    failure: Option<String>,
}

#[derive(Default)]
pub struct JoinBarrier {
    slots: Mutex<Slots>,
}

impl JoinBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn offer_boundaries(&self, loaded: Result<Vec<BoundaryFeature>>) -> BarrierEvent {
        self.offer(loaded, "boundaries", |s, v| s.boundaries = Some(v))
    }

    pub fn offer_rows(&self, loaded: Result<Vec<CountryRecord>>) -> BarrierEvent {
        self.offer(loaded, "table", |s, v| s.rows = Some(v))
    }

    fn offer<T>(
        &self,
        loaded: Result<T>,
        what: &str,
        store: impl FnOnce(&mut Slots, T),
    ) -> BarrierEvent {
        let mut slots = self.lock();
        if let Some(reason) = &slots.failure {
            return BarrierEvent::Unavailable(reason.clone());
        }
        if slots.joined {
            return BarrierEvent::AlreadyJoined;
        }

        match loaded {
            Ok(value) => {
                info!("{what} loaded");
                store(&mut *slots, value);
            }
            Err(e) => {
                let reason = format!("failed to load {what}: {e}");
                warn!("{reason}");
                slots.failure = Some(reason.clone());
                slots.boundaries = None;
                slots.rows = None;
                return BarrierEvent::Unavailable(reason);
            }
        }

        if slots.boundaries.is_none() || slots.rows.is_none() {
            return BarrierEvent::Waiting;
        }

        let features = slots.boundaries.take().unwrap_or_default();
        let rows = slots.rows.take().unwrap_or_default();
        slots.joined = true;
        match Dataset::from_parts(features, rows) {
            Ok(ds) => BarrierEvent::Joined(ds),
            Err(e) => {
                let reason = e.to_string();
                slots.failure = Some(reason.clone());
                BarrierEvent::Unavailable(reason)
            }
        }
    }

    pub fn state(&self) -> BarrierState {
        let slots = self.lock();
        if let Some(reason) = &slots.failure {
            BarrierState::Unavailable(reason.clone())
        } else if slots.joined {
            BarrierState::Joined
        } else {
            BarrierState::Waiting {
                boundaries: slots.boundaries.is_some(),
                rows: slots.rows.is_some(),
            }
        }
    }
}

impl BarrierEvent {
    /// Collapses the event into a `Result`, treating anything but a
    /// completed join as unavailable.
    pub fn into_dataset(self) -> Result<Dataset> {
        match self {
            BarrierEvent::Joined(ds) => Ok(ds),
            BarrierEvent::Unavailable(reason) => Err(CostMapError::Unavailable(reason)),
            BarrierEvent::Waiting => Err(CostMapError::Unavailable("still waiting for input".into())),
            BarrierEvent::AlreadyJoined => {
                Err(CostMapError::Unavailable("dataset was already handed out".into()))
            }
        }
    }
}
