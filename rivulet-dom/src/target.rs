// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Locations that fetched content is rendered into.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of one rendering into a target.
///
/// Every delivery a binding renders gets a fresh placement, so a target can
/// tell which writer placed its current content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement(u64);

impl Placement {
    /// A placement no other rendering has used.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// An ordered document location.
pub trait InsertionTarget<U>: Send + Sync + 'static {
    /// Remove all existing content.
    fn clear(&self);

    /// Append `units` in order, recording `placement` as the latest writer.
    fn insert(&self, placement: Placement, units: Vec<U>);

    /// Remove the content of `placement` if it is still the latest writer.
    ///
    /// Content placed by any later rendering must be left untouched.
    fn retract(&self, placement: Placement);

    /// Clear, then insert.
    fn replace(&self, placement: Placement, units: Vec<U>) {
        self.clear();
        self.insert(placement, units);
    }
}

impl<U, T: InsertionTarget<U> + ?Sized> InsertionTarget<U> for Arc<T> {
    fn clear(&self) {
        (**self).clear();
    }

    fn insert(&self, placement: Placement, units: Vec<U>) {
        (**self).insert(placement, units);
    }

    fn retract(&self, placement: Placement) {
        (**self).retract(placement);
    }

    fn replace(&self, placement: Placement, units: Vec<U>) {
        (**self).replace(placement, units);
    }
}

struct RegionState<U> {
    latest: Option<Placement>,
    units: Vec<U>,
}

/// In-memory insertion target holding an ordered list of units.
///
/// Clones share the same contents.
pub struct Region<U> {
    state: Arc<Mutex<RegionState<U>>>,
}

impl<U: Send + 'static> Region<U> {
    pub fn new() -> Self {
        Self::with_contents(Vec::new())
    }

    /// A region with pre-existing content that no placement owns.
    pub fn with_contents(units: Vec<U>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RegionState {
                latest: None,
                units,
            })),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().units.is_empty()
    }

    /// The placement that wrote the current content, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Placement> {
        self.state.lock().latest
    }
}

impl<U: Clone + Send + 'static> Region<U> {
    #[must_use]
    pub fn contents(&self) -> Vec<U> {
        self.state.lock().units.clone()
    }
}

impl<U: Send + 'static> Default for Region<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for Region<U> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<U: Send + 'static> InsertionTarget<U> for Region<U> {
    fn clear(&self) {
        let mut state = self.state.lock();
        state.units.clear();
        state.latest = None;
    }

    fn insert(&self, placement: Placement, units: Vec<U>) {
        let mut state = self.state.lock();
        state.units.extend(units);
        state.latest = Some(placement);
    }

    fn retract(&self, placement: Placement) {
        let mut state = self.state.lock();
        if state.latest == Some(placement) {
            state.units.clear();
            state.latest = None;
        }
    }

    fn replace(&self, placement: Placement, units: Vec<U>) {
        let mut state = self.state.lock();
        state.units = units;
        state.latest = Some(placement);
    }
}
