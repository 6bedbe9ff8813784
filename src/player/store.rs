// SPDX-License-Identifier: MPL-2.0
//! Playback state store: one [`PlayerState`], merged and broadcast.
//!
//! The store holds no playback logic. Every write goes through
//! [`PlaybackStore::apply`], which merges a whole [`StateUpdate`] before any
//! listener runs, so readers never observe a half-applied update.

use crate::domain::video::{PlayerState, StateUpdate};
use std::fmt;

/// Callback invoked with the new state after every effective change.
pub type Listener = Box<dyn FnMut(&PlayerState)>;

/// Handle returned by [`PlaybackStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct PlaybackStore {
    state: PlayerState,
    revision: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl PlaybackStore {
    #[must_use]
    pub fn new(initial: PlayerState) -> Self {
        Self {
            state: initial,
            revision: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn get(&self) -> &PlayerState {
        &self.state
    }

    /// Incremented once per effective change; renderers compare it to skip
    /// redundant redraws.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merges `update` and notifies listeners if anything changed.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        if !update.merge_into(&mut self.state) {
            return false;
        }
        self.revision += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        true
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
