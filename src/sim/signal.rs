//! Observable values and queued change notifications
//!
//! A [`Signal`] holds one value and only reports a change when the value is
//! actually different, so re-setting the same phase or tier never triggers
//! a handler twice. Changes are queued as [`Control`] messages and handled
//! after the current callback finishes, never re-entrantly.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::GamePhase;
use crate::settings::Difficulty;

/// A value with change tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal<T> {
    value: T,
}

impl<T: Copy + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Store a value. Returns true if it differs from the current one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

/// A pending handler call for an external signal change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Phase(GamePhase),
    Difficulty(Difficulty),
}

/// FIFO of pending control messages
#[derive(Debug, Clone, Default)]
pub struct ControlQueue {
    pending: VecDeque<Control>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, control: Control) {
        self.pending.push_back(control);
    }

    pub fn pop(&mut self) -> Option<Control> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
