// SPDX-License-Identifier: GPL-3.0-only

//! Touch input events

use super::BackendResult;
use crate::ui::Point;
use std::collections::VecDeque;
use std::time::Duration;

/// Input event delivered to the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Touch down at a framebuffer position
    Tap(Point),
    /// External request to shut down (e.g. Ctrl+C in the terminal runtime)
    Interrupt,
}

/// Source of touch events
pub trait InputSource {
    /// Return pending events, waiting at most `timeout` for the first one
    fn poll(&mut self, timeout: Duration) -> BackendResult<Vec<InputEvent>>;
}

/// Pre-recorded input, one batch per poll
///
/// Once the script runs dry every poll reports an interrupt so the
/// main loop always terminates.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single tap as its own poll batch
    pub fn tap(mut self, x: i32, y: i32) -> Self {
        self.batches.push_back(vec![InputEvent::Tap(Point::new(x, y))]);
        self
    }

    /// Queue an empty poll (a loop iteration with no input)
    pub fn idle(mut self) -> Self {
        self.batches.push_back(Vec::new());
        self
    }

    /// Queue an arbitrary batch
    pub fn batch(mut self, events: Vec<InputEvent>) -> Self {
        self.batches.push_back(events);
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> BackendResult<Vec<InputEvent>> {
        Ok(self
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Interrupt]))
    }
}
