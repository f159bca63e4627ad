// SPDX-License-Identifier: GPL-3.0-only

//! Ordered button collections, one per screen mode

use super::button::Button;
use super::geom::Point;
use crate::app::Action;
use crate::backends::{BackendResult, Display};

/// Outcome of routing a tap through a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A button with an action was hit
    Action(Action),
    /// A passive button swallowed the tap
    Consumed,
    /// The tap landed outside every button
    Ignored,
}

/// Buttons in declaration order plus the slots reused by the busy indicator
#[derive(Debug, Clone, Default)]
pub struct Screen {
    buttons: Vec<Button>,
    busy_label: Option<usize>,
    busy_spinner: Option<usize>,
}

impl Screen {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            busy_label: None,
            busy_spinner: None,
        }
    }

    /// Mark the buttons that host the busy label and spinner frames
    pub fn with_busy_slots(mut self, label: usize, spinner: usize) -> Self {
        self.busy_label = Some(label);
        self.busy_spinner = Some(spinner);
        self
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut Button> {
        self.buttons.get_mut(index)
    }

    /// Indices of the busy label and spinner buttons, if the screen has them
    pub fn busy_slots(&self) -> Option<(usize, usize)> {
        self.busy_label.zip(self.busy_spinner)
    }

    /// Route a tap to the first button that contains it
    ///
    /// Earlier buttons win over later ones where they overlap.
    pub fn dispatch(&self, point: Point) -> Dispatch {
        match self.buttons.iter().find(|b| b.hit_test(point)) {
            Some(button) => match button.action() {
                Some(action) => Dispatch::Action(action),
                None => Dispatch::Consumed,
            },
            None => Dispatch::Ignored,
        }
    }

    /// Draw every button in declaration order
    pub fn draw(&self, display: &mut dyn Display) -> BackendResult<()> {
        for button in &self.buttons {
            button.draw(display)?;
        }
        Ok(())
    }
}
