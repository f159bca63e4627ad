// SPDX-License-Identifier: GPL-3.0-only

//! Screen tables
//!
//! Each screen is described twice: a layout table (bounds and icon names)
//! and a behaviour table (one optional action per layout slot). The two
//! are zipped and bound against the icon registry once at startup.

use super::state::{Action, ScreenMode, ViewTarget};
use crate::ui::{Button, IconRegistry, Rect, Screen};
use tracing::{debug, warn};

/// Button placement and decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub rect: Rect,
    pub bg: Option<&'static str>,
    pub fg: Option<&'static str>,
}

impl Slot {
    const fn at(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            bg: None,
            fg: None,
        }
    }

    const fn bg(mut self, name: &'static str) -> Self {
        self.bg = Some(name);
        self
    }

    const fn fg(mut self, name: &'static str) -> Self {
        self.fg = Some(name);
        self
    }
}

/// Layout and behaviour for one screen mode
pub struct ScreenSpec {
    pub layout: &'static [Slot],
    pub actions: &'static [Option<Action>],
    /// Indices of the busy label and spinner slots
    pub busy_slots: Option<(usize, usize)>,
}

const DONE: Slot = Slot::at(0, 188, 320, 52).bg("done");
const PREV: Slot = Slot::at(0, 0, 80, 52).bg("prev");
const NEXT: Slot = Slot::at(240, 0, 80, 52).bg("next");

const PLAYBACK_LAYOUT: &[Slot] = &[
    DONE,
    PREV,
    NEXT,
    Slot::at(88, 70, 157, 102),
    Slot::at(148, 129, 22, 22),
    Slot::at(121, 0, 78, 52).bg("trash"),
];
const PLAYBACK_ACTIONS: &[Option<Action>] = &[
    Some(Action::Done),
    Some(Action::ImageNav(-1)),
    Some(Action::ImageNav(1)),
    None,
    None,
    Some(Action::ImageNav(0)),
];

const DELETE_LAYOUT: &[Slot] = &[
    Slot::at(0, 35, 320, 33).bg("delete"),
    Slot::at(32, 86, 120, 100).bg("yn").fg("yes"),
    Slot::at(168, 86, 120, 100).bg("yn").fg("no"),
];
const DELETE_ACTIONS: &[Option<Action>] = &[
    None,
    Some(Action::Delete(true)),
    Some(Action::Delete(false)),
];

const EMPTY_LAYOUT: &[Slot] = &[
    Slot::at(0, 0, 320, 240),
    Slot::at(0, 188, 320, 52).bg("done"),
    Slot::at(0, 53, 320, 80).bg("empty"),
];
const EMPTY_ACTIONS: &[Option<Action>] = &[Some(Action::Done), None, None];

const VIEWFINDER_LAYOUT: &[Slot] = &[
    Slot::at(0, 188, 156, 52).bg("gear"),
    Slot::at(164, 188, 156, 52).bg("play"),
    Slot::at(0, 0, 320, 240),
    Slot::at(88, 51, 157, 102),
    Slot::at(148, 110, 22, 22),
];
const VIEWFINDER_ACTIONS: &[Option<Action>] = &[
    Some(Action::View(ViewTarget::Settings)),
    Some(Action::View(ViewTarget::Playback)),
    Some(Action::View(ViewTarget::Shutter)),
    None,
    None,
];

const EFFECT_LAYOUT: &[Slot] = &[
    DONE,
    PREV,
    NEXT,
    Slot::at(0, 70, 80, 52).bg("prev"),
    Slot::at(240, 70, 80, 52).bg("next"),
    Slot::at(0, 67, 320, 91).bg("fx-none"),
    Slot::at(0, 11, 320, 29).bg("fx"),
];
const EFFECT_ACTIONS: &[Option<Action>] = &[
    Some(Action::Done),
    Some(Action::SettingNav(-1)),
    Some(Action::SettingNav(1)),
    Some(Action::EffectNav(-1)),
    Some(Action::EffectNav(1)),
    None,
    None,
];

/// Button on the effect settings page that shows the current effect
pub const EFFECT_LABEL_SLOT: usize = 5;

const QUIT_LAYOUT: &[Slot] = &[
    DONE,
    PREV,
    NEXT,
    Slot::at(110, 60, 100, 120).bg("quit-ok"),
    Slot::at(0, 10, 320, 35).bg("quit"),
];
const QUIT_ACTIONS: &[Option<Action>] = &[
    Some(Action::Done),
    Some(Action::SettingNav(-1)),
    Some(Action::SettingNav(1)),
    Some(Action::Quit),
    None,
];

/// Screen table indexed by [`ScreenMode`]
pub const SCREENS: &[ScreenSpec] = &[
    ScreenSpec {
        layout: PLAYBACK_LAYOUT,
        actions: PLAYBACK_ACTIONS,
        busy_slots: Some((3, 4)),
    },
    ScreenSpec {
        layout: DELETE_LAYOUT,
        actions: DELETE_ACTIONS,
        busy_slots: None,
    },
    ScreenSpec {
        layout: EMPTY_LAYOUT,
        actions: EMPTY_ACTIONS,
        busy_slots: None,
    },
    ScreenSpec {
        layout: VIEWFINDER_LAYOUT,
        actions: VIEWFINDER_ACTIONS,
        busy_slots: Some((3, 4)),
    },
    ScreenSpec {
        layout: EFFECT_LAYOUT,
        actions: EFFECT_ACTIONS,
        busy_slots: None,
    },
    ScreenSpec {
        layout: QUIT_LAYOUT,
        actions: QUIT_ACTIONS,
        busy_slots: None,
    },
];

/// Highest configured mode
pub fn last_mode() -> ScreenMode {
    ScreenMode(SCREENS.len() - 1)
}

/// Compose layouts and behaviours and resolve icon names
pub fn build(icons: &IconRegistry) -> Vec<Screen> {
    SCREENS
        .iter()
        .enumerate()
        .map(|(mode, spec)| {
            if spec.layout.len() != spec.actions.len() {
                warn!(
                    mode,
                    slots = spec.layout.len(),
                    actions = spec.actions.len(),
                    "Screen layout and behaviour tables differ in length"
                );
            }
            let buttons = spec
                .layout
                .iter()
                .enumerate()
                .map(|(i, slot)| bind(slot, spec.actions.get(i).copied().flatten(), icons))
                .collect();
            let screen = Screen::new(buttons);
            match spec.busy_slots {
                Some((label, spinner)) => screen.with_busy_slots(label, spinner),
                None => screen,
            }
        })
        .inspect(|screen| debug!(buttons = screen.buttons().len(), "Screen built"))
        .collect()
}

fn bind(slot: &Slot, action: Option<Action>, icons: &IconRegistry) -> Button {
    let mut button = Button::new(slot.rect);
    if let Some(action) = action {
        button = button.with_action(action);
    }
    for (name, is_bg) in [(slot.bg, true), (slot.fg, false)] {
        let Some(name) = name else { continue };
        if icons.get(name).is_none() {
            debug!(icon = name, "Icon not loaded, slot left undecorated");
        }
        if is_bg {
            button.set_background_icon(icons, Some(name));
        } else {
            button.set_foreground_icon(icons, Some(name));
        }
    }
    button
}
