// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the screen-mode state machine

mod common;

use common::{booth, preview_profile};
use photobooth::app::screens::EFFECT_LABEL_SLOT;
use photobooth::backends::input::ScriptedInput;
use photobooth::settings::SettingsStore;
use photobooth::{Action, ScreenMode, ViewTarget};

#[test]
fn test_starts_in_viewfinder_with_preview_profile() {
    let b = booth(ScriptedInput::new());
    assert_eq!(b.app.mode(), ScreenMode::VIEWFINDER);
    assert_eq!(b.app.settings_mode(), ScreenMode::EFFECT_SETTINGS);
    assert_eq!(b.camera.lock().unwrap().profile(), preview_profile());
    assert!(!b.app.capture_state().is_busy());
}

#[test]
fn test_settings_navigation_wraps_both_ways() {
    let mut b = booth(ScriptedInput::new());
    b.app.handle_action(Action::View(ViewTarget::Settings)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::EFFECT_SETTINGS);

    b.app.handle_action(Action::SettingNav(1)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::QUIT_CONFIRM);
    b.app.handle_action(Action::SettingNav(1)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::EFFECT_SETTINGS, "next wraps to the first settings page");
    b.app.handle_action(Action::SettingNav(-1)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::QUIT_CONFIRM, "prev wraps to the last settings page");
}

#[test]
fn test_done_remembers_settings_page() {
    let mut b = booth(ScriptedInput::new());
    b.app.handle_action(Action::View(ViewTarget::Settings)).unwrap();
    b.app.handle_action(Action::SettingNav(1)).unwrap();
    b.app.handle_action(Action::Done).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::VIEWFINDER);

    b.app.handle_action(Action::View(ViewTarget::Settings)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::QUIT_CONFIRM);
}

#[test]
fn test_effect_cycle_returns_to_start() {
    let mut b = booth(ScriptedInput::new());
    for _ in 0..17 {
        b.app.handle_action(Action::EffectNav(1)).unwrap();
    }
    assert_eq!(b.app.effect(), 0);
    assert_eq!(b.camera.lock().unwrap().effects.last().map(String::as_str), Some("none"));

    b.app.handle_action(Action::EffectNav(-1)).unwrap();
    assert_eq!(b.app.effect(), 16);
    let label = b.app.screens()[ScreenMode::EFFECT_SETTINGS.index()]
        .button(EFFECT_LABEL_SLOT)
        .and_then(|button| button.background())
        .map(|icon| icon.name.clone());
    assert_eq!(label.as_deref(), Some("fx-solarize"));
}

#[test]
fn test_done_from_settings_persists_effect() {
    let mut b = booth(ScriptedInput::new());
    b.app.handle_action(Action::View(ViewTarget::Settings)).unwrap();
    b.app.handle_action(Action::EffectNav(1)).unwrap();
    b.app.handle_action(Action::Done).unwrap();

    let stored = SettingsStore::new(b.app.config().settings_path.clone()).load();
    assert_eq!(stored.map(|s| s.effect), Some(1));
}

#[test]
fn test_stored_effect_is_restored_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path());
    std::fs::write(&config.settings_path, r#"{"fx": 7}"#).unwrap();

    let b = common::booth_with(dir, config, ScriptedInput::new());
    assert_eq!(b.app.effect(), 7);
    assert_eq!(b.camera.lock().unwrap().effects, vec!["negative".to_string()]);
}

#[test]
fn test_out_of_range_stored_effect_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path());
    std::fs::write(&config.settings_path, r#"{"fx": 40}"#).unwrap();

    let b = common::booth_with(dir, config, ScriptedInput::new());
    assert_eq!(b.app.effect(), 0);
    assert!(b.camera.lock().unwrap().effects.is_empty());
}

#[test]
fn test_quit_saves_settings_and_stops() {
    let mut b = booth(ScriptedInput::new());
    b.app.handle_action(Action::EffectNav(1)).unwrap();
    b.app.handle_action(Action::EffectNav(1)).unwrap();
    b.app.handle_action(Action::Quit).unwrap();

    assert!(!b.app.is_running());
    let stored = SettingsStore::new(b.app.config().settings_path.clone()).load();
    assert_eq!(stored.map(|s| s.effect), Some(2));
}

#[test]
fn test_run_loop_taps_through_to_quit() {
    let input = ScriptedInput::new()
        .tap(10, 200) // gear
        .tap(250, 10) // next settings page
        .tap(160, 120); // confirm quit
    let mut b = booth(input);
    b.app.run().unwrap();

    assert_eq!(b.app.mode(), ScreenMode::QUIT_CONFIRM);
    assert!(!b.app.is_running());
    assert!(b.app.config().settings_path.exists());
    // One frame per settings page
    assert_eq!(b.display.lock().unwrap().presented(), 2);
}

#[test]
fn test_run_loop_stops_on_interrupt() {
    let mut b = booth(ScriptedInput::new().idle().idle());
    b.app.run().unwrap();

    assert!(!b.app.is_running());
    assert_eq!(b.camera.lock().unwrap().preview_frames, 2);
    assert!(b.app.config().settings_path.exists());
}

#[test]
fn test_empty_gallery_any_tap_returns_to_viewfinder() {
    let mut b = booth(ScriptedInput::new().tap(160, 90));
    b.app.handle_action(Action::View(ViewTarget::Playback)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::EMPTY_GALLERY);

    b.app.run().unwrap();
    assert_eq!(b.app.mode(), ScreenMode::VIEWFINDER);
}

#[test]
fn test_passive_banner_consumes_tap() {
    let mut b = booth(ScriptedInput::new().tap(160, 50));
    b.app.handle_action(Action::ImageNav(0)).unwrap();
    assert_eq!(b.app.mode(), ScreenMode::DELETE_CONFIRM);

    b.app.run().unwrap();
    assert_eq!(b.app.mode(), ScreenMode::DELETE_CONFIRM);
}
