//! Bounded command buffer: forced flush to insert mode.

mod common;

use common::Harness;
use core_config::Config;
use core_events::KeyCode;
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn fifteen_pending_characters_flush_to_insert() {
    let mut h = Harness::command();
    h.type_str(&"1".repeat(14));
    assert_eq!(h.buffer().len(), 14);
    assert_eq!(h.mode(), Mode::Command);

    h.type_str("1");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.buffer(), "");
    assert!(h.taps().is_empty());
    assert!(h.ops().contains(&core_actions::HostOp::Layer(0)));
}

#[test]
fn flush_drops_selection_and_keeps_saved_command() {
    let mut h = Harness::command();
    h.type_str("iq");
    h.tap(KeyCode::VIM_ESC);
    h.type_str("v");
    h.type_str(&";".repeat(15));
    assert_eq!(h.mode(), Mode::Insert);
    assert!(!h.visual());
    assert_eq!(h.engine.state().saved.to_string(), "i");

    h.tap(KeyCode::VIM_ESC);
    h.clear();
    h.type_str(".");
    assert_eq!(h.taps(), vec![common::plain(KeyCode::Q)]);
}

#[test]
fn command_capacity_comes_from_config() {
    let mut config = Config::default();
    config.file.buffers.command_capacity = 4;
    let mut h = Harness::with_config(config);
    h.tap(KeyCode::VIM_ESC);
    h.type_str("d0");
    assert_eq!(h.mode(), Mode::Command);
    h.type_str("0");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.buffer(), "");
}

#[test]
fn keys_outside_the_alphabet_are_swallowed() {
    let mut h = Harness::command();
    h.type_str("d");
    for code in [KeyCode::F, KeyCode::COMMA, KeyCode::LEFT, KeyCode::TAB] {
        assert!(h.tap(code), "{code}");
    }
    assert_eq!(h.buffer(), "d");
    assert!(h.ops().is_empty());
}
