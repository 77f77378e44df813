//! Insert entry, insertion recording and `.` replay.

mod common;

use common::{Harness, ctrl, ctrl_shift, plain, shift};
use core_config::Config;
use core_events::KeyCode;
use core_state::Mode;
use pretty_assertions::assert_eq;

fn escape(h: &mut Harness) {
    h.tap(KeyCode::VIM_ESC);
    assert_eq!(h.mode(), Mode::Command);
}

#[test]
fn insert_then_repeat_replays_typed_keys() {
    let mut h = Harness::command();
    h.type_str("i");
    assert_eq!(h.mode(), Mode::InsertCapturing);
    h.type_str("ab3");
    escape(&mut h);
    h.clear();

    h.type_str(".");
    assert_eq!(
        h.taps(),
        vec![
            plain(KeyCode::A),
            plain(KeyCode::B),
            plain(KeyCode::N3)
        ]
    );
    assert_eq!(h.mode(), Mode::Command);
    assert_eq!(h.buffer(), "");
}

#[test]
fn typed_keys_pass_through_while_capturing() {
    let mut h = Harness::command();
    h.type_str("i");
    assert!(!h.down(KeyCode::A));
    assert!(!h.up(KeyCode::A));
    assert_eq!(h.engine.state().log.len(), 1);
}

#[test]
fn replay_restores_shift_state() {
    let mut h = Harness::command();
    h.type_str("iaB");
    escape(&mut h);
    h.clear();
    h.type_str(".");
    assert_eq!(h.taps(), vec![plain(KeyCode::A), shift(KeyCode::B)]);
}

#[test]
fn repeat_without_saved_command_is_a_noop() {
    let mut h = Harness::command();
    h.type_str(".");
    assert!(h.ops().is_empty());
    assert_eq!(h.mode(), Mode::Command);
    assert_eq!(h.buffer(), "");
}

#[test]
fn repeat_reruns_the_change_before_the_insertion() {
    let mut h = Harness::command();
    h.type_str("cw");
    h.type_str("xy");
    escape(&mut h);
    h.clear();
    h.type_str(".");
    assert_eq!(
        h.taps(),
        vec![
            ctrl_shift(KeyCode::RIGHT),
            plain(KeyCode::DELETE),
            plain(KeyCode::X),
            plain(KeyCode::Y),
        ]
    );
    assert_eq!(h.mode(), Mode::Command);
}

#[test]
fn repeat_can_run_twice() {
    let mut h = Harness::command();
    h.type_str("oz");
    escape(&mut h);
    h.clear();
    h.type_str("..");
    let once = vec![
        plain(KeyCode::END),
        plain(KeyCode::ENTER),
        plain(KeyCode::Z),
    ];
    assert_eq!(h.taps(), [once.clone(), once].concat());
}

#[test]
fn untrackable_key_abandons_capture() {
    let mut h = Harness::command();
    h.type_str("ia");
    h.tap(KeyCode::LEFT);
    assert_eq!(h.mode(), Mode::Insert);
    assert!(h.engine.state().saved.is_empty());
    assert!(h.engine.state().log.is_empty());
    escape(&mut h);
    h.clear();
    h.type_str(".");
    assert!(h.taps().is_empty());
}

#[test]
fn modifier_keys_do_not_abandon_capture() {
    let mut h = Harness::command();
    h.type_str("iA");
    assert_eq!(h.mode(), Mode::InsertCapturing);
    assert_eq!(h.engine.state().log.len(), 1);
}

#[test]
fn full_log_abandons_capture() {
    let mut h = Harness::command();
    h.type_str("i");
    h.type_str("abcdefghijklmnop");
    assert_eq!(h.mode(), Mode::InsertCapturing);
    assert!(h.engine.state().log.is_full());
    h.type_str("q");
    assert_eq!(h.mode(), Mode::Insert);
    assert!(h.engine.state().saved.is_empty());
}

#[test]
fn insertion_capacity_comes_from_config() {
    let mut config = Config::default();
    config.file.buffers.insertion_capacity = 2;
    let mut h = Harness::with_config(config);
    h.tap(KeyCode::VIM_ESC);
    h.type_str("iab");
    assert_eq!(h.mode(), Mode::InsertCapturing);
    h.type_str("c");
    assert_eq!(h.mode(), Mode::Insert);
}

#[test]
fn insert_entry_positions_cursor() {
    let cases = [
        ("i", vec![]),
        ("a", vec![plain(KeyCode::RIGHT)]),
        ("I", vec![plain(KeyCode::HOME)]),
        ("A", vec![plain(KeyCode::END)]),
        ("o", vec![plain(KeyCode::END), plain(KeyCode::ENTER)]),
        (
            "O",
            vec![
                plain(KeyCode::UP),
                plain(KeyCode::END),
                plain(KeyCode::ENTER),
            ],
        ),
        ("/", vec![ctrl(KeyCode::F)]),
    ];
    for (keys, expect) in cases {
        let mut h = Harness::command();
        h.type_str(keys);
        assert_eq!(h.taps(), expect, "keys {keys:?}");
        assert_eq!(h.mode(), Mode::InsertCapturing, "keys {keys:?}");
        assert_eq!(h.engine.state().saved.to_string(), keys);
    }
}

#[test]
fn insert_entry_switches_to_insert_layer_but_keeps_capturing() {
    let mut h = Harness::command();
    h.type_str("i");
    assert!(h.ops().contains(&core_actions::HostOp::Layer(0)));
    assert_eq!(h.engine.state().last_layer_on, 0);
    assert_eq!(h.mode(), Mode::InsertCapturing);
}

#[test]
fn escape_keeps_recording_for_repeat() {
    let mut h = Harness::command();
    h.type_str("2iab");
    escape(&mut h);
    assert_eq!(h.engine.state().saved.to_string(), "2i");
    assert_eq!(h.engine.state().log.len(), 2);
}

#[test]
fn return_to_base_enters_insert() {
    let mut h = Harness::command();
    assert!(h.down(KeyCode::TO_BASE));
    assert_eq!(h.mode(), Mode::InsertCapturing);
    assert!(!h.up(KeyCode::TO_BASE));
}
