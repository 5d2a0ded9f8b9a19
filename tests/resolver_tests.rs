//! Integration tests for per-tick command resolution.

use tworld_input::core::{InputResolver, RawEvent, ScriptedSource};
use tworld_input::types::{Command, KeyState, MouseButton, Scancode};

fn resolver() -> InputResolver<ScriptedSource> {
    InputResolver::new(ScriptedSource::new())
}

fn joystick_resolver() -> InputResolver<ScriptedSource> {
    let mut r = resolver();
    r.set_repeat_style(true);
    r
}

fn poll(r: &mut InputResolver<ScriptedSource>) -> Option<Command> {
    r.poll_command(false).expect("scripted source never fails without waiting")
}

#[test]
fn test_strike_is_seen_then_cleared() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::R), RawEvent::release(Scancode::R)])
        .idle(1);

    assert_eq!(poll(&mut r), Some(Command::SAME));
    assert_eq!(r.keys().get(Scancode::R), KeyState::Struck);

    assert_eq!(poll(&mut r), None);
    assert_eq!(r.keys().get(Scancode::R), KeyState::Off);
}

#[test]
fn test_keyboard_style_plain_key_lingers_then_goes_quiet() {
    let mut r = resolver();
    r.source_mut().tick([RawEvent::press(Scancode::P)]).idle(4);

    let mut states = Vec::new();
    let mut cmds = Vec::new();
    for _ in 0..5 {
        cmds.push(poll(&mut r));
        states.push(r.keys().get(Scancode::P));
    }

    assert_eq!(
        states,
        vec![
            KeyState::Pressed,
            KeyState::DownButOff1,
            KeyState::DownButOff2,
            KeyState::Down,
            KeyState::Down,
        ]
    );
    assert_eq!(
        cmds,
        vec![
            Some(Command::PREV),
            Some(Command::PRESERVE),
            Some(Command::PRESERVE),
            None,
            None,
        ]
    );
}

#[test]
fn test_repress_after_linger_is_repeating_fallback() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::P)])
        .idle(3)
        .tick([RawEvent::press(Scancode::P)]);

    let cmds: Vec<_> = (0..5).map(|_| poll(&mut r)).collect();
    assert_eq!(
        cmds,
        vec![
            Some(Command::PREV),
            Some(Command::PRESERVE),
            Some(Command::PRESERVE),
            None,
            Some(Command::PREV),
        ]
    );
    assert_eq!(r.keys().get(Scancode::P), KeyState::Repeating);
}

#[test]
fn test_held_direction_beats_repeating_fallback_in_joystick_style() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::UP), RawEvent::press(Scancode::S)])
        .tick([RawEvent::press(Scancode::S)])
        .tick([RawEvent::release(Scancode::UP), RawEvent::press(Scancode::S)]);

    assert_eq!(poll(&mut r), Some(Command::NORTH));

    assert_eq!(poll(&mut r), Some(Command::NORTH));
    assert_eq!(r.keys().get(Scancode::S), KeyState::Repeating);

    // With the direction released the repeat is all that is left.
    assert_eq!(poll(&mut r), Some(Command::SEE_SCORES));
}

#[test]
fn test_hold_key_never_goes_silent_in_keyboard_style() {
    let mut r = resolver();
    r.source_mut().tick([RawEvent::press(Scancode::UP)]).idle(6);

    let cmds: Vec<_> = (0..7).map(|_| poll(&mut r)).collect();
    assert_eq!(cmds[0], Some(Command::NORTH));
    assert_eq!(cmds[1], Some(Command::PRESERVE));
    assert_eq!(cmds[2], Some(Command::PRESERVE));
    assert!(cmds[3..].iter().all(|c| *c == Some(Command::NORTH)));
}

#[test]
fn test_hold_key_fires_every_tick_in_joystick_style() {
    let mut r = joystick_resolver();
    r.source_mut().tick([RawEvent::press(Scancode::LEFT)]).idle(6);

    for tick in 0..7 {
        assert_eq!(poll(&mut r), Some(Command::WEST), "tick {tick}");
    }
}

#[test]
fn test_release_stops_hold_key() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::DOWN)])
        .idle(1)
        .tick([RawEvent::release(Scancode::DOWN)]);

    assert_eq!(poll(&mut r), Some(Command::SOUTH));
    assert_eq!(poll(&mut r), Some(Command::SOUTH));
    assert_eq!(poll(&mut r), None);
}

#[test]
fn test_joystick_style_merges_perpendicular_directions() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::UP), RawEvent::press(Scancode::RIGHT)])
        .idle(2);

    let diagonal = Command::NORTH | Command::EAST;
    assert_eq!(poll(&mut r), Some(diagonal));
    assert_eq!(poll(&mut r), Some(diagonal));
    assert_eq!(diagonal, Command(9));
}

#[test]
fn test_joystick_style_merges_across_keypad_and_arrows() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::LEFT), RawEvent::press(Scancode::KP_2)]);

    assert_eq!(poll(&mut r), Some(Command::WEST | Command::SOUTH));
}

#[test]
fn test_opposite_directions_do_not_merge() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::UP), RawEvent::press(Scancode::DOWN)]);

    assert_eq!(poll(&mut r), Some(Command::NORTH));
}

#[test]
fn test_keyboard_style_first_entry_wins_instead_of_merging() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::RIGHT), RawEvent::press(Scancode::UP)]);

    assert_eq!(poll(&mut r), Some(Command::NORTH));
}

#[test]
fn test_joystick_direction_yields_to_nothing_but_a_partner() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::UP), RawEvent::press(Scancode::S)]);

    // S is pressed but only a perpendicular direction may join NORTH.
    assert_eq!(poll(&mut r), Some(Command::NORTH));
}

#[test]
fn test_shift_arrow_is_cheat_move() {
    let mut r = joystick_resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::LSHIFT), RawEvent::press(Scancode::UP)])
        .idle(1);

    assert_eq!(poll(&mut r), Some(Command::CHEAT_NORTH));
    assert_eq!(poll(&mut r), Some(Command::CHEAT_NORTH));
}

#[test]
fn test_mouse_click_lingers_for_three_polls() {
    let mut r = resolver();
    r.source_mut()
        .tick([
            RawEvent::click(3, 0, MouseButton::Left),
            RawEvent::Mouse {
                x: 3,
                y: 0,
                button: MouseButton::Left,
                pressed: false,
            },
        ])
        .idle(4);

    assert_eq!(poll(&mut r), Command::abs_mouse_move(3));
    assert_eq!(poll(&mut r), Some(Command::PRESERVE));
    assert_eq!(poll(&mut r), Some(Command::PRESERVE));
    assert_eq!(poll(&mut r), Some(Command::PRESERVE));
    assert_eq!(poll(&mut r), None);
}

#[test]
fn test_keys_take_precedence_over_mouse() {
    let mut r = resolver();
    r.source_mut()
        .tick([
            RawEvent::click(1, 1, MouseButton::Left),
            RawEvent::press(Scancode::SPACE),
        ])
        .idle(1);

    assert_eq!(poll(&mut r), Some(Command::PROCEED));
    assert_eq!(poll(&mut r), Command::abs_mouse_move(10));
}

#[test]
fn test_click_off_grid_is_no_command() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::click(40, 40, MouseButton::Left)])
        .idle(1);

    assert_eq!(poll(&mut r), None);
    assert_eq!(poll(&mut r), None);
}

#[test]
fn test_repeat_style_switch_resyncs_held_key() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::LEFT), RawEvent::press(Scancode::Q)])
        .tick([RawEvent::release(Scancode::Q)])
        .idle(1);

    assert_eq!(poll(&mut r), Some(Command::WEST));
    poll(&mut r);

    r.set_repeat_style(true);
    assert_eq!(r.keys().get(Scancode::LEFT), KeyState::Pressed);
    assert_eq!(r.keys().get(Scancode::Q), KeyState::Off);

    assert_eq!(poll(&mut r), Some(Command::WEST));
    assert_eq!(r.keys().get(Scancode::LEFT), KeyState::Down);
}

#[test]
fn test_repeat_style_switch_picks_up_keys_held_elsewhere() {
    let mut r = resolver();
    r.source_mut().hold(Scancode::RIGHT).idle(1);

    r.set_repeat_style(true);
    assert_eq!(poll(&mut r), Some(Command::EAST));
    assert_eq!(r.keys().get(Scancode::RIGHT), KeyState::Down);
}

#[test]
fn test_text_entry_mode_swaps_tables() {
    let mut r = resolver();
    r.set_text_entry_mode(true);
    r.source_mut()
        .tick([RawEvent::press(Scancode::C), RawEvent::release(Scancode::C)])
        .tick([RawEvent::press(Scancode::ESCAPE)])
        .tick([RawEvent::press(Scancode::LALT), RawEvent::press(Scancode::F4)]);

    assert_eq!(poll(&mut r), Some(Command::letter(b'c')));
    assert_eq!(poll(&mut r), Some(Command::QUIT_LEVEL));
    assert_eq!(poll(&mut r), Some(Command::QUIT));

    r.set_text_entry_mode(false);
    r.source_mut().tick([
        RawEvent::release(Scancode::F4),
        RawEvent::release(Scancode::LALT),
        RawEvent::press(Scancode::A),
    ]);
    assert_eq!(poll(&mut r), None);
}

#[test]
fn test_ctrl_letter_is_not_text() {
    let mut r = resolver();
    r.set_text_entry_mode(true);
    r.source_mut()
        .tick([RawEvent::press(Scancode::RCTRL), RawEvent::press(Scancode::X)]);

    assert_eq!(poll(&mut r), None);
}

#[test]
fn test_waiting_poll_blocks_until_command() {
    let mut r = resolver();
    r.source_mut()
        .idle(2)
        .tick([RawEvent::press(Scancode::LCTRL)])
        .tick([RawEvent::press(Scancode::N)]);

    assert_eq!(r.poll_command(true).unwrap(), Some(Command::NEXT_LEVEL));
}

#[test]
fn test_wait_for_any_key_detects_quit_keys() {
    for (key, expected) in [
        (Scancode::Q, false),
        (Scancode::ESCAPE, false),
        (Scancode::SPACE, true),
        (Scancode::F7, true),
    ] {
        let mut r = resolver();
        r.source_mut()
            .idle(1)
            .tick([RawEvent::press(key), RawEvent::release(key)]);
        assert_eq!(r.wait_for_any_key().unwrap(), expected, "{key:?}");
    }
}

#[test]
fn test_wait_for_any_key_ignores_keys_already_down_and_modifiers() {
    let mut r = resolver();
    r.source_mut()
        .tick([RawEvent::press(Scancode::Q)])
        .tick([RawEvent::press(Scancode::RSHIFT)])
        .tick([RawEvent::press(Scancode::B)]);

    assert!(r.wait_for_any_key().unwrap());
}
