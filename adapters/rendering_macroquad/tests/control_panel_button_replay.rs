use maze_chase_rendering_macroquad::ControlPanelInputState;

#[derive(Clone, Copy)]
enum Button {
    Start,
    Stop,
    Reset,
}

fn take(state: &mut ControlPanelInputState, button: Button) -> bool {
    match button {
        Button::Start => state.take_start(),
        Button::Stop => state.take_stop(),
        Button::Reset => state.take_reset(),
    }
}

fn register(state: &mut ControlPanelInputState, button: Button) {
    match button {
        Button::Start => state.register_start(),
        Button::Stop => state.register_stop(),
        Button::Reset => state.register_reset(),
    }
}

fn run_sequence(button: Button, sequence: &[bool]) -> Vec<bool> {
    let mut state = ControlPanelInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(take(&mut state, button));
        if pressed {
            register(&mut state, button);
        }
    }

    // Flush any trailing latched press so the harness observes the final frame.
    presses.push(take(&mut state, button));
    presses
}

#[test]
fn start_button_sequence_is_deterministic() {
    let button_sequence = [false, true, false, true, true, false];
    let expected = vec![false, false, true, false, true, true, false];

    let first_run = run_sequence(Button::Start, &button_sequence);
    let second_run = run_sequence(Button::Start, &button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn stop_and_reset_buttons_replay_identically() {
    let button_sequence = [true, false, true, false, false, true];
    let expected = vec![false, true, false, true, false, false, true];

    assert_eq!(run_sequence(Button::Stop, &button_sequence), expected);
    assert_eq!(run_sequence(Button::Reset, &button_sequence), expected);
}

#[test]
fn latches_are_independent() {
    let mut state = ControlPanelInputState::default();
    state.register_stop();

    assert!(!state.take_start());
    assert!(!state.take_reset());
    assert!(state.take_stop());
}
