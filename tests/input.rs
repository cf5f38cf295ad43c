use tumble::input::{DebugAction, DebugPanel, InputManager};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

#[test]
fn key_down_lasts_one_frame() {
    let mut input = InputManager::default();
    input.process_key(KeyCode::KeyR, ElementState::Pressed);
    assert!(input.is_key_down(KeyCode::KeyR));
    assert!(input.is_key_pressed(KeyCode::KeyR));

    input.next_frame();
    assert!(!input.is_key_down(KeyCode::KeyR));
    assert!(input.is_key_pressed(KeyCode::KeyR));

    input.process_key(KeyCode::KeyR, ElementState::Released);
    assert!(input.is_key_up(KeyCode::KeyR));
    assert!(!input.is_key_pressed(KeyCode::KeyR));
}

#[test]
fn mouse_deltas_reset_each_frame() {
    let mut input = InputManager::default();
    input.process_cursor(&PhysicalPosition::new(10.0, 10.0));
    assert_eq!(input.mouse_delta().x, 0.0);

    input.process_cursor(&PhysicalPosition::new(15.0, 7.0));
    input.process_wheel(1.0);
    input.process_wheel(0.5);
    assert_eq!(input.mouse_delta().x, 5.0);
    assert_eq!(input.mouse_delta().y, -3.0);
    assert_eq!(input.mouse_wheel_delta(), 1.5);

    input.next_frame();
    assert_eq!(input.mouse_delta().x, 0.0);
    assert_eq!(input.mouse_wheel_delta(), 0.0);
}

#[test]
fn release_all_lets_go() {
    let mut input = InputManager::default();
    input.process_key(KeyCode::Digit1, ElementState::Pressed);
    input.process_button(MouseButton::Left, ElementState::Pressed);
    input.next_frame();

    input.release_all();
    assert!(!input.is_key_pressed(KeyCode::Digit1));
    assert!(!input.is_button_pressed(MouseButton::Left));
    assert!(input.is_key_up(KeyCode::Digit1));
}

#[test]
fn panel_maps_keys_to_actions() {
    let panel = DebugPanel::default();
    let mut input = InputManager::default();
    assert!(panel.triggered(&input).is_empty());

    input.process_key(KeyCode::KeyR, ElementState::Pressed);
    input.process_key(KeyCode::Digit1, ElementState::Pressed);
    assert_eq!(
        panel.triggered(&input),
        vec![DebugAction::SpawnSphere, DebugAction::Reset]
    );

    input.next_frame();
    assert!(panel.triggered(&input).is_empty());
}

#[test]
fn rebinding_replaces_key() {
    let mut panel = DebugPanel::default();
    panel.bind(KeyCode::Digit1, DebugAction::SpawnCube);
    panel.bind(KeyCode::Space, DebugAction::SpawnSphere);

    let mut input = InputManager::default();
    input.process_key(KeyCode::Digit1, ElementState::Pressed);
    assert_eq!(panel.triggered(&input), vec![DebugAction::SpawnCube]);
    assert_eq!(panel.bindings().len(), 4);
}
