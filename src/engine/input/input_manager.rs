use nalgebra::Vector2;
use std::collections::HashMap;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub type KeyState = ElementState;

/// Pixels of touchpad scrolling that count as one wheel notch.
const PIXELS_PER_LINE: f64 = 100.0;

pub struct InputManager {
    key_states: HashMap<KeyCode, KeyState>,
    key_just_updated: Vec<KeyCode>,
    button_states: HashMap<MouseButton, ElementState>,
    button_just_updated: Vec<MouseButton>,
    mouse_wheel_delta: f32,
    mouse_pos: Option<PhysicalPosition<f32>>,
    mouse_delta: Vector2<f32>,
}

impl Default for InputManager {
    fn default() -> Self {
        InputManager {
            key_states: HashMap::default(),
            key_just_updated: Vec::new(),
            button_states: HashMap::default(),
            button_just_updated: Vec::new(),
            mouse_wheel_delta: 0.0,
            mouse_pos: None,
            mouse_delta: Vector2::zeros(),
        }
    }
}

impl InputManager {
    pub fn process_event(&mut self, window_event: &WindowEvent) {
        match window_event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.process_key(code, event.state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.process_cursor(position),
            WindowEvent::CursorLeft { .. } => self.mouse_pos = None,
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
                };
                self.process_wheel(y as f32);
            }
            WindowEvent::MouseInput { button, state, .. } => self.process_button(*button, *state),
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    pub fn process_key(&mut self, code: KeyCode, state: KeyState) {
        if self.get_key_state(code) != state {
            self.key_just_updated.push(code);
        }
        self.key_states.insert(code, state);
    }

    pub fn process_button(&mut self, button: MouseButton, state: ElementState) {
        if self.get_button_state(button) != state {
            self.button_just_updated.push(button);
        }
        self.button_states.insert(button, state);
    }

    pub fn process_cursor(&mut self, position: &PhysicalPosition<f64>) {
        let position = PhysicalPosition::new(position.x as f32, position.y as f32);
        if let Some(old) = self.mouse_pos {
            self.mouse_delta += Vector2::new(position.x - old.x, position.y - old.y);
        }
        self.mouse_pos = Some(position);
    }

    pub fn process_wheel(&mut self, lines: f32) {
        self.mouse_wheel_delta += lines;
    }

    /// Releases every key and button, e.g. after the window lost focus and
    /// will not see the matching release events.
    pub fn release_all(&mut self) {
        for (code, state) in self.key_states.iter_mut() {
            if state.is_pressed() {
                *state = KeyState::Released;
                self.key_just_updated.push(*code);
            }
        }
        for (button, state) in self.button_states.iter_mut() {
            if state.is_pressed() {
                *state = ElementState::Released;
                self.button_just_updated.push(*button);
            }
        }
    }

    pub fn get_key_state(&self, key_code: KeyCode) -> KeyState {
        *self.key_states.get(&key_code).unwrap_or(&KeyState::Released)
    }

    // Only is true if the key was JUST pressed
    pub fn is_key_down(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Pressed && self.key_just_updated.contains(&key_code)
    }

    // true if the key was JUST pressed or is being held
    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Pressed
    }

    // Only is true if the key was JUST released
    pub fn is_key_up(&self, key_code: KeyCode) -> bool {
        self.get_key_state(key_code) == KeyState::Released && self.key_just_updated.contains(&key_code)
    }

    pub fn get_button_state(&self, button: MouseButton) -> ElementState {
        *self.button_states.get(&button).unwrap_or(&ElementState::Released)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.get_button_state(button) == ElementState::Pressed
    }

    pub fn mouse_pos(&self) -> Option<&PhysicalPosition<f32>> {
        self.mouse_pos.as_ref()
    }

    /// Cursor movement since the last frame, in physical pixels.
    pub fn mouse_delta(&self) -> &Vector2<f32> {
        &self.mouse_delta
    }

    /// Wheel movement since the last frame, in lines. Positive is away from the user.
    pub fn mouse_wheel_delta(&self) -> f32 {
        self.mouse_wheel_delta
    }

    pub fn next_frame(&mut self) {
        self.key_just_updated.clear();
        self.button_just_updated.clear();
        self.mouse_delta = Vector2::zeros();
        self.mouse_wheel_delta = 0.0;
    }
}
