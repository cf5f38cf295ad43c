use crate::input::InputManager;
use log::info;
use winit::keyboard::KeyCode;

/// The three debug triggers of the playground.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DebugAction {
    SpawnSphere,
    SpawnCube,
    Reset,
}

impl DebugAction {
    pub fn label(&self) -> &'static str {
        match self {
            DebugAction::SpawnSphere => "create sphere",
            DebugAction::SpawnCube => "create cube",
            DebugAction::Reset => "reset",
        }
    }
}

/// Keyboard bindings for the [`DebugAction`]s.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    bindings: Vec<(KeyCode, DebugAction)>,
}

impl Default for DebugPanel {
    fn default() -> Self {
        DebugPanel {
            bindings: vec![
                (KeyCode::Digit1, DebugAction::SpawnSphere),
                (KeyCode::Digit2, DebugAction::SpawnCube),
                (KeyCode::KeyR, DebugAction::Reset),
            ],
        }
    }
}

impl DebugPanel {
    pub fn new(bindings: Vec<(KeyCode, DebugAction)>) -> Self {
        DebugPanel { bindings }
    }

    pub fn bind(&mut self, key: KeyCode, action: DebugAction) {
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, action));
    }

    pub fn bindings(&self) -> &[(KeyCode, DebugAction)] {
        &self.bindings
    }

    /// Actions whose key went down this frame, in binding order.
    pub fn triggered(&self, input: &InputManager) -> Vec<DebugAction> {
        self.bindings
            .iter()
            .filter(|(key, _)| input.is_key_down(*key))
            .map(|(_, action)| *action)
            .collect()
    }

    pub fn print_help(&self) {
        for (key, action) in &self.bindings {
            info!("[{key:?}] {}", action.label());
        }
    }
}
