use crate::config::PlaygroundConfig;
use crate::world::World;
use crate::AppSettings;
use std::error::Error;
use winit::dpi::{PhysicalSize, Size};
use winit::window::{Window, WindowAttributes};

/// Hooks into the lifetime of the playground window.
#[allow(unused)]
pub trait AppState: Sized {
    fn init(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
    fn update(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
    fn destroy(&mut self, world: &mut World, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

pub trait AppRuntime: AppState {
    fn configure(self, config: PlaygroundConfig) -> AppSettings<Self>;

    fn default_config(self) -> AppSettings<Self>;
}

impl<S: AppState> AppRuntime for S {
    fn configure(self, config: PlaygroundConfig) -> AppSettings<Self> {
        let window = &config.window;
        AppSettings {
            window: WindowAttributes::default()
                .with_inner_size(Size::Physical(PhysicalSize {
                    width: window.width,
                    height: window.height,
                }))
                .with_title(window.title.clone()),
            config,
            state: self,
        }
    }

    fn default_config(self) -> AppSettings<Self> {
        self.configure(PlaygroundConfig::default())
    }
}
