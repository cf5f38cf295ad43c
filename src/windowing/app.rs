use crate::AppState;
use crate::config::{PlaygroundConfig, SoundConfig};
use crate::rendering::Renderer;
use crate::world::World;
use futures::executor::block_on;
use log::{error, info};
use snafu::{ResultExt, Snafu};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum AppError {
    #[snafu(display("No graphics backend found that could be used"))]
    Unsupported,

    #[snafu(display("Event loop failed: {source}"))]
    EventLoop { source: EventLoopError },
}

pub struct App<S: AppState> {
    renderer: Option<Renderer>,
    world: World,
    config: PlaygroundConfig,
    window_attributes: WindowAttributes,
    state: S,
    initialized: bool,
}

pub struct AppSettings<S: AppState> {
    pub window: WindowAttributes,
    pub config: PlaygroundConfig,
    pub state: S,
}

impl<S: AppState> AppSettings<S> {
    pub fn run(self) -> Result<(), AppError> {
        let (event_loop, app) = self.init_state()?;
        app.run(event_loop)
    }

    fn init_state(self) -> Result<(EventLoop<()>, App<S>), AppError> {
        let event_loop = match EventLoop::new() {
            Err(EventLoopError::NotSupported(_)) => return UnsupportedErr.fail(),
            e => e.context(EventLoopErr)?,
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut world = World::new(&self.config);
        attach_hit_player(&mut world, &self.config.sound);

        let app = App {
            renderer: None,
            world,
            config: self.config,
            window_attributes: self.window,
            state: self.state,
            initialized: false,
        };

        Ok((event_loop, app))
    }
}

impl<S: AppState> App<S> {
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), AppError> {
        event_loop.run_app(&mut self).context(EventLoopErr)
    }
}

#[cfg(feature = "audio")]
fn attach_hit_player(world: &mut World, sound: &SoundConfig) {
    use crate::audio::{AudioScene, KiraHitPlayer};
    use log::warn;

    if !sound.enabled {
        info!("Sound is disabled");
        return;
    }

    match AudioScene::new().and_then(|scene| KiraHitPlayer::load(scene, &sound.hit_path)) {
        Ok(player) => world.hit_sound.set_player(Box::new(player)),
        Err(e) => warn!("Running without sound: {e}"),
    }
}

#[cfg(not(feature = "audio"))]
fn attach_hit_player(_world: &mut World, _sound: &SoundConfig) {
    info!("Built without audio support");
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        info!("(Re)initializing render state!");
        let window = match event_loop.create_window(self.window_attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Unable to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match block_on(Renderer::new(window, self.config.window.max_pixel_ratio)) {
            Ok(r) => r,
            Err(e) => {
                error!("Error when creating renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = renderer.state.size;
        self.world.resize(size.width as f32, size.height as f32);

        if !self.initialized {
            if let Err(e) = self.state.init(&mut self.world, renderer.window()) {
                error!("Init hook failed: {e}");
                event_loop.exit();
                return;
            }
            self.initialized = true;
        }

        renderer.window().request_redraw();
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if event_loop.exiting() {
            return;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            error!("No renderer.");
            return;
        };
        let world = &mut self.world;
        if window_id != renderer.window().id() {
            return;
        }

        world.input.process_event(&event);

        match event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.state.update(world, renderer.window()) {
                    error!("Error happened when calling update function hook: {e}");
                }

                world.frame();
                if !renderer.render_scene(&world.scene, &world.camera) {
                    event_loop.exit();
                }
                world.next_frame();
                renderer.window().request_redraw();
            }
            WindowEvent::CloseRequested => {
                if let Err(e) = self.state.destroy(world, renderer.window()) {
                    error!("Error happened when calling destroy function hook: {e}");
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let size = renderer.resize(size);
                world.resize(size.width as f32, size.height as f32);
            }
            _ => {}
        }
    }
}
