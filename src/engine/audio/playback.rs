use super::{HitPlayer, volume_to_db};
use kira::sound::FromFileError;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};
use log::{info, warn};
use snafu::{ResultExt, Snafu};
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum AudioError {
    #[snafu(display("Failed to initialize audio manager: {message}"))]
    Backend { message: String },

    #[snafu(display("Failed to load sound {}: {source}", path.display()))]
    LoadSound {
        path: PathBuf,
        source: FromFileError,
    },
}

pub struct AudioScene {
    manager: AudioManager<DefaultBackend>,
}

impl AudioScene {
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Backend {
                message: format!("{e:?}"),
            })?;

        Ok(AudioScene { manager })
    }

    pub fn manager_mut(&mut self) -> &mut AudioManager<DefaultBackend> {
        &mut self.manager
    }
}

/// Restarts a preloaded clip every time a hit is reported.
pub struct KiraHitPlayer {
    scene: AudioScene,
    sound: StaticSoundData,
    playing: Option<StaticSoundHandle>,
}

impl KiraHitPlayer {
    pub fn load<P: AsRef<Path>>(scene: AudioScene, path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let sound = StaticSoundData::from_file(path).context(LoadSoundErr { path })?;
        info!("Loaded hit sound {}", path.display());

        Ok(KiraHitPlayer {
            scene,
            sound,
            playing: None,
        })
    }
}

impl HitPlayer for KiraHitPlayer {
    fn restart(&mut self, volume: f32) {
        if let Some(mut handle) = self.playing.take() {
            handle.stop(Tween::default());
        }

        let data = self.sound.clone().volume(Decibels(volume_to_db(volume)));
        match self.scene.manager_mut().play(data) {
            Ok(handle) => self.playing = Some(handle),
            Err(e) => warn!("Failed to play hit sound: {e:?}"),
        }
    }
}
