use crate::config::SoundConfig;
use crate::physics::Impact;
use log::trace;
use rand::Rng;

/// Something that can (re)start the hit sound.
pub trait HitPlayer {
    /// Starts the sound from the beginning at `volume` (`0.0..=1.0`), cutting
    /// off any playback still running.
    fn restart(&mut self, volume: f32);
}

/// Plays a hit sound when bodies collide hard enough.
pub struct HitSound {
    pub threshold: f32,
    pub volume_divisor: f32,
    player: Option<Box<dyn HitPlayer>>,
}

impl Default for HitSound {
    fn default() -> Self {
        HitSound::new(&SoundConfig::default())
    }
}

impl HitSound {
    pub fn new(config: &SoundConfig) -> Self {
        HitSound {
            threshold: config.threshold,
            volume_divisor: config.volume_divisor,
            player: None,
        }
    }

    pub fn set_player(&mut self, player: Box<dyn HitPlayer>) {
        self.player = Some(player);
    }

    /// Reacts to one impact. Returns the volume the sound was started at, or
    /// `None` if the impact was too soft.
    pub fn on_impact<R: Rng + ?Sized>(&mut self, impact: &Impact, rng: &mut R) -> Option<f32> {
        let roll = rng.r#gen::<f32>();
        let volume = hit_volume(impact.strength, self.threshold, self.volume_divisor, roll)?;

        trace!(
            "Hit sound at volume {volume:.3} for impact {:.3}",
            impact.strength
        );
        if let Some(player) = self.player.as_mut() {
            player.restart(volume);
        }

        Some(volume)
    }
}

/// Volume for an impact of `strength`, randomized by `roll` in `0.0..1.0`.
///
/// Impacts at or below `threshold` are silent. Louder impacts scale linearly,
/// reaching the top of the range at `volume_divisor`. The result never leaves
/// `0.0..=1.0`.
pub fn hit_volume(strength: f32, threshold: f32, volume_divisor: f32, roll: f32) -> Option<f32> {
    if strength.is_nan() || strength <= threshold {
        return None;
    }

    Some((roll * (strength / volume_divisor)).clamp(0.0, 1.0))
}
