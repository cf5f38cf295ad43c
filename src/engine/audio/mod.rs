//! Sound output through `kira`.
//!
//! The playground only ever plays one sound, the hit, so this stays small: an
//! [`AudioScene`] wraps the audio manager and [`KiraHitPlayer`] restarts the
//! hit clip on demand. Without the `audio` feature only [`HitSound`] remains
//! and impacts are evaluated silently.

pub mod hit_sound;
#[cfg(feature = "audio")]
mod playback;

pub use hit_sound::*;
#[cfg(feature = "audio")]
pub use playback::*;

pub const SILENCE_DB: f32 = -60.0;

/// Converts a linear `0.0..=1.0` volume into decibels, clamped to
/// [`SILENCE_DB`]..=0.
pub fn volume_to_db(volume: f32) -> f32 {
    if volume.is_nan() || volume <= 0.0 {
        return SILENCE_DB;
    }

    (20.0 * volume.min(1.0).log10()).max(SILENCE_DB)
}
