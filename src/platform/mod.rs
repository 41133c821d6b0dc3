//! Platform collaborator traits
//!
//! The core never touches a real window, decoder or mixer. It talks to the
//! outside world through these narrow traits, using opaque handles minted by
//! the platform at load time. A frame is delivered as one complete
//! `FrameSnapshot`, so presentation is atomic from the viewer's side.

use thiserror::Error;

use crate::sim::Rect;

/// Images the game expects to find in the asset bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    Player,
    Cherry,
    Banana,
    Grape,
    Bomb,
}

/// One-shot sound effects; the looping music track belongs to the
/// `AudioService` itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    FruitCaught,
    BombHit,
    GameLost,
}

/// Opaque token for a loaded image, minted by the `AssetProvider`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Opaque token for a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// A looping animated image (the player sprite) with its cycle length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatedImage {
    pub handle: ImageHandle,
    pub duration_ms: u64,
}

/// Asset loading failures are fatal at startup; nothing in the game
/// recovers from a missing or corrupt asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {0} is missing from the bundle")]
    Missing(String),
    #[error("failed to decode asset {0}: {1}")]
    Decode(String, String),
}

/// Loads images and sounds from the platform's resource bundle
pub trait AssetProvider {
    fn load_static_image(&mut self, id: ImageId) -> Result<ImageHandle, AssetError>;
    fn load_animated_image(&mut self, id: ImageId) -> Result<AnimatedImage, AssetError>;
    fn load_sound(&mut self, id: SoundId) -> Result<SoundHandle, AssetError>;
}

/// Fire-and-forget audio. Implementations swallow playback failures; the
/// game never hears about them.
pub trait AudioService: Send {
    fn play(&mut self, sound: SoundHandle);
    fn start_music(&mut self);
    fn pause_music(&mut self);
    fn set_music_volume(&mut self, volume: f32);
    /// Volume applied to every one-shot cue played through `play`
    fn set_sfx_volume(&mut self, volume: f32);
}

/// The drawing target. `present` must make the whole snapshot visible at
/// once; acquire/draw/present sequencing is the implementation's problem.
pub trait SurfaceProvider: Send {
    fn is_ready(&self) -> bool;
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Modal host for the single core-triggered dialog. Shown once per
/// game-over; the host answers through the input handle (restart) or by
/// stopping the loop (exit).
pub trait DialogHost: Send {
    fn show_game_over(&mut self, score: u32);
}

/// A static sprite placed at a play-field rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub image: ImageHandle,
    pub rect: Rect,
}

/// The animated player sprite, time-mapped into its loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub image: ImageHandle,
    pub rect: Rect,
    /// Offset into the animation cycle, already wrapped by its duration
    pub anim_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub lives: u8,
}

/// Everything one presented frame contains, built completely before the
/// surface sees it
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub background: ImageHandle,
    pub sprites: Vec<Sprite>,
    pub player: PlayerSprite,
    pub hud: Hud,
    /// Draw the centered game-over banner
    pub game_over: bool,
}
