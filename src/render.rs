//! Frame snapshot assembly
//!
//! Once per tick the current simulation state is flattened into a
//! `FrameSnapshot` and handed to the surface. The snapshot is complete
//! before `present` is called, so the viewer never sees a partial frame.

use crate::platform::{
    AnimatedImage, AssetError, AssetProvider, FrameSnapshot, Hud, ImageHandle, ImageId,
    PlayerSprite, Sprite, SurfaceProvider,
};
use crate::sim::{GameState, ObjectKind};

/// Holds the image handles the renderer needs, resolved once at startup
pub struct RenderSync {
    background: ImageHandle,
    cherry: ImageHandle,
    banana: ImageHandle,
    grape: ImageHandle,
    bomb: ImageHandle,
    player: AnimatedImage,
}

impl RenderSync {
    /// Resolve all image handles. Any missing asset aborts startup.
    pub fn load(assets: &mut dyn AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            background: assets.load_static_image(ImageId::Background)?,
            cherry: assets.load_static_image(ImageId::Cherry)?,
            banana: assets.load_static_image(ImageId::Banana)?,
            grape: assets.load_static_image(ImageId::Grape)?,
            bomb: assets.load_static_image(ImageId::Bomb)?,
            player: assets.load_animated_image(ImageId::Player)?,
        })
    }

    fn image_for(&self, kind: ObjectKind) -> ImageHandle {
        match kind {
            ObjectKind::Cherry => self.cherry,
            ObjectKind::Banana => self.banana,
            ObjectKind::Grape => self.grape,
            ObjectKind::Bomb => self.bomb,
        }
    }

    /// Flatten the state into one frame's worth of draw commands
    pub fn snapshot(&self, state: &GameState, now_ms: u64) -> FrameSnapshot {
        let anim_time_ms = if self.player.duration_ms == 0 {
            0
        } else {
            now_ms.saturating_sub(state.anim_start_ms) % self.player.duration_ms
        };

        FrameSnapshot {
            background: self.background,
            sprites: state
                .objects
                .iter()
                .map(|obj| Sprite {
                    image: self.image_for(obj.kind),
                    rect: obj.rect(),
                })
                .collect(),
            player: PlayerSprite {
                image: self.player.handle,
                rect: state.player.rect(),
                anim_time_ms,
            },
            hud: Hud {
                score: state.score,
                lives: state.lives,
            },
            game_over: state.game_over,
        }
    }

    pub fn present(&self, surface: &mut dyn SurfaceProvider, state: &GameState, now_ms: u64) {
        surface.present(&self.snapshot(state, now_ms));
    }
}
