//! Fruitfall entry point
//!
//! Runs the game loop against a headless demo platform: handles are minted
//! without real decoding, frames are counted instead of drawn, and a short
//! scripted drag sweep stands in for touch input. Wiring a real windowing
//! and audio backend means implementing the four traits in `platform`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fruitfall::audio::SoundBank;
use fruitfall::consts::{PLAYFIELD_WIDTH, TICK_MS};
use fruitfall::game_loop::{GameLoop, Platform};
use fruitfall::platform::{
    AnimatedImage, AssetError, AssetProvider, AudioService, DialogHost, FrameSnapshot, ImageHandle,
    ImageId, SoundHandle, SoundId, SurfaceProvider,
};
use fruitfall::render::RenderSync;
use fruitfall::settings::Settings;

/// Mints sequential handles instead of decoding real media
#[derive(Default)]
struct DemoAssets {
    next: u32,
}

impl DemoAssets {
    fn mint(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl AssetProvider for DemoAssets {
    fn load_static_image(&mut self, id: ImageId) -> Result<ImageHandle, AssetError> {
        log::debug!("loading image {id:?}");
        Ok(ImageHandle(self.mint()))
    }

    fn load_animated_image(&mut self, id: ImageId) -> Result<AnimatedImage, AssetError> {
        log::debug!("loading animation {id:?}");
        Ok(AnimatedImage {
            handle: ImageHandle(self.mint()),
            duration_ms: 750,
        })
    }

    fn load_sound(&mut self, id: SoundId) -> Result<SoundHandle, AssetError> {
        log::debug!("loading sound {id:?}");
        Ok(SoundHandle(self.mint()))
    }
}

/// Always-ready surface that counts presented frames
#[derive(Clone, Default)]
struct DemoSurface {
    frames: Arc<AtomicUsize>,
}

impl SurfaceProvider for DemoSurface {
    fn is_ready(&self) -> bool {
        true
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        let n = self.frames.fetch_add(1, Ordering::AcqRel);
        if n % 60 == 0 {
            log::debug!(
                "frame {n}: {} objects, score {}, lives {}",
                frame.sprites.len(),
                frame.hud.score,
                frame.hud.lives
            );
        }
    }
}

struct DemoAudio;

impl AudioService for DemoAudio {
    fn play(&mut self, sound: SoundHandle) {
        log::debug!("sfx {sound:?}");
    }

    fn start_music(&mut self) {
        log::debug!("music started");
    }

    fn pause_music(&mut self) {
        log::debug!("music paused");
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("music volume {volume:.2}");
    }

    fn set_sfx_volume(&mut self, volume: f32) {
        log::debug!("sfx volume {volume:.2}");
    }
}

struct DemoDialog;

impl DialogHost for DemoDialog {
    fn show_game_over(&mut self, score: u32) {
        log::info!("game over dialog: final score {score}");
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("startup failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AssetError> {
    let settings = Settings::load();
    // Write the file back so a first run leaves an editable settings file
    settings.save();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut assets = DemoAssets::default();
    let renderer = RenderSync::load(&mut assets)?;
    let sounds = SoundBank::load(&mut assets)?;

    let surface = DemoSurface::default();
    let frames = Arc::clone(&surface.frames);

    let mut game = GameLoop::start(
        renderer,
        sounds,
        Platform {
            surface,
            audio: DemoAudio,
            dialog: DemoDialog,
        },
        &settings,
        seed,
    );

    // Sweep the player back and forth for a few seconds of demo play
    let input = game.input();
    for step in 0..240u32 {
        let t = step as f32 / 60.0;
        let x = PLAYFIELD_WIDTH * 0.5 * (1.0 + (t * 1.7).sin());
        input.drag_to(x);
        thread::sleep(Duration::from_millis(TICK_MS));
    }
    game.stop();

    println!(
        "demo run complete: {} frames presented",
        frames.load(Ordering::Acquire)
    );
    Ok(())
}
