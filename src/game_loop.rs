//! Fixed-cadence game loop
//!
//! A dedicated worker thread drives difficulty -> spawn -> simulation ->
//! render at a fixed ~16 ms tick. Input arrives from whatever thread the
//! platform delivers events on; the only shared state is a small
//! mutex-guarded input cell drained once per tick, so a coordinate is
//! never read half-written.
//!
//! The tick delay is a fixed sleep, not delta-time integration: under load
//! the effective fall speed tracks the achieved frame rate. A dropped
//! frame is skipped, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundBank;
use crate::consts::{STOP_TIMEOUT_MS, SURFACE_POLL_MS, TICK_MS};
use crate::platform::{AudioService, DialogHost, SurfaceProvider};
use crate::render::RenderSync;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, TickInput};

/// Loop lifecycle. Stopped -> Running when the surface first reports
/// ready; Running -> GameOver when lives hit zero (rendering continues,
/// simulation stops); GameOver -> Running on restart; teardown is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopPhase {
    Stopped,
    Running,
    GameOver,
}

#[derive(Debug, Default)]
struct InputState {
    target_x: Option<f32>,
    restart: bool,
}

/// Thread-safe writer for the player's drag position and the restart
/// action. Cloneable; hand one to whatever delivers input events.
#[derive(Clone)]
pub struct InputHandle {
    shared: Arc<Mutex<InputState>>,
}

impl InputHandle {
    fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(InputState::default())),
        }
    }

    /// Record the latest drag position. Out-of-bounds values are fine;
    /// the simulation clamps them.
    pub fn drag_to(&self, x: f32) {
        self.lock().target_x = Some(x);
    }

    /// Ask for a reset; honored only while the game is over.
    pub fn request_restart(&self) {
        self.lock().restart = true;
    }

    fn drain(&self) -> TickInput {
        let mut guard = self.lock();
        TickInput {
            target_x: guard.target_x.take(),
            restart: std::mem::take(&mut guard.restart),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        // A poisoned input cell only ever holds plain data; keep going
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The collaborators the worker thread owns for its lifetime
pub struct Platform<S, A, D> {
    pub surface: S,
    pub audio: A,
    pub dialog: D,
}

/// Handle to the running loop. Stopping (explicitly or on drop) flags the
/// worker down and joins it; an in-flight tick always finishes first.
pub struct GameLoop {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    input: InputHandle,
}

impl GameLoop {
    pub fn start<S, A, D>(
        renderer: RenderSync,
        sounds: SoundBank,
        platform: Platform<S, A, D>,
        settings: &Settings,
        seed: u64,
    ) -> Self
    where
        S: SurfaceProvider + 'static,
        A: AudioService + 'static,
        D: DialogHost + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let input = InputHandle::new();
        let volumes = Volumes {
            music: settings.effective_music_volume(),
            sfx: settings.effective_sfx_volume(),
        };

        let worker = {
            let running = Arc::clone(&running);
            let input = input.clone();
            thread::Builder::new()
                .name("fruitfall-tick".into())
                .spawn(move || {
                    run_worker(running, input, renderer, sounds, platform, volumes, seed)
                })
                .expect("failed to spawn game loop thread")
        };

        Self {
            running,
            worker: Some(worker),
            input,
        }
    }

    pub fn input(&self) -> InputHandle {
        self.input.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Flag the worker down and join it, waiting at most STOP_TIMEOUT_MS.
    /// A worker that misses the deadline is detached, never waited on
    /// forever. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let deadline = Instant::now() + Duration::from_millis(STOP_TIMEOUT_MS);
            while !worker.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(1));
            }
            if !worker.is_finished() {
                log::error!("game loop thread missed the {STOP_TIMEOUT_MS}ms stop deadline");
                return;
            }
            if worker.join().is_err() {
                log::error!("game loop thread panicked");
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Mixer levels derived from settings before the worker starts
#[derive(Debug, Clone, Copy)]
struct Volumes {
    music: f32,
    sfx: f32,
}

fn run_worker<S, A, D>(
    running: Arc<AtomicBool>,
    input: InputHandle,
    renderer: RenderSync,
    sounds: SoundBank,
    mut platform: Platform<S, A, D>,
    volumes: Volumes,
    seed: u64,
) where
    S: SurfaceProvider,
    A: AudioService,
    D: DialogHost,
{
    let clock = Instant::now();
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new(seed, 0);
    let mut phase = LoopPhase::Stopped;

    platform.audio.set_music_volume(volumes.music);
    platform.audio.set_sfx_volume(volumes.sfx);
    platform.audio.start_music();
    log::info!("game loop started (seed {seed})");

    // The running flag is only observed here, never mid-tick
    while running.load(Ordering::Acquire) {
        if !platform.surface.is_ready() {
            thread::sleep(Duration::from_millis(SURFACE_POLL_MS));
            continue;
        }
        if phase == LoopPhase::Stopped {
            phase = LoopPhase::Running;
            log::info!("surface ready, simulation running");
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        let tick_input = input.drain();

        let was_over = state.game_over;
        let events = sim::tick(&mut state, &tick_input, now_ms, &mut rng);

        if was_over && !state.game_over {
            phase = LoopPhase::Running;
            platform.audio.start_music();
        }

        sounds.dispatch(&mut platform.audio, &events);
        if events
            .iter()
            .any(|ev| matches!(ev, GameEvent::GameOver { .. }))
        {
            phase = LoopPhase::GameOver;
            platform.dialog.show_game_over(state.score);
        }

        // Render every iteration, game over included
        renderer.present(&mut platform.surface, &state, now_ms);

        thread::sleep(Duration::from_millis(TICK_MS));
    }

    log::info!("game loop stopped");
}
