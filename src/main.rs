//! keyflare main entry point.
//!
//! A transparent, click-through, always-on-top overlay that shows a short
//! animated effect for every key press, written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for the per-frame update schedule
//! - **image** for GIF/WebP decoding
//!
//! # Main Loop
//!
//! 1. Load `config.json` (written with defaults if missing)
//! 2. Open the overlay window covering the monitor
//! 3. Decode and upload the configured sprites, load the label font
//! 4. Start the audio thread and load the key sounds
//! 5. Install the keyboard hook (Windows) or window polling (elsewhere)
//! 6. Run the main loop until Ctrl+Alt+F:
//!    - drain key events, play sounds, spawn effects
//!    - advance animations and fade effects
//!    - draw effects over a transparent background
//! 7. Remove the hook, stop audio, release textures, close the window
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

use keyflare::components::tint::Tint;
use keyflare::overlay::{build_schedule, init_world, tick};
use keyflare::resources::audio::{AudioBridge, KeySounds, MAIN_SOUND_ID, setup_audio, shutdown_audio};
use keyflare::resources::gpu::RaylibUploader;
use keyflare::resources::keyfeed::key_feed;
use keyflare::resources::labelfont::LabelFont;
use keyflare::resources::overlayconfig::{DEFAULT_CONFIG_PATH, OverlayConfig};
use keyflare::resources::quit::QuitRequested;
use keyflare::resources::screensize::ScreenSize;
use keyflare::resources::spriteassets::SpriteAssets;
use keyflare::systems::render::{RaylibCanvas, render_key_effects};

/// Keystroke visual effects overlay
#[derive(Parser)]
#[command(version, about = "Shows an animated effect and plays a sound for every key press.")]
struct Cli {
    /// Configuration file; created with defaults if it does not exist.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    write_default_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default config and quit (no window/audio needed)
    if cli.write_default_config {
        if let Err(e) = OverlayConfig::default().save_to_file(&cli.config) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", cli.config.display());
        return;
    }

    if let Err(e) = run(&cli.config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config_path: &Path) -> Result<(), String> {
    let config = OverlayConfig::load_or_create(config_path);

    // --------------- Raylib window ---------------
    // A zero size makes raylib use the current monitor's resolution.
    let (mut rl, thread) = raylib::init()
        .size(0, 0)
        .transparent()
        .undecorated()
        .title("keyflare")
        .build();
    let state = rl
        .get_window_state()
        .set_window_topmost(true)
        .set_window_mouse_passthrough(true);
    rl.set_window_state(state);
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    info!("Overlay size: {}x{}", screen.w, screen.h);

    // --------------- Sprites, font, tint ---------------
    let assets = {
        let mut uploader = RaylibUploader::new(&mut rl, &thread);
        SpriteAssets::<Texture2D>::load_all(&config.images, &mut uploader)
    };
    let font = LabelFont::load(&mut rl, &thread, config.font_path());
    let tint = Tint::from_hex(&config.colorize);

    // --------------- ECS world ---------------
    let (key_tx, feed) = key_feed();
    let mut world = init_world(screen, assets, tint, feed);
    world.insert_resource(KeySounds::new(config.volume_fraction()));

    // --------------- Audio ---------------
    setup_audio(&mut world);
    {
        let bridge = world.resource::<AudioBridge>();
        bridge.load_fx(MAIN_SOUND_ID, config.main_sound.as_str());
        if let Err(e) = bridge.wait_for_fx(MAIN_SOUND_ID) {
            shutdown_audio(&mut world);
            return Err(format!("Failed to load main sound {}: {}", config.main_sound, e));
        }
        info!("Loaded main sound: {}", config.main_sound);
    }
    {
        let bridge = world.resource::<AudioBridge>();
        for (name, path) in config.per_key_overrides.iter() {
            bridge.load_fx(name.as_str(), path.as_str());
        }
    }

    // --------------- Key feed producer ---------------
    #[cfg(windows)]
    let hook = match keyflare::platform::windows::KeyboardHook::install(key_tx) {
        Ok(hook) => hook,
        Err(e) => {
            shutdown_audio(&mut world);
            return Err(e);
        }
    };
    #[cfg(not(windows))]
    let mut poller = {
        log::warn!("No global keyboard hook on this platform; only keys sent to the overlay window are seen");
        keyflare::platform::polling::WindowKeyPoller::new(key_tx)
    };

    let mut update = build_schedule::<Texture2D>();
    info!("Running. Press Ctrl+Alt+F to exit.");

    // --------------- Main loop ---------------
    while !rl.window_should_close() && !world.resource::<QuitRequested>().0 {
        #[cfg(not(windows))]
        poller.poll(&mut rl);

        let dt = rl.get_frame_time();
        tick(&mut world, &mut update, dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLANK);
        let mut canvas = RaylibCanvas::new(&mut d, &font);
        render_key_effects(&mut world, &mut canvas);
    }

    // --------------- Teardown ---------------
    #[cfg(windows)]
    drop(hook);
    shutdown_audio(&mut world);
    // Textures and the font must go before the window closes.
    drop(world);
    drop(font);
    info!("Bye");
    Ok(())
}
