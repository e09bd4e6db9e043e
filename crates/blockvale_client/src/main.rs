mod chest;
mod chunk_manager;
mod edit;
mod game_loop;
mod renderer;
mod session;
mod settings;

use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use blockvale_shared::block::{register_default_blocks, BlockId};
use blockvale_shared::hash::parse_seed;
use glam::IVec3;
use tracing::{info, warn};

use game_loop::{run_frames, FixedRateScheduler};
use session::{EditCommand, Session};
use settings::ClientSettings;

const DEFAULT_SETTINGS_PATH: &str = "blockvale.toml";

fn main() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let mut settings_path = PathBuf::from(DEFAULT_SETTINGS_PATH);
    let mut seed_override: Option<u64> = None;
    let mut frames_override: Option<u64> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(value) = args.next() else {
                    eprintln!("--config expects a path argument");
                    std::process::exit(2);
                };
                settings_path = PathBuf::from(value);
            }
            "--seed" => {
                let Some(value) = args.next() else {
                    eprintln!("--seed expects a number or any text");
                    std::process::exit(2);
                };
                seed_override = Some(parse_seed(&value));
            }
            "--frames" => {
                let Some(value) = args.next() else {
                    eprintln!("--frames expects a numeric argument");
                    std::process::exit(2);
                };
                match value.parse::<u64>() {
                    Ok(parsed) => frames_override = Some(parsed),
                    Err(err) => {
                        eprintln!("invalid frame count '{value}': {err}");
                        std::process::exit(2);
                    }
                }
            }
            "--help" | "-h" => {
                println!("Usage: blockvale_client [--config <path>] [--seed <seed>] [--frames <n>]");
                return;
            }
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }

    let mut settings = match ClientSettings::load_or_create(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    if let Some(frames) = frames_override {
        settings.frames = frames;
    }
    let seed = seed_override.unwrap_or_else(|| settings.resolve_seed());

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        eprintln!("\nShutdown signal received, stopping...");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl+C handler: {err}");
    }

    info!(
        "Starting Blockvale client (seed {seed}, view distance {}, {:?} mode)",
        settings.view_distance, settings.game_mode
    );

    let mut session = Session::from_settings(&settings, seed, register_default_blocks());
    queue_spawn_edits(&mut session);

    let frame_limit = (settings.frames > 0).then_some(settings.frames);
    let mut scheduler = FixedRateScheduler::new(settings.tick_rate, frame_limit, running);
    info!(
        "Running at {} ticks/s ({:?} per tick)",
        settings.tick_rate,
        scheduler.tick_duration()
    );
    run_frames(&mut session, &mut scheduler);

    let report = session.report();
    let pass = session.last_pass();
    info!(
        "Ran {} frames: {} chunks loaded, {} meshed, {} uploads, {} disposals, {} live meshes ({} buffer bytes)",
        report.frames,
        report.loaded_chunks,
        report.meshed_chunks,
        report.mesh_uploads,
        report.mesh_disposals,
        session.manager().backend().live_handle_count(),
        report.live_buffer_bytes
    );
    info!(
        "Viewer ended at {}; last frame drew {} chunks ({} quads, {} vertices, {} indices); edits {} applied, {} rejected; {} loot stacks, {} drops",
        report.viewer,
        pass.rendered_chunks,
        pass.rendered_quads,
        pass.rendered_vertices,
        pass.rendered_indices,
        report.edits_applied,
        report.edits_rejected,
        report.loot.len(),
        report.drops.len()
    );
}

/// Digs out the ground under the spawn point and marks it with glowstone.
fn queue_spawn_edits(session: &mut Session) {
    let viewer = session.viewer();
    let ground = IVec3::new(
        viewer.x.floor() as i32,
        session
            .world()
            .generator()
            .sample_column(viewer.x.floor() as i32, viewer.z.floor() as i32)
            .height,
        viewer.z.floor() as i32,
    );
    session.queue_edit(EditCommand::Break(ground));
    session.queue_edit(EditCommand::Place(ground, BlockId::GLOWSTONE));
}
