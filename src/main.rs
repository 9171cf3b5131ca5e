use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use orrery_scene::{WorldFile, build_world};

mod app;

use app::{App, AppOptions};

#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Fly through a Keplerian model of a planetary system")]
struct Args {
    /// World file describing bodies, belts, sky and camera start
    #[arg(long, default_value = "assets/worlds/solar.toml")]
    world: PathBuf,
    /// Directory texture and model paths in the world file are relative to
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    #[arg(long, default_value_t = 1280)]
    width: i32,
    #[arg(long, default_value_t = 720)]
    height: i32,
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Overrides RUST_LOG (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<log::LevelFilter>,
    /// Reload the world when its file changes on disk
    #[arg(long)]
    watch_world: bool,
    /// Start with the clock stopped
    #[arg(long)]
    paused: bool,
}

fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_level);

    let file = WorldFile::from_path(&args.world)?;
    let world = build_world(&file);
    if !world.report.is_clean() {
        log::warn!(
            "{} dropped {} record(s); see warnings above",
            args.world.display(),
            world.report.dropped.len()
        );
    }

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Orrery")
        .resizable()
        .build();
    rl.set_target_fps(args.fps);

    let mut app = App::new(
        &mut rl,
        &thread,
        world,
        AppOptions {
            world_path: args.world,
            assets_root: args.assets,
            watch_world: args.watch_world,
            paused: args.paused,
        },
    );

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        app.step(&mut rl, &thread, dt);
        app.render(&mut rl, &thread);
    }
    Ok(())
}
