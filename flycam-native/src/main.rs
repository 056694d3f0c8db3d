mod app;
mod input;
mod renderer;
mod scene;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flycam_core::CameraConfig;

use crate::app::AppOptions;
use crate::scene::SceneKind;

/// Replays the OpenGL course scenes on wgpu with a shared fly camera.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli
{
  /// Which tutorial scene to show
  #[arg(long, value_enum, default_value_t = SceneKind::Lighting)]
  scene: SceneKind,

  /// JSON camera configuration (initial pose, speed, sensitivity, zoom range)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Don't build the camera HUD overlay
  #[arg(long)]
  no_hud: bool,

  /// Capture the cursor and steer with raw mouse motion
  #[arg(long)]
  grab_cursor: bool,
}

fn main() -> ExitCode
{
  // Set RUST_LOG=debug or RUST_LOG=wgpu=debug for more verbose GPU output.
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,wgpu_hal=off,naga=warn"))
    .init();

  let cli = Cli::parse();

  match run(cli)
  {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) =>
    {
      log::error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> anyhow::Result<()>
{
  let camera = match &cli.config
  {
    Some(path) => CameraConfig::load(path)?,
    None => CameraConfig::default(),
  };

  log::debug!("Camera config: {camera:?}");

  app::run(AppOptions { scene: cli.scene, camera, hud: !cli.no_hud, grab_cursor: cli.grab_cursor })
}
