//! trirast: render a scene once to PNG, or interactively in a window
//!
//! Controls in the window:
//! - A / D: rotate the model by +10 / -10 degrees about the scene axis
//! - Escape: quit

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use macroquad::prelude::*;
use trirast::config::{RasterConfig, SceneConfig};
use trirast::output::{save_png, texture_size, to_rgba8};
use trirast::rasterizer::{RasterResult, Rasterizer};
use trirast::scene::Scene;
use trirast::VERSION;

/// Rotation applied per key press (degrees)
const ANGLE_STEP: f32 = 10.0;

#[derive(Parser, Debug)]
#[command(name = "trirast", version, about = "Software triangle rasterizer with 2x2 supersampling")]
struct Cli {
    /// Model rotation in degrees (defaults to the scene's starting angle)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    angle: Option<f32>,

    /// Render a single frame to this PNG and exit
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scene file (RON); the built-in two-triangle scene otherwise
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Rasterizer config file (RON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn window_conf(width: u16, height: u16) -> Conf {
    Conf {
        window_title: format!("trirast v{}", VERSION),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> RasterResult<()> {
    let config = match &cli.config {
        Some(path) => RasterConfig::load(path)?,
        None => RasterConfig::default(),
    };
    let scene_config = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let angle = cli.angle.unwrap_or(scene_config.angle);

    let mut raster = Rasterizer::with_config(config)?;
    let scene = Scene::load(&mut raster, scene_config);

    if let Some(path) = cli.output {
        scene.render(&mut raster, angle)?;
        return save_png(&raster, path);
    }

    let (width, height) = texture_size(&raster)?;
    let conf = window_conf(width, height);
    macroquad::Window::from_config(conf, viewer(raster, scene, angle, (width, height)));
    Ok(())
}

async fn viewer(mut raster: Rasterizer, scene: Scene, mut angle: f32, (width, height): (u16, u16)) {
    let mut frame_count: u64 = 0;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::A) {
            angle += ANGLE_STEP;
        } else if is_key_pressed(KeyCode::D) {
            angle -= ANGLE_STEP;
        }

        if let Err(e) = scene.render(&mut raster, angle) {
            log::error!("{}", e);
            break;
        }

        let texture = Texture2D::from_rgba8(width, height, &to_rgba8(&raster));
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        log::debug!("frame count: {}", frame_count);
        frame_count += 1;

        next_frame().await;
    }
}
