//! OBJ viewer with fly-through controls
//!
//! Loads one model into an otherwise empty scene and hands it to [`KilnApp`].
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use kiln::prelude::*;

#[derive(Parser, Debug, Clone)]
#[command(name = "kiln-viewer")]
#[command(about = "View an OBJ model with fly-through controls", long_about = None)]
struct Cli {
    /// Model file, relative to the models directory
    #[arg(default_value = "cube.obj")]
    model: PathBuf,

    /// Directory models are resolved against
    #[arg(long, default_value = "assets/models")]
    models_dir: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frame-rate ceiling, 0 for none
    #[arg(long, default_value_t = 120)]
    max_fps: u32,

    /// Present without waiting for vertical blank
    #[arg(long = "no-vsync", default_value = "false")]
    no_vsync: bool,

    /// Model position as x,y,z
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 3,
        allow_negative_numbers = true,
        default_values_t = [0.0, 0.0, 2.5]
    )]
    position: Vec<f32>,

    /// Uniform model scale
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Camera speed in units per second
    #[arg(long, default_value_t = 1.0)]
    velocity: f32,

    /// Look speed in degrees per mouse unit per second
    #[arg(long, default_value_t = 6.0)]
    look_sensitivity: f32,

    /// Object drag speed in degrees per mouse unit per second
    #[arg(long, default_value_t = 12.0)]
    drag_sensitivity: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Viewing {} from {}", cli.model.display(), cli.models_dir.display());

    let config = AppConfig::default()
        .with_title(&format!("Kiln - {}", cli.model.display()))
        .with_size(cli.width, cli.height)
        .with_max_fps(cli.max_fps)
        .with_vsync(!cli.no_vsync)
        .with_models_dir(cli.models_dir)
        .with_controls(
            ControlConfig::default()
                .with_velocity(cli.velocity)
                .with_look_sensitivity(cli.look_sensitivity)
                .with_drag_sensitivity(cli.drag_sensitivity),
        );

    let model = cli.model;
    let (x, y, z) = match cli.position[..] {
        [x, y, z] => (x, y, z),
        _ => anyhow::bail!("--position takes exactly three values"),
    };
    let scale = cli.scale;

    let mut app = KilnApp::new(config);
    app.on_setup(move |scene, resources| {
        let mesh = resources.load_model(&model)?;
        let handle = scene.create_object(Some(mesh));
        if let Some(object) = scene.object_mut(handle) {
            object.set_position(x, y, z);
            object.set_uniform_scale(scale);
        }
        Ok(())
    });

    app.run().context("viewer stopped with an error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kiln-viewer"]).unwrap();
        assert_eq!(cli.model, PathBuf::from("cube.obj"));
        assert_eq!(cli.position, vec![0.0, 0.0, 2.5]);
        assert!(!cli.no_vsync);
    }

    #[test]
    fn test_position_accepts_negative_components() {
        let cli =
            Cli::try_parse_from(["kiln-viewer", "teapot.obj", "--position", "0,-0.3,2.5"]).unwrap();
        assert_eq!(cli.model, PathBuf::from("teapot.obj"));
        assert_eq!(cli.position, vec![0.0, -0.3, 2.5]);
    }
}
