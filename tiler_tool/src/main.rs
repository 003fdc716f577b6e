mod config;
mod geometry_io;

use std::fs::File;
use std::io;
use std::process;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use tiler::clip::{self, ClipError};

use crate::config::ClipConfig;

#[derive(Parser)]
#[command(about = "Vector geometry clipping tool")]
struct TilerToolCommand {
    #[command(subcommand)]
    subcommand: TilerToolSubcommand,
}

#[derive(Args)]
struct ClipArgs {
    /// Window minimum on the X axis
    xmin: f64,
    /// Window maximum on the X axis
    xmax: f64,
    /// Window minimum on the Y axis
    ymin: f64,
    /// Window maximum on the Y axis
    ymax: f64,
    /// Where to write the clipped geometry
    #[arg(default_value = "clipped.json")]
    output_path: String,
}

#[derive(Args)]
struct BatchArgs {
    /// Path to a json file listing named clip windows.
    /// Example of json:
    /// { "windows": [ { "name": "downtown", "enabled": true, "xmin": -75.20, "xmax": -75.10, "ymin": 39.90, "ymax": 40.0, "outputPath": "downtown.json" } ] }
    config_path: String,
}

#[derive(Subcommand)]
enum TilerToolSubcommand {
    #[command(about = "Clip a geometry read from stdin by a rectangular window")]
    Clip(ClipArgs),
    #[command(about = "Clip a geometry read from stdin by every window in a config file")]
    Batch(BatchArgs),
}

fn main() {
    env_logger::init();
    let cmd = TilerToolCommand::parse();

    match cmd.subcommand {
        TilerToolSubcommand::Clip(args) => {
            let geometry = geometry_io::read_geometry(io::stdin())
                .expect("Could not read geometry from stdin");
            match clip::by_rectangle(&geometry, args.xmin, args.xmax, args.ymin, args.ymax) {
                Ok(clipped) => {
                    geometry_io::write_geometry(&clipped, &args.output_path)
                        .expect("Could not write clipped geometry");
                }
                Err(ClipError::EmptyResult) => {
                    println!("Empty clip");
                    process::exit(1);
                }
                Err(err) => panic!("Clip failed: {err}"),
            }
        }
        TilerToolSubcommand::Batch(args) => {
            let clip_config: ClipConfig = serde_json::from_reader(
                File::open(args.config_path).expect("Could not open config file"),
            )
            .expect("JSON was not well-formatted");

            let geometry = geometry_io::read_geometry(io::stdin())
                .expect("Could not read geometry from stdin");

            let batch_ts = Instant::now();
            for window in clip_config.windows {
                if !window.enabled {
                    info!("Window {} disabled", window.name);
                    continue;
                }
                match clip::by_rectangle(
                    &geometry,
                    window.xmin,
                    window.xmax,
                    window.ymin,
                    window.ymax,
                ) {
                    Ok(clipped) => {
                        geometry_io::write_geometry(&clipped, &window.output_path)
                            .expect("Could not write clipped geometry");
                        info!("Window {} written to {}", window.name, window.output_path);
                    }
                    Err(ClipError::EmptyResult) => {
                        warn!("Window {} clipped to nothing", window.name);
                    }
                    Err(err) => panic!("Clip failed for window {}: {err}", window.name),
                }
            }
            println!("Total batch time: {:?}", batch_ts.elapsed());
        }
    }
}
