use figure8::{ScenarioConfig, Simulation, RenderStyle, Viewport};
use figure8::{run_2d, run_headless};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Figure-eight three-body orbit")]
struct Args {
    /// Scenario YAML, as a path or a name under `scenarios/`. Defaults are used when omitted.
    #[arg(short, long)]
    file: Option<String>,

    /// Run this many frames without a window and log a report
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Headless viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Headless viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

// resolve here to keep main clean
fn load_scenario(file: Option<&str>) -> Result<ScenarioConfig> {
    let Some(file_name) = file else {
        log::info!("no scenario file given, using built-in defaults");
        return Ok(ScenarioConfig::default());
    };

    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    log::info!("loaded scenario {}", config_path.display());
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario_cfg = load_scenario(args.file.as_deref())?;
    log::debug!("{:?}", scenario_cfg);

    let simulation = Simulation::build_scenario(&scenario_cfg);
    let style = RenderStyle::from(&scenario_cfg.render);
    log::info!(
        "G = {}, dt = {}, softening = {:e}, {} bodies",
        simulation.parameters.G,
        simulation.parameters.dt,
        simulation.parameters.softening,
        simulation.bodies().len()
    );

    match args.headless {
        Some(frames) => {
            run_headless(simulation, Viewport::new(args.width, args.height), style, frames);
        }
        None => run_2d(simulation, style),
    }

    Ok(())
}
