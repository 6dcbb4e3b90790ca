use imgpath::algorithm::solve;
use imgpath::config::{Cli, Config};
use imgpath::raster;
use imgpath::Error;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::from(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    };
    config.override_from_command_line(cli)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let input_path = config.input_path.as_deref().context("no input image")?;
    let output_path = config.output_path.as_deref().context("no output image")?;

    let mut img = raster::open(input_path)?;
    let task = raster::locate_task(&img, &config.colors)?;
    let mut map = raster::load_grid(&img, config.colors.obstacle)?;

    let (path, stats) = solve(&mut map, &task, &config.search_options())?;
    info!("Found path in {}s", stats.time_us as f64 / 1e6);
    stats.print();

    raster::draw_path(&mut img, &path, &config.colors);
    raster::save(&img, output_path)?;

    if let Some(json_path) = &config.path_json {
        let file = std::fs::File::create(json_path)
            .with_context(|| format!("cannot create {json_path}"))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &path)
            .map_err(Error::from)?;
        info!("Wrote path to {json_path}");
    }

    Ok(())
}
