use anyhow::anyhow;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::algorithm::SearchOptions;
use crate::cell::Metric;

#[derive(Parser, Debug)]
#[command(
    name = "imgpath",
    about = "Uses A* to find a path from the red pixel to the blue pixel in an image.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(help = "Input image")]
    pub input: Option<String>,

    #[arg(help = "Output image, the input with the path drawn in")]
    pub output: Option<String>,

    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Cost model for steps and the goal estimate")]
    pub metric: Option<Metric>,

    #[arg(long, help = "Give up after this many expanded cells")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Also write the path as JSON to this file")]
    pub path_json: Option<String>,

    #[arg(long, help = "Log filter, e.g. info or imgpath=debug")]
    pub log_level: Option<String>,
}

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    pub start: Rgb,
    pub goal: Rgb,
    pub obstacle: Rgb,
    pub path: Rgb,
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            start: [255, 0, 0],
            goal: [0, 0, 255],
            obstacle: [0, 0, 0],
            path: [0, 255, 0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub path_json: Option<String>,
    pub colors: Colors,
    pub metric: Metric,
    pub max_expansions: Option<usize>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: None,
            output_path: None,
            path_json: None,
            colors: Colors::default(),
            metric: Metric::default(),
            max_expansions: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Command-line values win over the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(input) = &cli.input {
            self.input_path = Some(input.clone());
        }
        if let Some(output) = &cli.output {
            self.output_path = Some(output.clone());
        }
        if let Some(path_json) = &cli.path_json {
            self.path_json = Some(path_json.clone());
        }
        if let Some(metric) = cli.metric {
            self.metric = metric;
        }
        if let Some(max_expansions) = cli.max_expansions {
            self.max_expansions = Some(max_expansions);
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.input_path.is_none() {
            return Err(anyhow!("No input image given"));
        }
        if self.output_path.is_none() {
            return Err(anyhow!("No output image given"));
        }

        let colors = &self.colors;
        let markers = [
            ("start", colors.start),
            ("goal", colors.goal),
            ("obstacle", colors.obstacle),
        ];
        for (i, (name, color)) in markers.iter().enumerate() {
            if let Some((other, _)) = markers[i + 1..].iter().find(|(_, c)| c == color) {
                return Err(anyhow!(
                    "{name} and {other} colors must differ, both are {color:?}"
                ));
            }
        }

        if self.max_expansions == Some(0) {
            return Err(anyhow!("max_expansions must be greater than 0"));
        }
        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            metric: self.metric,
            max_expansions: self.max_expansions,
        }
    }
}
