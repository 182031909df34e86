//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod pages;
pub mod parse;
pub mod run;

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use gstocr_core::models::config::GstocrConfig;

/// Load the configuration named on the command line, else the user config
/// file if one exists, else the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GstocrConfig> {
    if let Some(path) = config_path {
        return Ok(GstocrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(GstocrConfig::from_file(&default_path)?)
    } else {
        Ok(GstocrConfig::default())
    }
}

/// Progress bar counting processed files.
pub fn file_progress(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {}",
                unit
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
