use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use imagemap_edit::app::ImageMapApp;
use imagemap_edit::{EditorConfig, Error};

#[derive(Parser, Debug)]
#[command(name = "imagemap-edit")]
#[command(version, about = "Draw clickable regions over an image and export an HTML image map")]
struct Cli {
    /// Image to open on startup
    image: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/imagemap-edit/config.json)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match EditorConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(Error::NoConfigDir) => EditorConfig::default(),
        Err(e) => return Err(e).context("Failed to load configuration"),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();
    log::debug!("Config: {:?}", config);

    let title = match cli.image.as_ref().and_then(|p| p.file_name()) {
        Some(name) => format!("imagemap-edit - {}", name.to_string_lossy()),
        None => "imagemap-edit".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(&title),
        ..Default::default()
    };

    let image = cli.image;
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ImageMapApp::new(config, image)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {e}"))
}
