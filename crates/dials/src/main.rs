//! Headless dials host.
//!
//! Usage:
//!   dials                                  # Replay the demo gesture on the default panel
//!   dials --config panel.toml              # Use a panel description
//!   dials --session gestures.toml          # Replay recorded pointer samples
//!   dials --snapshot panel.png             # Write the shared texture when done
//!   dials --print-config                   # Print the default panel as TOML

mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dials_ui::{
    overlay_quad, Button, ColorSlider, CpuTexture, Options, PanelConfig, Settings, Slider, Widget,
};
use parking_lot::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "dials")]
#[command(about = "Drive a settings panel from a pointer session and snapshot its texture")]
struct Cli {
    /// Panel description (TOML). Defaults to the built-in panel.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pointer session (TOML). Defaults to the built-in demo gesture.
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Write the texture to this PNG after the session.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the panel configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let session = match &cli.session {
        Some(path) => Session::load(path)?,
        None => Session::demo(),
    };

    let texture = Arc::new(Mutex::new(CpuTexture::new(
        config.texture_width,
        config.texture_height,
    )));
    let mut settings = Settings::from_config(&config, Arc::clone(&texture))?;
    attach_logging(&mut settings);

    #[allow(clippy::cast_precision_loss)]
    let size = (config.texture_width as f32, config.texture_height as f32);
    let quad = overlay_quad(0.0, 0.0, size.0, size.1, (800.0, 600.0), size);
    tracing::debug!(?quad, "overlay quad for an 800x600 window");

    let before = texture.lock().write_count();
    for sample in &session.samples {
        settings.pointer(*sample);
    }
    let uploads = texture.lock().write_count() - before;
    info!(samples = session.samples.len(), uploads, "session replayed");

    report(&settings);

    if let Some(path) = &cli.snapshot {
        let texture = texture.lock();
        let image = image::RgbImage::from_raw(
            texture.width(),
            texture.height(),
            texture.as_bytes().to_vec(),
        )
        .context("texture size does not match its pixel buffer")?;
        image
            .save(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

/// Logs every value change at `info`.
fn attach_logging(settings: &mut Settings<Arc<Mutex<CpuTexture>>>) {
    let ids: Vec<_> = settings.ids().collect();
    for id in ids {
        let Some(label) = settings.widget(id).map(|w| w.label().to_string()) else {
            continue;
        };
        if let Some(slider) = settings.get_mut::<Slider>(id) {
            slider.set_on_change(move |value| info!(widget = %label, value, "slider changed"));
        } else if let Some(button) = settings.get_mut::<Button>(id) {
            button.set_on_click(move || info!(widget = %label, "button clicked"));
        } else if let Some(options) = settings.get_mut::<Options>(id) {
            options.set_on_change(move |value| info!(widget = %label, value, "option selected"));
        } else if let Some(color) = settings.get_mut::<ColorSlider>(id) {
            color.set_on_change(move |value| info!(widget = %label, %value, "colour changed"));
        }
    }
}

/// Logs the final state of every widget.
fn report(settings: &Settings<Arc<Mutex<CpuTexture>>>) {
    for id in settings.ids() {
        if let Some(slider) = settings.get::<Slider>(id) {
            info!(widget = slider.label(), value = slider.value(), "final");
        } else if let Some(options) = settings.get::<Options>(id) {
            info!(widget = options.label(), value = options.value(), "final");
        } else if let Some(color) = settings.get::<ColorSlider>(id) {
            info!(widget = color.label(), value = %color.value(), "final");
        }
    }
}
