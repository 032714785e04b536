//! Lucid Tasks desktop client.

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::{launch, BridgeConfig};
use controller::events::UiEvent;
use motion::MotionConfig;
use ui::{DesktopGuiApp, PersistedSettings, SETTINGS_STORAGE_KEY};

#[derive(Debug, Parser)]
#[command(name = "lucid-tasks", about = "Task dashboard with a staged entry flow")]
struct Args {
    /// Task server base URL.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,

    /// Run against the in-process demo backend instead of a server.
    #[arg(long)]
    demo: bool,

    /// Collapse all animation to end states.
    #[arg(long)]
    reduce_motion: bool,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let motion_config = if args.reduce_motion {
        MotionConfig::new(true)
    } else {
        MotionConfig::from_env()
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(
        BridgeConfig {
            server_url: args.server_url,
            demo: args.demo,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Lucid Tasks")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([840.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Lucid Tasks",
        options,
        Box::new(move |cc| {
            let settings = cc
                .storage
                .and_then(|storage| storage.get_string(SETTINGS_STORAGE_KEY))
                .and_then(|text| serde_json::from_str::<PersistedSettings>(&text).ok())
                .unwrap_or_default();
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx,
                ui_rx,
                motion_config,
                settings,
            )))
        }),
    )
}
