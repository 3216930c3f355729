mod app;
mod lsdb;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the LSDB snapshot artifact (lsadump JSON)
    #[arg(long, default_value = "lsadump.json")]
    snapshot: PathBuf,

    /// Path to the companion plain-text LSDB change log
    #[arg(long)]
    log: Option<PathBuf>,

    /// Re-read the snapshot every N seconds
    #[arg(long)]
    refresh_secs: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "lsdbscope",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LsdbScopeApp::new(
                cc,
                args.snapshot.clone(),
                args.log.clone(),
                args.refresh_secs,
            )))
        }),
    )
}
