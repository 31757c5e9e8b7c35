//! `vizumap [config.json]`
//!
//! Renders the figure and tooltips as JSON lines on stdout and reads hover
//! events as JSON lines from stdin. Logs go to stderr.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use vizumap::session::HoverEvent;
use vizumap::table::load_rows;
use vizumap::{
    HoverResolver, JsonLinesSurface, PlotSession, PointIndexTable, ThumbnailCodec, VizConfig,
};

fn main() {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match VizConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {:?}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => VizConfig::load_from_default_path().unwrap_or_default(),
    };

    // RUST_LOG, when set, overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &VizConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading embeddings from {:?}", config.input_file);
    let rows = load_rows(&config.input_file, &config.columns, config.display_fraction)?;
    let table = PointIndexTable::build(rows)?;

    let report = table.report();
    log::info!(
        "Plotting {} points ({} rows dropped)",
        report.kept,
        report.dropped
    );

    let codec = ThumbnailCodec::new().with_quality(config.thumbnail.jpeg_quality);
    let resolver = Arc::new(
        HoverResolver::with_cache(Arc::new(table), config.cache_capacity).with_codec(codec),
    );
    let surface = JsonLinesSurface::new(io::stdout());
    let mut session = PlotSession::start(resolver, config.display_config(), surface)?;

    let (events_tx, events_rx) = crossbeam_channel::unbounded();
    thread::Builder::new()
        .name("stdin-events".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Failed to read hover event: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<HoverEvent>(&line) {
                    Ok(event) => {
                        if events_tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("Ignoring malformed hover event {:?}: {}", line, e),
                }
            }
        })?;

    session.run(events_rx)?;
    session.stop();
    Ok(())
}
