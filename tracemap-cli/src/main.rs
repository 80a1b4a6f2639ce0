use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tracemap::{
    Config, Verdict, build_roads, road_network_from_csv, roads_to_geojson, scan_trace_file,
    validate_corridors,
};

/// Distill a floating-car-data trace into playback trajectories, a
/// congestion map and a corridor validation report.
#[derive(Parser, Debug)]
#[command(name = "tracemap", version, about)]
struct Args {
    /// Trace file (one tag per line, geographic vehicle positions)
    #[arg(long)]
    trace: PathBuf,
    /// Road segment table (CSV)
    #[arg(long)]
    network: PathBuf,
    /// Pipeline configuration (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config '{}'", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config '{}'", path.display()))?
        }
        None => Config::default(),
    };

    let network = road_network_from_csv(&args.network, config.projection.clone())
        .with_context(|| format!("loading network '{}'", args.network.display()))?;

    let outcome = scan_trace_file(&args.trace, &config)
        .with_context(|| format!("scanning trace '{}'", args.trace.display()))?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory '{}'", args.out_dir.display()))?;

    write_json(&args.out_dir.join("trips.json"), &outcome.trajectories)?;

    let roads = build_roads(&network, &outcome.edge_speeds, &config.congestion);
    let collection = roads_to_geojson(&roads, &network.projection, &config.congestion)?;
    write_json(&args.out_dir.join("congestion.geojson"), &collection)?;

    let reports = validate_corridors(&network, &outcome.edge_speeds, &config.corridors);
    write_json(&args.out_dir.join("validation.json"), &reports)?;

    for report in &reports {
        match (report.simulated_kmh, report.ratio) {
            (Some(simulated), Some(ratio)) => info!(
                "{:<28} ref {:>5.1} km/h | sim {:>5.1} km/h | x{:.1} | {}",
                report.name,
                report.reference_kmh,
                simulated,
                ratio,
                verdict_label(report.verdict)
            ),
            _ => info!(
                "{:<28} ref {:>5.1} km/h | no data",
                report.name, report.reference_kmh
            ),
        }
    }

    Ok(())
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Good => "good",
        Verdict::NeedsTuning => "needs tuning",
        Verdict::UnderCongested => "model under-congests",
        Verdict::NoData => "no data",
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("creating '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("writing '{}'", path.display()))?;
    writer.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}
