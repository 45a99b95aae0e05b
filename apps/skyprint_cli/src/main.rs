mod notifier;
mod panels;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use skyprint::chart::{BirthData, TimePrecision};
use skyprint::{HttpBackend, Session, SessionSettings};
use std::path::PathBuf;
use std::sync::Arc;

use notifier::TerminalNotifier;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart, reading and upcoming transits")]
struct Args {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Birth time (HH:MM), omit when unknown
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,

    #[arg(long, default_value = "exact")]
    precision: TimePrecision,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    place: String,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// IANA timezone; defaults to transits.default_tz from the config
    #[arg(long)]
    tz: Option<String>,

    /// Config file (otherwise configs/skyprint.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the chart wheel as SVG
    #[arg(long)]
    svg_out: Option<PathBuf>,

    /// Stay running and alert on near-exact transits
    #[arg(long)]
    watch: bool,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = skyprint_config::load_settings(args.config.as_deref())?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();

    let tz = args
        .tz
        .clone()
        .unwrap_or_else(|| settings.transits.default_tz.clone());
    let birth = BirthData::new(
        &args.name,
        args.date,
        args.time,
        args.precision,
        &args.place,
        args.lat,
        args.lng,
        &tz,
    );

    let backend = HttpBackend::new(&settings.backend.base_url, settings.backend.timeout())
        .context("Failed to build HTTP client")?;
    let session = Session::new(
        Arc::new(backend),
        SessionSettings {
            base_url: settings.backend.base_url.clone(),
            transit_window_days: settings.transits.window_days,
            request_timeout: settings.backend.timeout(),
            alert_interval: settings.alerts.interval(),
            near_exact_orb: settings.alerts.near_exact_orb,
        },
    );

    println!("{}", skyprint::session::CALCULATING_MESSAGE);
    let outcome = match session.compute(birth).await {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("{}", e.user_message());
            return Err(e.into());
        }
    };

    print!("{}", panels::render_outcome(&outcome));

    if let Some(path) = &args.svg_out {
        std::fs::write(path, skyprint::to_svg(&outcome.wheel))
            .with_context(|| format!("Failed to write wheel SVG to {}", path.display()))?;
        log::info!("Wrote chart wheel to {}", path.display());
    }

    if args.watch {
        if let Err(e) = session.enable_alerts(Arc::new(TerminalNotifier)).await {
            println!("{}", e);
            return Ok(());
        }
        println!(
            "Watching for near-exact transits every {:?}. Ctrl-C to stop.",
            settings.alerts.interval()
        );
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        session.disable_alerts();
    }

    Ok(())
}
