use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::warn;
use wikimatch::{
    config::Settings,
    info_time,
    process::BatchController,
    request::HttpFetcher,
    tsv::{self, MatchWriter},
    Error, Result, INPUT_PATH, OUTPUT_PATH,
};

#[derive(Parser)]
#[command(name = "wikimatch", about = "Match airports to travel-wiki pages")]
struct Cli {
    /// Airport id to resume from. Rows before it are skipped and output is appended
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    start_id: Option<u64>,
    /// TSV of `airportId  airportIATA  airportName  locationsServed`
    #[arg(short, long, default_value = INPUT_PATH)]
    input: PathBuf,
    /// TSV of `airportId  url  rank`
    #[arg(short, long, default_value = OUTPUT_PATH)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let start_time = Local::now();
    let cli = Cli::parse();

    let settings = Settings::default().with_start_id(cli.start_id);
    let fetcher = HttpFetcher::new(&settings)?;
    let mut reader = tsv::open_reader(&cli.input)?;
    let writer = MatchWriter::create(&cli.output, cli.start_id.is_some())?;

    // First ctrl-c stops before the next request, a second one quits right away.
    let (stop_tx, stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Stopping before the next request. Press ctrl-c again to quit now");
            let _ = stop_tx.send(());
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    let mut controller =
        BatchController::new(settings, fetcher, writer).with_stop_signal(stop_rx);
    match controller.run(&mut reader).await {
        Ok(_) => {}
        Err(Error::Cancelled(airport_id)) => {
            warn!("Stopped. Restart with start id {airport_id} to resume");
        }
        Err(e) => return Err(e),
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}
