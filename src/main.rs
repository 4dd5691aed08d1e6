use std::io::Write;

use anyhow::{Context, Result};
use ohlc_chart::ChartOptions;

pub mod api;
pub mod cli;
pub mod config;
pub mod logger;
pub mod path_env;
pub mod settings;
pub mod terminal;

use cli::Args;
use settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Must run while the process is still single threaded.
    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);

    let bin_name = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(err.code);
        }
    };

    let args = match command {
        cli::Command::Help => {
            println!("{}", cli::help_text(&bin_name));
            return;
        }
        cli::Command::Version => {
            println!("{}", cli::version_text());
            return;
        }
        cli::Command::Run(args) => args,
    };

    let _guard = logger::init(offset);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "starting"
    );

    if let Err(err) = run(&args, offset).await {
        tracing::error!(error = %format!("{err:#}"), "run failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(args: &Args, offset: time::UtcOffset) -> Result<()> {
    let settings = Settings::merge(args, config::load(&args.config));
    let dimensions = terminal::dimensions(&settings, terminal::size());
    let area = ohlc_chart::compose(dimensions)?;
    let periods = settings
        .periods
        .unwrap_or_else(|| settings::auto_periods(area.cols, settings.format));

    let options = ChartOptions {
        pair: settings.pair.clone(),
        interval: settings.interval,
        format: settings.format,
        dot_values: settings.dot_values,
        dimensions,
        capabilities: terminal::capabilities(&settings),
    };
    tracing::debug!(?options, periods, "resolved chart options");

    println!(
        "Fetching {periods} periods of {} data ({})...",
        options.pair, options.interval
    );
    let bars = api::fetch_bars(&options.pair, options.interval, periods, offset)
        .await
        .with_context(|| format!("could not fetch {} prices", options.pair))?;

    let lines = ohlc_chart::render(&bars, &options)?;

    let mut stdout = std::io::stdout().lock();
    for line in &lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}
