//! Tile request generator CLI.

use std::process::ExitCode;

use clap::CommandFactory;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tile_request::cli::{self, Args};
use tile_request::{RequestError, RequestRunner, SummaryFormat, SummaryReport};

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().collect();

    if cli::wants_usage(&raw) {
        eprintln!("{}", Args::command().render_help());
        return ExitCode::FAILURE;
    }

    let args = match Args::parse_legacy(&raw) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            if e.downcast_ref::<RequestError>().is_some_and(RequestError::is_usage) {
                eprintln!();
                eprintln!("{}", Args::command().render_help());
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let summary_format = args.summary;
    let config = args.into_plan()?.validate()?;

    let summary = RequestRunner::new(config).run()?;

    match summary_format {
        SummaryFormat::Table => eprintln!("{}", SummaryReport::format_table(&summary)),
        SummaryFormat::Json => eprintln!("{}", SummaryReport::format_json(&summary)?),
        SummaryFormat::Off => {}
    }
    Ok(())
}
