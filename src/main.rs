use std::env;
use std::path::PathBuf;

use anyhow::bail;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paperboy::config::Config;
use paperboy::pipeline;

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    feeds_override: Option<PathBuf>,
    output_override: Option<PathBuf>,
    show_help: bool,
}

/// Minimal CLI: optional flags plus an optional positional output directory.
/// Unrecognized options are rejected rather than being mistaken for the
/// output directory.
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(path) = args.next() {
                    parsed.config_path = Some(PathBuf::from(path));
                }
            }
            "--feeds" => {
                if let Some(path) = args.next() {
                    parsed.feeds_override = Some(PathBuf::from(path));
                }
            }
            "-h" | "--help" => {
                parsed.show_help = true;
                return Ok(parsed);
            }
            other if other.starts_with('-') => {
                bail!("unrecognized option: {other} (try --help)");
            }
            other => {
                parsed.output_override = Some(PathBuf::from(other));
            }
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics to stderr; normal progress stays on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperboy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args(env::args().skip(1))?;
    if args.show_help {
        print_help();
        return Ok(());
    }

    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default("paperboy.toml")?,
    };
    if let Some(feeds) = args.feeds_override {
        config.feeds_file = feeds;
    }
    if let Some(output) = args.output_override {
        config.output_dir = output;
    }

    let summary = pipeline::run(&config).await?;
    println!(
        "Wrote {} stories and updated {}",
        summary.stories_written,
        summary.index_file.display()
    );

    Ok(())
}

fn print_help() {
    println!("paperboy");
    println!("Usage: paperboy [--config <path>] [--feeds <path>] [output_dir]");
    println!("  --config <path>  Path to a paperboy.toml");
    println!("  --feeds <path>   Path to a feed list (one URL per line)");
    println!("  output_dir       Where to write index.html and stories/ (default: .)");
}
