//! ingestkit - fetch documents from remote sources and decode Notion blocks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod blocks;
mod github;

use ingestkit_connectors::capabilities;

#[derive(Parser)]
#[command(name = "ingestkit", version, about = "Document source connectors")]
struct Cli {
    /// Root for downloads and structured output
    #[arg(long, global = true, env = "INGESTKIT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download supported files from a GitHub repository
    Github(github::GitHubArgs),

    /// Decode a dump of Notion block objects
    Blocks(blocks::BlocksArgs),

    /// List optional capabilities compiled in
    Capabilities,
}

fn print_capabilities() {
    for capability in capabilities::Capability::ALL {
        let state = if capability.is_available() {
            "available"
        } else {
            "missing"
        };
        println!(
            "{:<10} {:<10} (feature `{}`)",
            capability.to_string(),
            state,
            capability.feature()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Github(args) => {
            let report = github::run(&args, &cli.data_dir).await?;
            github::print_report(&report);
            std::process::exit(if report.errors.is_empty() { 0 } else { 1 });
        }
        Command::Blocks(args) => {
            let output_dir = args.output_dir.clone().unwrap_or_else(|| {
                ingestkit_core::StandardConfig::new(&cli.data_dir).output_dir
            });
            info!("Decoding Notion blocks from {}", args.source.display());
            let report = blocks::run(&args.source, &output_dir)?;
            blocks::print_report(&report);
        }
        Command::Capabilities => print_capabilities(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_blocks_command() {
        let cli = Cli::try_parse_from([
            "ingestkit",
            "blocks",
            "page.json",
            "--output-dir",
            "out",
            "--data-dir",
            "/srv/ingest",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/ingest"));
        let Command::Blocks(args) = cli.command else {
            panic!("expected blocks command");
        };
        assert_eq!(args.source, PathBuf::from("page.json"));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["ingestkit", "blocks", "page.json", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["ingestkit", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["ingestkit"]).is_err());
    }
}
