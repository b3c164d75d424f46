//! Command-line entry point for preverb

use clap::Parser;
use preverb_cli::commands::Commands;
use preverb_cli::CliResult;

/// Link separated Hungarian preverbs to their verbs
#[derive(Debug, Parser)]
#[command(name = "preverb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_process_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["preverb", "process"]).unwrap();
        match cli.command {
            Commands::Process(args) => {
                assert!(args.input.is_empty());
                assert!(args.format.is_none());
            }
            other => panic!("Expected Process, got {other:?}"),
        }
    }

    #[test]
    fn test_revision_is_parsed() {
        let cli = Cli::try_parse_from(["preverb", "process", "-r", "basic", "-i", "a.tsv"]).unwrap();
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.revision, Some(preverb_core::RuleRevision::Basic));
            }
            other => panic!("Expected Process, got {other:?}"),
        }
        assert!(Cli::try_parse_from(["preverb", "process", "-r", "wide"]).is_err());
    }
}
