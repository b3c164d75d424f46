//! List command implementation

use super::process::OutputFormat;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use preverb_core::RuleRevision;
use std::io::Write;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List the rules of a revision in evaluation order
    Rules {
        /// Revision to list (default: all)
        #[arg(short, long, value_name = "REVISION")]
        revision: Option<RuleRevision>,
    },

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Execute the list command, writing to stdout
    pub fn execute(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out)
    }

    /// Write the listing to `out`
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        match self {
            ListCommands::Rules { revision } => {
                let revisions = match revision {
                    Some(revision) => vec![*revision],
                    None => RuleRevision::ALL.to_vec(),
                };
                for revision in revisions {
                    let table = revision.table()?;
                    writeln!(out, "{} (radius {}):", table.name(), table.radius())?;
                    for (depth, name) in table.rule_names() {
                        writeln!(out, "  {}{}", "  ".repeat(depth), name)?;
                    }
                }
            }
            ListCommands::Formats => {
                writeln!(out, "Available output formats:")?;
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                        writeln!(out, "  {:<10} {}", value.get_name(), help)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(command: ListCommands) -> String {
        let mut out = Vec::new();
        command.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_rules_of_one_revision() {
        let output = listing(ListCommands::Rules {
            revision: Some(RuleRevision::Basic),
        });
        assert!(output.starts_with("basic (radius 2):\n"));
        assert!(output.contains("\n  finite_verb\n"));
        assert!(output.contains("\n    nearest_preverb\n"));
        assert!(!output.contains("extended"));
    }

    #[test]
    fn test_list_rules_of_all_revisions() {
        let output = listing(ListCommands::Rules { revision: None });
        assert!(output.contains("basic (radius 2):"));
        assert!(output.contains("extended (radius 3):"));
        assert!(output.contains("infinitive_distant_preverb"));
    }

    #[test]
    fn test_list_formats() {
        let output = listing(ListCommands::Formats);
        for name in ["tsv", "json", "markdown"] {
            assert!(output.contains(name));
        }
    }
}
