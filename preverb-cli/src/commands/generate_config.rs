//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the file to match your pipeline's column names");
        println!("2. Validate your configuration:");
        println!("   preverb validate -c {}", self.output.display());
        println!("3. Use it for processing:");
        println!("   preverb process -i input.tsv -c {}", self.output.display());

        Ok(())
    }

    /// Template configuration content; every value is the default
    pub fn template() -> &'static str {
        r#"# preverb configuration

[engine]
# Rule table revision: "basic" (radius 2) or "extended" (radius 3)
revision = "extended"

# Prefix the tag of linked and prefixed verbs with [/Prev]
mark_verb_tag = true

# Lemma of a linked preverb: "clear" empties it,
# "annotate" keeps it and appends the verb lemma: szét[szerel]
preverb_lemma = "clear"

# Column names. Columns read by the engine must exist in the input header;
# link columns are reused when present and appended otherwise.
[engine.fields]
form = "form"
lemma = "lemma"
tag = "xpostag"
analyses = "anas"
# Optional: rewritten for linked tokens when the input has it
compound = "compound"
link_state = "prev"
link_id = "previd"
link_offset = "prevoffset"

[output]
# "tsv", "json" or "markdown"
default_format = "tsv"
pretty_json = true
"#
    }
}
