//! Process command implementation
//!
//! Token streams are read and written sentence by sentence: a sentence is
//! linked and handed to the formatter as soon as its closing empty line has
//! been read.

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, SentenceBlock, TsvReader};
use crate::output::{
    JsonFormatter, MarkdownFormatter, OutputFormatter, ProcessedDocument, ProcessedSentence,
    TsvFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use preverb_core::{EngineConfig, PreverbEngine, PreverbLemma, RuleRevision, SentenceReport};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Source name used for standard input
pub const STDIN_SOURCE: &str = "<stdin>";

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); standard input when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else tsv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Rule table revision
    #[arg(short, long, value_name = "REVISION")]
    pub revision: Option<RuleRevision>,

    /// Keep the preverb lemma and append the verb lemma in brackets
    #[arg(long)]
    pub annotate_preverb_lemma: bool,

    /// Leave verb tags untouched
    #[arg(long)]
    pub no_tag_mark: bool,

    /// Process input files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The input table with the link columns filled in
    Tsv,
    /// JSON array of documents with per-sentence counts
    Json,
    /// Markdown list of the resolved links
    Markdown,
}

impl OutputFormat {
    /// Look up a format by name, ignoring case
    pub fn from_name(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| CliError::UnknownFormat(name.to_string()).into())
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting preverb linking");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let engine_config = self.engine_config(&config);
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_name(&config.output.default_format)?,
        };
        let files = if self.input.is_empty() {
            Vec::new()
        } else {
            let files = resolve_patterns(&self.input)?;
            log::info!("Found {} file(s) to process", files.len());
            files
        };

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            )),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Tsv => Box::new(TsvFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(
                writer,
                engine_config.fields.clone(),
            )),
        };

        let summary = if files.is_empty() {
            let stream = SentenceStream::new(STDIN_SOURCE, FileReader::stdin(), &engine_config)?;
            write_stream(stream, formatter.as_mut())?
        } else {
            self.process_files(&files, &engine_config, formatter.as_mut())?
        };
        formatter.finish()?;

        log::info!(
            "Processed {} document(s): {} sentence(s), {} link(s), {} rejected sentence(s)",
            summary.documents,
            summary.sentences,
            summary.linked,
            summary.rejected
        );

        Ok(())
    }

    fn process_files(
        &self,
        files: &[PathBuf],
        config: &EngineConfig,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<RunSummary> {
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut summary = RunSummary::default();
        if self.parallel && files.len() > 1 {
            // Output follows input order, so each file is linked in full
            // before it is written
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(threads) = self.threads {
                builder = builder.num_threads(threads);
            }
            let pool = builder
                .build()
                .context("Failed to build worker thread pool")?;
            log::debug!("Processing with {} worker thread(s)", pool.current_num_threads());

            let documents = pool.install(|| {
                files
                    .par_iter()
                    .map(|path| {
                        let document = process_file(path, config)?;
                        progress.file_completed(&document.source);
                        Ok(document)
                    })
                    .collect::<Result<Vec<_>>>()
            })?;
            for document in documents {
                summary.add(write_document(document, formatter)?);
            }
        } else {
            for path in files {
                let stream = open_file(path, config)?;
                summary.add(write_stream(stream, formatter)?);
                progress.file_completed(&path.display().to_string());
            }
        }

        progress.finish();
        Ok(summary)
    }

    fn load_config(&self) -> Result<CliConfig> {
        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides to the configured engine settings
    fn engine_config(&self, config: &CliConfig) -> EngineConfig {
        let mut engine = config.engine.clone();
        if let Some(revision) = self.revision {
            engine.revision = revision;
        }
        if self.annotate_preverb_lemma {
            engine.preverb_lemma = PreverbLemma::Annotate;
        }
        if self.no_tag_mark {
            engine.mark_verb_tag = false;
        }
        engine
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A second initialization in the same process is harmless
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

/// Totals over the streams of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input streams
    pub documents: usize,
    /// Sentences, rejected ones included
    pub sentences: usize,
    /// Verb/preverb pairs
    pub linked: usize,
    /// Sentences passed through unchanged
    pub rejected: usize,
}

impl RunSummary {
    fn record(&mut self, sentence: &ProcessedSentence) {
        self.sentences += 1;
        self.linked += sentence.linked();
        if sentence.is_rejected() {
            self.rejected += 1;
        }
    }

    fn add(&mut self, other: RunSummary) {
        self.documents += other.documents;
        self.sentences += other.sentences;
        self.linked += other.linked;
        self.rejected += other.rejected;
    }
}

/// One token stream linked sentence by sentence with a fresh engine
///
/// Link ids start at 1 for every stream. A sentence with a row of the wrong
/// width is logged and passed through unchanged.
pub struct SentenceStream<R: BufRead> {
    reader: TsvReader<R>,
    engine: PreverbEngine,
    position: usize,
}

impl<R: BufRead> SentenceStream<R> {
    /// Read the header of `input` and set up an engine for it
    pub fn new(source: &str, input: R, config: &EngineConfig) -> Result<Self> {
        let reader = TsvReader::new(source, input)?;
        let engine = PreverbEngine::new(reader.header(), config.clone())
            .with_context(|| format!("Cannot process {source}"))?;
        Ok(Self {
            reader,
            engine,
            position: 0,
        })
    }

    /// Name of the stream
    pub fn source(&self) -> &str {
        self.reader.source()
    }

    /// Header of the output table
    pub fn output_header(&self) -> Vec<String> {
        self.engine.output_header()
    }

    fn link(&mut self, block: SentenceBlock) -> Result<ProcessedSentence> {
        let SentenceBlock { comments, rows } = block;
        if rows.is_empty() {
            return Ok(ProcessedSentence {
                comments,
                rows,
                report: Some(SentenceReport::default()),
            });
        }

        let schema = self.engine.schema();
        if let Some(e) = rows.iter().find_map(|row| schema.check_row(row).err()) {
            log::warn!(
                "{}: sentence {} rejected: {e}",
                self.reader.source(),
                self.position
            );
            return Ok(ProcessedSentence {
                comments,
                rows,
                report: None,
            });
        }

        let (rows, report) = self
            .engine
            .process_sentence_with_report(rows)
            .with_context(|| format!("{}: sentence {}", self.reader.source(), self.position))?;
        Ok(ProcessedSentence {
            comments,
            rows,
            report: Some(report),
        })
    }
}

impl<R: BufRead> Iterator for SentenceStream<R> {
    type Item = Result<ProcessedSentence>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = match self.reader.next()? {
            Ok(block) => block,
            Err(e) => return Some(Err(e)),
        };
        self.position += 1;
        Some(self.link(block))
    }
}

/// Open a file as a sentence stream
pub fn open_file(path: &Path, config: &EngineConfig) -> Result<SentenceStream<BufReader<File>>> {
    let size = FileReader::file_size(path)?;
    log::debug!("Reading {} ({} bytes)", path.display(), size);
    SentenceStream::new(&path.display().to_string(), FileReader::open(path)?, config)
}

/// Link a whole file in memory, for the parallel path
pub fn process_file(path: &Path, config: &EngineConfig) -> Result<ProcessedDocument> {
    let stream = open_file(path, config)?;
    let source = stream.source().to_string();
    let header = stream.output_header();
    Ok(ProcessedDocument {
        source,
        header,
        sentences: stream.collect::<Result<Vec<_>>>()?,
    })
}

/// Link a stream and hand each sentence to the formatter as it is done
pub fn write_stream<R: BufRead>(
    stream: SentenceStream<R>,
    formatter: &mut dyn OutputFormatter,
) -> Result<RunSummary> {
    formatter.begin_document(stream.source(), &stream.output_header())?;
    let mut summary = RunSummary {
        documents: 1,
        ..Default::default()
    };
    for sentence in stream {
        let sentence = sentence?;
        summary.record(&sentence);
        formatter.write_sentence(&sentence)?;
    }
    formatter.end_document()?;
    Ok(summary)
}

/// Output a document that was linked in full beforehand
pub fn write_document(
    document: ProcessedDocument,
    formatter: &mut dyn OutputFormatter,
) -> Result<RunSummary> {
    formatter.begin_document(&document.source, &document.header)?;
    let mut summary = RunSummary {
        documents: 1,
        ..Default::default()
    };
    for sentence in &document.sentences {
        summary.record(sentence);
        formatter.write_sentence(sentence)?;
    }
    formatter.end_document()?;
    Ok(summary)
}
