//! nucleic - DNA/RNA sequence toolkit
//!
//! ## Usage
//!
//! ```bash
//! nucleic <sequence_file>
//! nucleic -k rna -w 10 --ordered <sequence_file>
//! nucleic --random 120
//! ```
//!
//! ## Supported Formats
//!
//! - FASTA (.fasta, .fa, .fna, .fas)
//! - Plain text (.txt, .seq), the whole file is one sequence

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use nucleic::formats::fasta::write_fasta;
use nucleic::formats::plain::{write_text_file, WriteMode};
use nucleic::formats::{parse_file_with_options, FileFormat};
use nucleic::model::{Sequence, SequenceKind};
use nucleic::report::{analyze, AnalysisOptions, DEFAULT_RENDER_WIDTH, DEFAULT_WINDOW_SIZE};

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// FASTA format
    Fasta,
    /// Plain text, one sequence per file
    Plain,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<FileFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fasta => Some(FileFormat::Fasta),
            FormatArg::Plain => Some(FileFormat::Plain),
            FormatArg::Auto => None,
        }
    }
}

/// Sequence kind for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Dna,
    Rna,
}

impl From<KindArg> for SequenceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Dna => SequenceKind::Dna,
            KindArg::Rna => SequenceKind::Rna,
        }
    }
}

/// nucleic - composition, GC content, six-frame translation and ORF proteins
/// of DNA/RNA sequences
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file to analyse (FASTA or plain text)
    #[arg(required_unless_present = "random")]
    file: Option<PathBuf>,

    /// Force a specific file format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Sequence kind
    #[arg(short = 'k', long = "kind", value_enum, default_value = "dna")]
    kind: KindArg,

    /// Analyse a random sequence of this length instead of a file
    #[arg(long = "random", conflicts_with = "file")]
    random: Option<usize>,

    /// Window size for GC content windows
    #[arg(short = 'w', long = "window", default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Reading frame offset for the single-frame translation (0, 1 or 2)
    #[arg(short = 'r', long = "offset", default_value_t = 0)]
    offset: usize,

    /// Start of the range (0-based, inclusive) used for protein extraction
    #[arg(long = "start", requires = "end")]
    start: Option<usize>,

    /// End of the range (0-based, exclusive) used for protein extraction
    #[arg(long = "end", requires = "start")]
    end: Option<usize>,

    /// Sort proteins by descending length
    #[arg(long = "ordered")]
    ordered: bool,

    /// Report the codon usage of this amino acid
    #[arg(long = "codon-usage")]
    codon_usage: Option<char>,

    /// Report the most frequent k-mers of this length
    #[arg(long = "kmer")]
    kmer: Option<usize>,

    /// Output file for the report. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Save the random sequence as FASTA to this file
    #[arg(long = "save-random", requires = "random")]
    save_random: Option<PathBuf>,

    /// Line width of the report
    #[arg(long = "width", default_value_t = DEFAULT_RENDER_WIDTH)]
    width: usize,
}

impl Args {
    fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            window_size: self.window,
            offset: self.offset,
            range: self.start.zip(self.end),
            ordered: self.ordered,
            codon_usage: self.codon_usage,
            kmer: self.kmer,
        }
    }

    /// Loads the sequences to analyse, from the file or the generator.
    fn load_sequences(&self) -> Result<Vec<Sequence>> {
        let kind: SequenceKind = self.kind.into();

        if let Some(length) = self.random {
            let seq = Sequence::random(kind, length, &mut rand::rng())?;
            if let Some(path) = &self.save_random {
                let mut buffer = Vec::new();
                write_fasta(&mut buffer, &seq, 60)?;
                let text = String::from_utf8_lossy(&buffer);
                write_text_file(path, text.trim_end(), WriteMode::Write)
                    .with_context(|| format!("Cannot write {}", path.display()))?;
            }
            return Ok(vec![seq]);
        }

        let Some(path) = &self.file else {
            anyhow::bail!("No sequence file given");
        };
        let records = parse_file_with_options(path, self.format.into())
            .with_context(|| format!("Cannot read {}", path.display()))?;
        info!("Read {} record(s) from {}", records.len(), path.display());

        records
            .into_iter()
            .map(|record| record.into_sequence(kind).map_err(anyhow::Error::from))
            .collect()
    }
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();

    let options = args.analysis_options();
    options.validate()?;

    let sequences = args.load_sequences()?;

    let mut report = String::new();
    for seq in &sequences {
        let analysis = analyze(seq, &options)
            .with_context(|| format!("Cannot analyse '{}'", seq.label()))?;
        if !report.is_empty() {
            report.push('\n');
        }
        report.push_str(&analysis.render(args.width));
    }

    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(report.as_bytes())?;
    } else {
        write_text_file(&args.output, report.trim_end(), WriteMode::Write)
            .with_context(|| format!("Cannot write {}", args.output))?;
        eprintln!("Wrote {} report(s) to {}", sequences.len(), args.output);
    }

    Ok(())
}
