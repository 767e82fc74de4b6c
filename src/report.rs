//! Whole-sequence analysis report.
//!
//! Gathers every derived value of one sequence into an [`AnalysisReport`]
//! and renders it as text for the command line.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{SequenceError, SequenceResult};
use crate::kmer::most_frequent_kmers;
use crate::model::{Sequence, SequenceKind};
use crate::protein::{extract_all, ExtractOptions};
use crate::translation::{codon_usage, six_frames, translate};

/// Default GC window size.
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Column width used by the `Display` rendering.
pub const DEFAULT_RENDER_WIDTH: usize = 80;

/// Knobs of a sequence analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// GC window size (>= 1)
    pub window_size: usize,
    /// Offset of the single-frame translation (0, 1 or 2)
    pub offset: usize,
    /// Optional `[start, end)` range for protein extraction
    pub range: Option<(usize, usize)>,
    /// Sort proteins by descending length
    pub ordered: bool,
    /// Amino acid whose codon usage is reported
    pub codon_usage: Option<char>,
    /// k-mer length for the most-frequent k-mer statistic
    pub kmer: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            offset: 0,
            range: None,
            ordered: false,
            codon_usage: None,
            kmer: None,
        }
    }
}

impl AnalysisOptions {
    /// Checks every knob against its domain.
    pub fn validate(&self) -> SequenceResult<()> {
        if self.window_size == 0 {
            return Err(SequenceError::InvalidArgument(
                "window size must be at least 1".into(),
            ));
        }
        if self.offset > 2 {
            return Err(SequenceError::InvalidArgument(format!(
                "reading frame offset must be 0, 1 or 2 (got {})",
                self.offset
            )));
        }
        if let Some((start, end)) = self.range {
            if end <= start {
                return Err(SequenceError::InvalidArgument(format!(
                    "range end ({}) must be greater than range start ({})",
                    end, start
                )));
            }
        }
        if self.kmer == Some(0) {
            return Err(SequenceError::InvalidArgument(
                "k-mer size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn extract_options(&self) -> ExtractOptions {
        let (start, end) = self.range.unwrap_or((0, 0));
        ExtractOptions::default()
            .with_range(start, end)
            .ordered(self.ordered)
    }
}

/// Everything derived from one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub label: String,
    pub kind: SequenceKind,
    pub length: usize,
    pub sequence: String,
    pub composition: BTreeMap<char, usize>,
    /// `None` for RNA input
    pub transcription: Option<String>,
    pub reverse_complement: String,
    pub gc_content: u8,
    pub window_size: usize,
    pub gc_windows: Vec<u8>,
    pub offset: usize,
    pub translation: String,
    /// Frame name (`+1`..`-3`) and amino acids
    pub frames: Vec<(String, String)>,
    pub proteins: Vec<String>,
    pub codon_usage: Option<(char, BTreeMap<String, f64>)>,
    pub frequent_kmers: Option<(usize, Vec<String>)>,
}

/// Runs every analysis on `sequence`.
pub fn analyze(sequence: &Sequence, options: &AnalysisOptions) -> SequenceResult<AnalysisReport> {
    options.validate()?;

    let transcription = match sequence.transcribe() {
        Ok(rna) => Some(rna.as_str().to_string()),
        Err(SequenceError::UnsupportedOperation { .. }) => None,
        Err(e) => return Err(e),
    };

    let frames = six_frames(sequence)?
        .into_iter()
        .map(|frame| (frame.name(), frame.as_str().to_string()))
        .collect();

    let usage = options
        .codon_usage
        .map(|aa| aa.to_ascii_uppercase())
        .map(|aa| codon_usage(sequence, aa).map(|usage| (aa, usage)))
        .transpose()?;

    let frequent_kmers = options
        .kmer
        .map(|k| most_frequent_kmers(sequence, k).map(|kmers| (k, kmers)))
        .transpose()?;

    Ok(AnalysisReport {
        label: sequence.label().to_string(),
        kind: sequence.kind(),
        length: sequence.len(),
        sequence: sequence.as_str().to_string(),
        composition: sequence.composition(),
        transcription,
        reverse_complement: sequence.reverse_complement().as_str().to_string(),
        gc_content: sequence.gc_content()?,
        window_size: options.window_size,
        gc_windows: sequence.gc_content_windows(options.window_size)?,
        offset: options.offset,
        translation: translate(sequence, options.offset)?.as_str().to_string(),
        frames,
        proteins: extract_all(sequence, &options.extract_options())?,
        codon_usage: usage,
        frequent_kmers,
    })
}

impl AnalysisReport {
    /// Renders the report, wrapping long values at `width` columns.
    pub fn render(&self, width: usize) -> String {
        Rendered {
            report: self,
            width: width.max(20),
        }
        .to_string()
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W, width: usize) -> fmt::Result {
        writeln!(out, "[Label]: {}", self.label)?;
        writeln!(out, "[Type]: {} ({} symbols)", self.kind, self.length)?;
        write_wrapped(out, "Sequence", &self.sequence, width)?;

        let composition: Vec<String> = self
            .composition
            .iter()
            .map(|(symbol, count)| format!("{}={}", symbol, count))
            .collect();
        writeln!(out, "[Composition]: {}", composition.join(" "))?;

        if let Some(rna) = &self.transcription {
            write_wrapped(out, "Transcription", rna, width)?;
        }
        write_wrapped(out, "Reverse complement", &self.reverse_complement, width)?;

        writeln!(out, "[GC content]: {}%", self.gc_content)?;
        let windows: Vec<String> = self.gc_windows.iter().map(u8::to_string).collect();
        write_wrapped(
            out,
            &format!("GC windows (k={})", self.window_size),
            &windows.join(" "),
            width,
        )?;

        write_wrapped(
            out,
            &format!("Translation (offset {})", self.offset),
            &self.translation,
            width,
        )?;
        for (name, residues) in &self.frames {
            write_wrapped(out, &format!("Frame {}", name), residues, width)?;
        }

        writeln!(out, "[Proteins]: {}", self.proteins.len())?;
        for protein in &self.proteins {
            write_wrapped(out, "", protein, width)?;
        }

        if let Some((aa, usage)) = &self.codon_usage {
            let usage: Vec<String> = usage
                .iter()
                .map(|(codon, share)| format!("{}={:.2}", codon, share))
                .collect();
            writeln!(out, "[Codon usage {}]: {}", aa, usage.join(" "))?;
        }
        if let Some((k, kmers)) = &self.frequent_kmers {
            let title = format!("Most frequent {}-mers", k);
            write_wrapped(out, &title, &kmers.join(" "), width)?;
        }
        Ok(())
    }
}

/// A report bound to a render width.
struct Rendered<'a> {
    report: &'a AnalysisReport,
    width: usize,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report.write_to(f, self.width)
    }
}

/// Writes `[title]: value`, wrapping the value under a hanging indent.
fn write_wrapped<W: fmt::Write>(
    out: &mut W,
    title: &str,
    value: &str,
    width: usize,
) -> fmt::Result {
    let prefix = if title.is_empty() {
        "  ".to_string()
    } else {
        format!("[{}]: ", title)
    };
    if value.is_empty() {
        return writeln!(out, "{}", prefix.trim_end());
    }
    if prefix.len() + value.len() <= width {
        return writeln!(out, "{}{}", prefix, value);
    }
    let options = textwrap::Options::new(width)
        .initial_indent(&prefix)
        .subsequent_indent("  ")
        .break_words(true);
    for line in textwrap::wrap(value, &options) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, DEFAULT_RENDER_WIDTH)
    }
}
