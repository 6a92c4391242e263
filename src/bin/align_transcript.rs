use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use asr_align_rs::input::{load_asr, load_transcript};
use asr_align_rs::tsv::write_rows_to_path;
use asr_align_rs::{
    build_report, AlignerConfig, AlignmentInput, IcuWordSegmenter, TrailingGroups,
    TranscriptAligner, TranscriptAlignerBuilder, WhitespaceSegmenter, WordSegmenter,
};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[path = "align_transcript/html_report_formatter.rs"]
mod html_report_formatter;
#[path = "align_transcript/json_report_formatter.rs"]
mod json_report_formatter;

const TSV_FILE_NAME: &str = "aligned.tsv";
const HTML_FILE_NAME: &str = "visualization.html";
const JSON_FILE_NAME: &str = "report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Write the aligned TSV, the HTML visualization and the JSON report.
    All,
    Tsv,
    Html,
    Json,
}

impl OutputFormat {
    fn writes_tsv(self) -> bool {
        matches!(self, Self::All | Self::Tsv)
    }

    fn writes_html(self) -> bool {
        matches!(self, Self::All | Self::Html)
    }

    fn writes_json(self) -> bool {
        matches!(self, Self::All | Self::Json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SegmenterChoice {
    /// Dictionary-based word segmentation; required for Thai and other unspaced scripts.
    Icu,
    /// Split on whitespace only.
    Whitespace,
}

impl SegmenterChoice {
    fn build(self) -> Box<dyn WordSegmenter> {
        match self {
            Self::Icu => Box::new(IcuWordSegmenter::new()),
            Self::Whitespace => Box::new(WhitespaceSegmenter),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "align_transcript")]
#[command(about = "Re-time transcript lines against timed ASR output")]
struct Args {
    #[arg(long, env = "ASR_ALIGN_TRANSCRIPT", default_value = "input/transcript.tsv")]
    transcript: PathBuf,
    #[arg(long, env = "ASR_ALIGN_ASR", default_value = "input/asr.json")]
    asr: PathBuf,
    #[arg(long, env = "ASR_ALIGN_OUT_DIR", default_value = "output")]
    out_dir: PathBuf,
    /// JSON file with aligner settings; command-line flags override it.
    #[arg(long, env = "ASR_ALIGN_CONFIG")]
    config: Option<PathBuf>,
    #[arg(
        long,
        env = "ASR_ALIGN_FORMAT",
        value_enum,
        default_value_t = OutputFormat::All
    )]
    output_format: OutputFormat,
    #[arg(
        long,
        env = "ASR_ALIGN_SEGMENTER",
        value_enum,
        default_value_t = SegmenterChoice::Icu
    )]
    segmenter: SegmenterChoice,
    #[arg(long, env = "ASR_ALIGN_SILENCE_GAP_SECS")]
    silence_gap_secs: Option<f64>,
    /// Group words after the last exact match instead of leaving them unaligned.
    #[arg(long, env = "ASR_ALIGN_EMIT_TRAILING_GROUP", default_value_t = false)]
    emit_trailing_group: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    progress.set_message("reading inputs...");
    require_path_exists(&args.transcript, "Missing transcript TSV.")?;
    require_path_exists(&args.asr, "Missing ASR result JSON.")?;
    let lines = load_transcript(&args.transcript)
        .map_err(|err| format!("Failed to load '{}': {err}", args.transcript.display()))?;
    let segments = load_asr(&args.asr)
        .map_err(|err| format!("Failed to load '{}': {err}", args.asr.display()))?;

    progress.set_message("aligning...");
    let aligner = build_aligner(config.clone(), args.segmenter)?;
    let started = Instant::now();
    let output = aligner.align(&AlignmentInput { lines, segments });
    let align_elapsed = started.elapsed();
    let report = build_report(&output);

    progress.set_message("writing outputs...");
    let mut written = Vec::new();
    if args.output_format.writes_tsv() {
        let path = args.out_dir.join(TSV_FILE_NAME);
        write_rows_to_path(&path, &output.rows)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
        written.push(path);
    }
    if args.output_format.writes_html() {
        let path = args.out_dir.join(HTML_FILE_NAME);
        html_report_formatter::write_visualization(&path, &report)?;
        written.push(path);
    }
    if args.output_format.writes_json() {
        let path = args.out_dir.join(JSON_FILE_NAME);
        let meta = json_report_formatter::Meta {
            generated_at: Utc::now().to_rfc3339(),
            transcript_path: args.transcript.to_string_lossy().into_owned(),
            asr_path: args.asr.to_string_lossy().into_owned(),
            silence_gap_secs: config.silence_gap_secs,
        };
        json_report_formatter::write_report(&path, &meta, &report, &output.rows)?;
        written.push(path);
    }
    progress.finish_with_message("alignment complete");

    let summary = &report.summary;
    println!(
        "words: transcript={} asr={} exact={} approx={} missing={} ({:.2}ms)",
        summary.transcript_token_count,
        summary.asr_token_count,
        summary.coverage.exact,
        summary.coverage.approximate,
        summary.coverage.missing,
        align_elapsed.as_secs_f64() * 1000.0
    );
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<AlignerConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => AlignerConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AlignerConfig::default(),
    };
    if let Some(gap) = args.silence_gap_secs {
        config.silence_gap_secs = gap;
    }
    if args.emit_trailing_group {
        config.trailing_groups = TrailingGroups::Emit;
    }
    Ok(config)
}

fn build_aligner(
    config: AlignerConfig,
    segmenter: SegmenterChoice,
) -> Result<TranscriptAligner, String> {
    TranscriptAlignerBuilder::new(config)
        .with_segmenter(segmenter.build())
        .build()
        .map_err(|err| format!("Failed to build TranscriptAligner: {err}"))
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Expected path: '{}'.", path.display()))
}
