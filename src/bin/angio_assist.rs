//! angio-assist CLI — threshold-based coronary angiography draft reports.

use angio_assist::api::{AngiographyAssistant, AnalysisSummary, AssistantReport};
use angio_assist::core::source::{self, MediaKind, ACCEPTED_EXTENSIONS};
use angio_assist::core::AssistantConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "angio-assist")]
#[command(
    about = "Highlight vessels in a coronary angiography image or video and draft a text report (research prototype, not for clinical use)"
)]
#[command(version)]
struct Cli {
    /// Angiography image (.jpg, .jpeg, .png) or video (.mp4).
    input: PathBuf,

    /// Directory for the annotated image(s) and report.txt.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON5 config file overriding analysis parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the vessel intensity threshold.
    #[arg(long)]
    threshold: Option<u8>,

    /// Override the video sampling stride.
    #[arg(long)]
    stride: Option<u64>,

    /// Write every analyzed video frame as frame_NNNNNN.png.
    #[arg(long)]
    save_frames: bool,

    /// Write the per-frame results as JSON.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

impl Cli {
    fn to_config(&self) -> CliResult<AssistantConfig> {
        let mut config = match &self.config {
            Some(path) => AssistantConfig::load(path)?,
            None => AssistantConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.analyzer.threshold = threshold;
        }
        if let Some(stride) = self.stride {
            config.sampling.stride = stride;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    angio_assist::init_logging();
    let cli = Cli::parse();

    if !source::is_accepted_upload(&cli.input) {
        return Err(format!(
            "unsupported file type: {} (accepted: {})",
            cli.input.display(),
            ACCEPTED_EXTENSIONS.join(", ")
        )
        .into());
    }

    let config = cli.to_config()?;
    std::fs::create_dir_all(&cli.out_dir)?;
    let assistant = AngiographyAssistant::with_config(config);

    let report = match MediaKind::from_path(&cli.input) {
        MediaKind::Image => run_image(&assistant, &cli)?,
        MediaKind::Video => run_video(&assistant, &cli)?,
    };

    let report_path = cli.out_dir.join("report.txt");
    std::fs::write(&report_path, report.text())?;
    println!("Draft report written to {}", report_path.display());

    if let Some(path) = &cli.summary_json {
        let summary = AnalysisSummary::from_report(&report);
        std::fs::write(path, summary.to_json()?)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn run_image(assistant: &AngiographyAssistant, cli: &Cli) -> CliResult<AssistantReport> {
    let report = assistant.analyze_image_file(&cli.input)?;

    let annotated_path = cli.out_dir.join("annotated.png");
    report.annotated().save(&annotated_path)?;
    println!("{}", report.caption());
    println!("Annotated image written to {}", annotated_path.display());
    println!();
    println!("AI Interpretation Draft");
    print!("{}", report.interpretation());

    Ok(AssistantReport::Image(report))
}

fn run_video(assistant: &AngiographyAssistant, cli: &Cli) -> CliResult<AssistantReport> {
    let decoder = assistant.open_video(&cli.input)?;
    match decoder.info().frame_count {
        Some(total) => println!("Total Frames in Video: {}", total),
        None => println!("Total Frames in Video: unknown"),
    }

    let mut save_error: Option<CliError> = None;
    let outcome = assistant.analyze_video(decoder, |frame| {
        println!("{}", frame.caption);
        if cli.save_frames && save_error.is_none() {
            let path = frame_path(&cli.out_dir, frame.result.frame_index);
            if let Err(e) = frame.annotated.save(&path) {
                save_error = Some(e.into());
            }
        }
    })?;
    if let Some(e) = save_error {
        return Err(e);
    }

    println!();
    println!("AI Interpretation Draft for Video");
    println!("{}", outcome.report.text());

    Ok(AssistantReport::Video(outcome))
}

fn frame_path(out_dir: &Path, index: u64) -> PathBuf {
    out_dir.join(format!("frame_{:06}.png", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["angio-assist", "scan.png", "--threshold", "80", "--stride", "5"]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.analyzer.threshold, 80);
        assert_eq!(config.sampling.stride, 5);
        assert_eq!(config.analyzer.max_stenosis, 99.0);
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::parse_from(["angio-assist", "run.mp4"]);
        assert_eq!(cli.to_config().unwrap(), AssistantConfig::default());
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_zero_stride_flag_rejected() {
        let cli = Cli::parse_from(["angio-assist", "run.mp4", "--stride", "0"]);
        assert!(cli.to_config().is_err());
    }
}
