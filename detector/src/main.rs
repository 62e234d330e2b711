use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::config::Config;
use common::logger;
use detector::gate::{self, Decision};
use detector::matchers::exact_matcher::ExactMatcher;
use detector::matchers::fuzzy_matcher::FuzzyMatcher;
use detector::matchers::numeric_matcher::NumericMatcher;
use detector::report::DetectionReportResponse;
use detector::{DetectionJob, generate_traps};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Decoy-trap generation and AI-use detection for homework submissions")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the decoy instructions and trap records for an assignment
    Generate {
        /// Path to the plain-text assignment instructions
        #[arg(long)]
        instructions: PathBuf,
        /// Output JSON path
        #[arg(long, default_value = "generation.json")]
        out: PathBuf,
    },
    /// Analyze a student submission against stored traps
    Analyze {
        /// Path to the stored trap records (JSON array)
        #[arg(long)]
        traps: PathBuf,
        /// Path to the plain-text submission
        #[arg(long)]
        submission: PathBuf,
        /// Flagging threshold; defaults to the configured value
        #[arg(long)]
        threshold: Option<f64>,
        /// Output JSON path
        #[arg(long, default_value = "detection.json")]
        out: PathBuf,
        /// Attach the matcher trace debug payload to the report
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> Result<()> {
    let config = Config::init(".env");
    logger::init_from(config);

    let args = Args::parse();
    match args.command {
        Command::Generate { instructions, out } => {
            let text = fs::read_to_string(&instructions)
                .with_context(|| format!("failed to read instructions from {instructions:?}"))?;
            let output = generate_traps(&text)?;
            if output.total_modifications == 0 {
                log::warn!("no traps could be generated; detection will be inconclusive");
            }
            fs::write(&out, serde_json::to_string_pretty(&output)?)
                .with_context(|| format!("failed to write {out:?}"))?;
            log::info!("wrote {} trap(s) to {out:?}", output.total_modifications);
        }
        Command::Analyze {
            traps,
            submission,
            threshold,
            out,
            debug,
        } => {
            let traps = detector::load_traps(&traps)?;
            let submission_text = fs::read_to_string(&submission)
                .with_context(|| format!("failed to read submission from {submission:?}"))?;

            let mut job = DetectionJob::new(traps, submission_text)
                .with_threshold(threshold.unwrap_or(config.detection_threshold))
                .with_matchers(vec![
                    Box::new(NumericMatcher),
                    Box::new(ExactMatcher),
                    Box::new(FuzzyMatcher::new(config.similarity_threshold)),
                ]);
            if debug {
                job = job.with_debug();
            }
            let report = job.run()?;

            match gate::decide(&report) {
                Decision::RequireInterview => {
                    log::warn!(
                        "submission flagged (score {} >= threshold {}): oral interview required",
                        report.ai_detection_score,
                        report.threshold
                    );
                }
                Decision::Clear => {
                    log::info!("submission cleared (score {})", report.ai_detection_score);
                }
            }
            if report.no_traps_available {
                log::warn!("assignment has no traps; result must not be read as a clean pass");
            }

            let response = DetectionReportResponse::from(report);
            fs::write(&out, serde_json::to_string_pretty(&response)?)
                .with_context(|| format!("failed to write {out:?}"))?;
            log::info!("wrote detection report to {out:?}");
        }
    }
    Ok(())
}
