//! Analyze command: score a file or stdin without the HTTP layer.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use readability_core::readability::{AnalysisReport, Metric, analyze_text, format_two_decimals};

use super::read_input;
use crate::server::AnalysisPayload;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Print only this metric.
    #[arg(long, value_enum)]
    pub metric: Option<Metric>,
}

/// Score a file and print the report, or a single metric.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, metric = ?args.metric, "executing analyze command");

    let content = read_input(&args.file, max_input_bytes)?;
    let report = analyze_text(&content);

    match (args.metric, global_json) {
        (Some(metric), true) => {
            println!("{}", serde_json::to_string_pretty(&metric_json(metric, &report))?);
        }
        (Some(metric), false) => println!("{}", metric.render(&report)),
        (None, true) => {
            let payload = AnalysisPayload::from(&report);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        (None, false) => print_report(&args.file, &report),
    }

    Ok(())
}

/// `{"grade": "10.77"}` style object, keyed like the HTTP response.
fn metric_json(metric: Metric, report: &AnalysisReport) -> Value {
    let mut map = Map::new();
    map.insert(metric.field().to_string(), Value::String(metric.render(report)));
    Value::Object(map)
}

fn print_report(file: &Utf8Path, report: &AnalysisReport) {
    println!("{}", file.bold());
    println!(
        "  {}: {}",
        "Flesch-Kincaid Grade Level".dimmed(),
        report.fkgl().cyan()
    );
    println!(
        "  {}: {}",
        "Flesch Reading Ease".dimmed(),
        report.fres().cyan()
    );
    println!("  {}: {}", "Words".dimmed(), report.words);
    println!("  {}: {}", "Sentences".dimmed(), report.sentences);
    println!("  {}: {}", "Syllables".dimmed(), report.syllables);
    println!(
        "  {}: {}",
        "Words per sentence".dimmed(),
        format_two_decimals(report.words_per_sentence)
    );
    println!(
        "  {}: {}",
        "Syllables per word".dimmed(),
        format_two_decimals(report.syllables_per_word)
    );
}
