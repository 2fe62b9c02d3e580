use pepnorm::engine::report::RunSummary;
use std::path::Path;

/// Prints a short run report to stdout. Log output carries the details.
pub fn print_summary(stage: &str, summary: &RunSummary, output: &Path) {
    println!(
        "✓ {}: {} rows written to {}",
        stage,
        summary.rows,
        output.display()
    );
    for line in summary_lines(summary) {
        println!("  {}", line);
    }
}

fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if summary.parse_failures > 0 {
        lines.push(format!("{} malformed concentrations", summary.parse_failures));
    }
    if summary.conversion_failures > 0 {
        lines.push(format!(
            "{} concentrations could not be converted to µM",
            summary.conversion_failures
        ));
    }
    if summary.key_failures > 0 {
        lines.push(format!("{} rows without a sequence key", summary.key_failures));
    }
    if summary.lookup_misses > 0 {
        lines.push(format!("{} rows without auxiliary data", summary.lookup_misses));
    }
    if !summary.derivation_failures.is_empty() {
        lines.push(format!(
            "derivation failed for: {}",
            summary.derivation_failures.join(", ")
        ));
    }
    for join in &summary.joins {
        lines.push(format!(
            "{}: {} of {} rows matched",
            join.table,
            join.matched,
            join.matched + join.missed
        ));
    }
    lines
}
