//! Run summary reporting.

use std::time::Duration;

use console::style;

use crate::download::RunState;

/// Print the end-of-run summary.
pub fn print_summary(state: &RunState, elapsed: Duration) {
    let stats = &state.stats;

    println!();
    println!("{}", style("═".repeat(60)).dim());
    println!("{}", style("Summary:").bold());
    println!("  Collection: r/{}", state.collection);
    println!("  Found:      {}", stats.found);
    println!("  Downloaded: {}", style(stats.downloaded).green());
    println!("  Skipped:    {}", style(stats.skipped).yellow());
    if stats.failed > 0 {
        println!("  Failed:     {}", style(stats.failed).red());
    } else {
        println!("  Failed:     {}", stats.failed);
    }
    println!("  Directory:  {}", state.output_path.display());
    println!("{}", style("═".repeat(60)).dim());
    println!("Total time: {:.1}s", elapsed.as_secs_f64());
}
