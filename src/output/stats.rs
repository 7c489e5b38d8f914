//! Statistics reporting.

use console::style;

use crate::download::RunSummary;

/// Print statistics for a finished run.
pub fn print_run_summary(summary: &RunSummary) {
    let collection = &summary.collection;
    let downloads = &summary.downloads;

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    println!("  Guilds:   {}", collection.guilds);
    println!(
        "  Emojis:   {} / {} saved",
        downloads.emojis_saved, collection.emojis
    );
    println!(
        "  Stickers: {} / {} saved",
        downloads.stickers_saved, collection.stickers
    );
    if downloads.skipped > 0 {
        println!("  Skipped:  {} (already on disk)", downloads.skipped);
    }
    if downloads.failed > 0 {
        println!("  Failed:   {}", style(downloads.failed).red());
    }
    if summary.cancelled {
        println!(
            "  {}",
            style(format!(
                "Interrupted after {} of {} item(s)",
                downloads.processed,
                collection.total_items()
            ))
            .yellow()
        );
    }
    println!("  Total:    {} downloaded", downloads.total_saved());
    println!("{}", style("═".repeat(50)).dim());
}
