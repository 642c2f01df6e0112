use crate::crawler::CrawlReport;

/// Prints a crawl report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report of a finished crawl
pub fn print_summary(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");

    println!("Overview:");
    println!("  Pages visited: {}", report.pages_visited);
    println!("  Cards collected: {}", report.records.len());
    println!();

    let attempted = report.images_saved + report.images_failed;
    if attempted > 0 {
        println!("Images:");
        println!("  Saved: {}", report.images_saved);
        println!("  Failed: {}", report.images_failed);
        println!("  Success Rate: {:.1}%", image_success_rate(report));
        println!();
    }

    if !report.records.is_empty() {
        println!("Cards:");
        for (name, record) in &report.records {
            println!("  - {} ({} stats)", name, record.card_stats.len());
        }
        println!();
    }
}

/// Share of attempted image downloads that succeeded, in percent
fn image_success_rate(report: &CrawlReport) -> f64 {
    let attempted = report.images_saved + report.images_failed;
    if attempted > 0 {
        (report.images_saved as f64 / attempted as f64) * 100.0
    } else {
        0.0
    }
}
