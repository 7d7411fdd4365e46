// Colored terminal output for polarity tables and catalog listings.
//
// main.rs delegates all printing of results here.

use std::collections::HashMap;

use colored::Colorize;

use crate::ckan::client::Package;
use crate::sentiment::document::{Document, DocumentId};
use crate::sentiment::polarity::PolarityResult;

/// Display documents ranked by polarity, most negative first.
///
/// `limit` caps how many rows are shown at each end of the ranking; when the
/// batch is small enough, every row is shown once.
pub fn display_polarity_table(result: &PolarityResult, documents: &[Document], limit: usize) {
    if result.is_empty() {
        println!("No documents to score.");
        return;
    }

    let texts: HashMap<&DocumentId, &str> = documents
        .iter()
        .map(|d| (&d.id, d.raw_text.as_str()))
        .collect();

    let ranked = result.ranked();

    println!(
        "\n{}",
        format!("=== Polarity ({} documents) ===", ranked.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<22} {:>8}  {}",
        "Rank".dimmed(),
        "Id".dimmed(),
        "Score".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(90).dimmed());

    let shown: Vec<usize> = if ranked.len() <= limit.saturating_mul(2) {
        (0..ranked.len()).collect()
    } else {
        (0..limit).chain(ranked.len() - limit..ranked.len()).collect()
    };

    for (n, &i) in shown.iter().enumerate() {
        if n > 0 && i != shown[n - 1] + 1 {
            println!("  {:>4}", "...".dimmed());
        }
        let (id, score) = ranked[i];
        let text = texts.get(id).copied().unwrap_or("");
        println!(
            "  {:>4}. {:<22} {}  {}",
            i + 1,
            super::preview(id.as_str(), 22),
            colorize_score(score),
            super::preview(text, 60).dimmed(),
        );
    }
}

/// Display mean, extremes, and sign counts for a scored batch.
pub fn display_summary(result: &PolarityResult) {
    let Some(summary) = result.summary() else {
        return;
    };

    println!("\n{}", "=== Summary ===".bold());
    println!("  Documents: {}", summary.documents);
    println!(
        "  Mean: {}  Min: {}  Max: {}",
        colorize_score(summary.mean),
        colorize_score(summary.min),
        colorize_score(summary.max),
    );
    println!(
        "  {} positive, {} negative, {} neutral",
        summary.positive.to_string().green(),
        summary.negative.to_string().red(),
        summary.neutral.to_string().dimmed(),
    );
}

/// Display a CKAN package and its resources.
pub fn display_package(package: &Package) {
    let title = package.title.as_deref().unwrap_or(&package.name);
    println!("\n{}", format!("=== {title} ===").bold());
    println!("  Name: {}", package.name);
    println!("  Id:   {}", package.id.dimmed());

    if package.resources.is_empty() {
        println!("  No resources.");
        return;
    }

    println!("\n  Resources:");
    for (i, resource) in package.resources.iter().enumerate() {
        let format = resource.format.as_deref().unwrap_or("?");
        let name = resource.name.as_deref().unwrap_or(&resource.id);
        let datastore = if resource.datastore_active {
            " [datastore]".cyan().to_string()
        } else {
            String::new()
        };
        println!(
            "    {:>2}. {:<6} {}{}",
            i + 1,
            format.bold(),
            name,
            datastore
        );
        println!("        {}", resource.url.dimmed());
    }
}

/// Color a polarity score by sign.
fn colorize_score(score: f64) -> colored::ColoredString {
    let s = format!("{score:>8.2}");
    if score > 0.0 {
        s.green()
    } else if score < 0.0 {
        s.red()
    } else {
        s.dimmed()
    }
}
