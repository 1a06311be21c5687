//! Status blocks printed by the `seed` and `stats` commands

use owo_colors::{OwoColorize, Style};
use std::path::Path;
use std::sync::OnceLock;

use crate::seed::SeedOutcome;

static COLORED: OnceLock<bool> = OnceLock::new();

/// Piped output and `NO_COLOR` stay plain
fn colored() -> bool {
    *COLORED.get_or_init(|| {
        console::Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none()
    })
}

fn paint(text: &str, style: Style) -> String {
    if colored() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Heading, database path and per-table counts for one seeding run
pub fn seed_summary(database: &Path, outcome: &SeedOutcome) -> String {
    let heading = match outcome {
        SeedOutcome::AlreadySeeded => "🌱 Catalogue already present",
        SeedOutcome::Seeded(_) => "🌱 Seeded sample catalogue",
    };
    format!(
        "{}\n  {} {}\n  {}",
        paint(heading, Style::new().green().bold()),
        paint("database", Style::new().dimmed()),
        database.display(),
        outcome
    )
}

/// Heading line above the stats table
pub fn stats_heading(database: &Path) -> String {
    format!(
        "{} {}",
        paint("📊 Row counts", Style::new().cyan().bold()),
        paint(&database.display().to_string(), Style::new().dimmed())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedCounts;

    #[test]
    fn seed_summary_reports_inserted_rows() {
        let counts = SeedCounts {
            countries: 2,
            cities: 2,
            positions: 2,
            shops: 2,
            workers: 2,
            categories: 2,
            products: 2,
        };
        let text = seed_summary(Path::new("ShopDatabase.db"), &SeedOutcome::Seeded(counts));
        assert!(text.contains("Seeded sample catalogue"));
        assert!(text.contains("ShopDatabase.db"));
        assert!(text.contains("Seeded 14 rows"));
    }

    #[test]
    fn seed_summary_for_existing_catalogue() {
        let text = seed_summary(Path::new("shops.db"), &SeedOutcome::AlreadySeeded);
        assert!(text.contains("Catalogue already present"));
        assert!(text.contains("nothing inserted"));
    }

    #[test]
    fn stats_heading_names_database() {
        assert!(stats_heading(Path::new("data/shops.db")).contains("data/shops.db"));
    }
}
