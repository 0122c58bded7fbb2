//! Stats command: one-shot per-variant summary.

use anyhow::{Context, Result};
use clap::Args;
use cmindx_core::{EventSummary, VariantId};
use cmindx_tui::{DashboardClient, format_avg_scroll};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::config::ConfigLoader;

#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Server base URL (defaults to the configured server)
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn run(args: StatsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let url = args.url.unwrap_or_else(|| config.server_url());

    let client = DashboardClient::with_timeout(&url, config.timeout())?;
    let list = client
        .fetch_events()
        .await
        .with_context(|| format!("Failed to load events from {}", url))?;
    let summary = EventSummary::from_events(&list.events);

    println!(
        "Events: {}   Sessions: {}   Winner: {}",
        summary.total_events,
        summary.unique_sessions,
        winner_label(summary.winner)
    );
    println!("{}", summary_table(&summary));
    Ok(())
}

fn winner_label(winner: Option<VariantId>) -> String {
    match winner {
        Some(v) => format!("Variant {}", v),
        None => "-".to_string(),
    }
}

/// Per-variant table, one row per variant
pub fn summary_table(summary: &EventSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Variant").fg(Color::Cyan),
        Cell::new("Sessions").fg(Color::Cyan),
        Cell::new("Events").fg(Color::Cyan),
        Cell::new("Scrolls").fg(Color::Cyan),
        Cell::new("Avg scroll").fg(Color::Cyan),
        Cell::new("Clicks").fg(Color::Cyan),
    ]);

    for stats in &summary.variants {
        let mut name = Cell::new(stats.variant_id.as_str());
        if summary.winner == Some(stats.variant_id) {
            name = Cell::new(format!("{} (leading)", stats.variant_id)).fg(Color::Green);
        }
        table.add_row(vec![
            name,
            Cell::new(stats.sessions),
            Cell::new(stats.total_events),
            Cell::new(stats.scroll_events),
            Cell::new(format_avg_scroll(stats.avg_scroll_percent)),
            Cell::new(stats.click_events),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmindx_core::{Event, EventType, Payload};

    fn scroll(session: &str, variant: VariantId, percent: u64) -> Event {
        let mut payload = Payload::new();
        payload.insert("scrollPercent".into(), percent.into());
        Event::new(session, EventType::Scroll, payload, Some(variant))
    }

    #[test]
    fn table_has_one_row_per_variant() {
        let summary = EventSummary::from_events(&[
            scroll("a", VariantId::A, 40),
            scroll("b", VariantId::B, 70),
        ]);
        let rendered = summary_table(&summary).to_string();

        assert!(rendered.contains("Avg scroll"));
        assert!(rendered.contains("40.0%"));
        assert!(rendered.contains("B (leading)"));
        assert!(!rendered.contains("A (leading)"));
    }

    #[test]
    fn empty_summary_shows_dash_average() {
        let rendered = summary_table(&EventSummary::default()).to_string();
        assert!(rendered.contains('-'));
        assert!(!rendered.contains("leading"));
    }

    #[test]
    fn winner_label_formats() {
        assert_eq!(winner_label(Some(VariantId::A)), "Variant A");
        assert_eq!(winner_label(None), "-");
    }
}
