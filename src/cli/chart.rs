use super::ui;
use crate::core::dates::DateRange;
use crate::core::portfolio::{self, SeriesPoint, Step, TimelinePoint};
use crate::store::AssetRepository;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;
use tracing::info;

const BAR_WIDTH: usize = 30;

fn render(
    title: String,
    currency: &str,
    first_header: &str,
    rows: Vec<(String, Decimal)>,
) -> String {
    let max = rows
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(first_header),
        ui::header_cell(&format!("Value ({currency})")),
        ui::header_cell(""),
    ]);
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            ui::amount_cell(value),
            Cell::new(ui::bar(value, max, BAR_WIDTH)).set_alignment(CellAlignment::Left),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(&title, ui::StyleType::Title),
        table
    )
}

/// One bar per possession acquired within `range`, valued at its end.
pub fn display_series(series: &[SeriesPoint], range: DateRange, currency: &str) -> String {
    let title = format!(
        "Possessions acquired between {} and {}, valued on {}",
        range.start(),
        range.end(),
        range.end()
    );
    if series.is_empty() {
        return format!(
            "{}\n\n{}",
            ui::style_text(&title, ui::StyleType::Title),
            ui::style_text("No possession acquired in this range.", ui::StyleType::Subtle)
        );
    }
    let rows = series
        .iter()
        .map(|p| (p.label.clone(), p.value))
        .collect();
    render(title, currency, "Possession", rows)
}

/// Net worth across `range`, one row per sampled date.
pub fn display_timeline(points: &[TimelinePoint], step: Step, currency: &str) -> String {
    let title = format!("Patrimoine over time (every {step})");
    let rows = points
        .iter()
        .map(|p| (p.date.to_string(), p.total))
        .collect();
    render(title, currency, "Date", rows)
}

pub async fn run(
    repository: &dyn AssetRepository,
    range: DateRange,
    timeline: Option<Step>,
    currency: &str,
) -> Result<()> {
    let assets = repository.list().await;

    let output = match timeline {
        Some(step) => {
            info!(start = %range.start(), end = %range.end(), %step, "Building timeline");
            let points = portfolio::timeline(&assets, range, step);
            display_timeline(&points, step, currency)
        }
        None => {
            info!(start = %range.start(), end = %range.end(), "Building series");
            let series = portfolio::series_for(&assets, range);
            display_series(&series, range, currency)
        }
    };
    println!("{output}");
    Ok(())
}
