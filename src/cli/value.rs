use super::ui;
use crate::core::portfolio::{self, PortfolioSnapshot};
use crate::store::AssetRepository;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use tracing::info;

impl PortfolioSnapshot {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Possession"),
            ui::header_cell("Status"),
            ui::header_cell(&format!("Value ({currency})")),
        ]);

        for result in &self.per_asset {
            table.add_row(vec![
                Cell::new(&result.label),
                ui::status_cell(result.active),
                ui::amount_cell(result.value),
            ]);
        }

        let mut output = format!(
            "Portfolio value on {}\n\n",
            ui::style_text(&self.date.format("%Y-%m-%d").to_string(), ui::StyleType::Title)
        );

        if self.per_asset.is_empty() {
            output.push_str(&ui::style_text("No possessions recorded.", ui::StyleType::Subtle));
        } else {
            output.push_str(&table.to_string());
        }

        output.push_str(&format!(
            "\n\nTotal Value ({}): {}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            ui::style_text(&ui::format_amount(self.total), ui::StyleType::TotalValue)
        ));

        output
    }
}

pub async fn run(
    repository: &dyn AssetRepository,
    date: NaiveDate,
    currency: &str,
) -> Result<()> {
    let assets = repository.list().await;
    info!(%date, assets = assets.len(), "Valuing portfolio");

    let snapshot = portfolio::snapshot_at(&assets, date);
    println!("{}", snapshot.display_as_table(currency));
    Ok(())
}
