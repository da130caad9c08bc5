use super::ui;
use crate::core::asset::{Asset, AssetPatch, NewAsset};
use crate::core::portfolio;
use crate::store::AssetRepository;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::Cell;
use tracing::info;
use uuid::Uuid;

/// Renders every asset with its terms and its value on `date`.
pub fn display_assets(assets: &[Asset], date: NaiveDate, currency: &str) -> String {
    if assets.is_empty() {
        return ui::style_text(
            "No possessions recorded. Use `patrimoine add` to create one.",
            ui::StyleType::Subtle,
        );
    }

    let snapshot = portfolio::snapshot_at(assets, date);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Possession"),
        ui::header_cell("Acquired"),
        ui::header_cell(&format!("Initial ({currency})")),
        ui::header_cell("Valuation"),
        ui::header_cell("Closed"),
        ui::header_cell(&format!("Value on {date} ({currency})")),
    ]);

    for (asset, result) in assets.iter().zip(&snapshot.per_asset) {
        table.add_row(vec![
            Cell::new(asset.id()),
            Cell::new(asset.label()),
            Cell::new(asset.acquisition_date()),
            ui::amount_cell(asset.acquisition_value()),
            Cell::new(asset.mode()),
            ui::format_optional_cell(asset.closed_date(), |d| d.to_string()),
            ui::amount_cell(result.value),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(
            &format!("{} possession(s)", assets.len()),
            ui::StyleType::Title
        ),
        table
    )
}

pub async fn list(
    repository: &dyn AssetRepository,
    date: NaiveDate,
    currency: &str,
) -> Result<()> {
    let assets = repository.list().await;
    println!("{}", display_assets(&assets, date, currency));
    Ok(())
}

pub async fn add(repository: &dyn AssetRepository, new_asset: NewAsset) -> Result<Asset> {
    let label = new_asset.label.clone();
    let asset = repository
        .insert(new_asset)
        .await
        .with_context(|| format!("Failed to create possession '{label}'"))?;
    info!(id = %asset.id(), "Created possession");
    println!(
        "{} {} ({})",
        ui::style_text("Created", ui::StyleType::Success),
        asset.label(),
        asset.id()
    );
    Ok(asset)
}

pub async fn update(
    repository: &dyn AssetRepository,
    id: Uuid,
    patch: AssetPatch,
) -> Result<Asset> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one field to change");
    }
    let asset = repository
        .update_by_id(id, patch)
        .await
        .with_context(|| format!("Failed to update possession {id}"))?;
    info!(%id, "Updated possession");
    println!(
        "{} {} ({})",
        ui::style_text("Updated", ui::StyleType::Success),
        asset.label(),
        asset.mode()
    );
    Ok(asset)
}

pub async fn close(
    repository: &dyn AssetRepository,
    label: &str,
    date: NaiveDate,
) -> Result<Asset> {
    let asset = repository
        .close_by_label(label, date)
        .await
        .with_context(|| format!("Failed to close possession '{label}'"))?;
    info!(id = %asset.id(), %date, "Closed possession");
    println!(
        "{} {} as of {}",
        ui::style_text("Closed", ui::StyleType::Success),
        asset.label(),
        date
    );
    Ok(asset)
}
