pub mod cli;
pub mod core;
pub mod store;

use crate::core::asset::{AssetPatch, NewAsset};
use crate::core::config::AppConfig;
use crate::core::dates::DateRange;
use crate::core::portfolio::Step;
use crate::store::{AssetRepository, MemoryRepository};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// A command to run against the asset book. Dates left as `None` mean today.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    List {
        date: Option<NaiveDate>,
    },
    Add(NewAsset),
    Update {
        id: Uuid,
        patch: AssetPatch,
    },
    Close {
        label: String,
        date: Option<NaiveDate>,
    },
    Value {
        date: Option<NaiveDate>,
    },
    Chart {
        from: NaiveDate,
        to: NaiveDate,
        timeline: Option<Step>,
    },
}

impl AppCommand {
    fn mutates(&self) -> bool {
        matches!(
            self,
            AppCommand::Add(_) | AppCommand::Update { .. } | AppCommand::Close { .. }
        )
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Loads the asset book, runs `command` on it and, when the command changed
/// the book, writes it back to the same file.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Patrimoine starting...");

    let path = AppConfig::resolve_path(config_path)?;
    let mut config = AppConfig::load_from_path(&path)?;
    debug!("Loaded config: {config:#?}");

    let repository = MemoryRepository::from_assets(config.assets.clone());
    let currency = config.currency.clone();
    let mutates = command.mutates();

    match command {
        AppCommand::List { date } => {
            cli::assets::list(&repository, date.unwrap_or_else(today), &currency).await?
        }
        AppCommand::Add(new_asset) => {
            cli::assets::add(&repository, new_asset).await?;
        }
        AppCommand::Update { id, patch } => {
            cli::assets::update(&repository, id, patch).await?;
        }
        AppCommand::Close { label, date } => {
            cli::assets::close(&repository, &label, date.unwrap_or_else(today)).await?;
        }
        AppCommand::Value { date } => {
            cli::value::run(&repository, date.unwrap_or_else(today), &currency).await?
        }
        AppCommand::Chart { from, to, timeline } => {
            let range = DateRange::new(from, to)?;
            cli::chart::run(&repository, range, timeline, &currency).await?
        }
    }

    if mutates {
        config.assets = repository.list().await;
        config.save_to_path(&path)?;
    }
    Ok(())
}
