use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use patrimoine::core::asset::{AccrualDay, AssetPatch, NewAsset, ValuationTerms};
use patrimoine::core::dates::parse_date;
use patrimoine::core::log::init_logging;
use patrimoine::core::portfolio::Step;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example configuration
    Setup,
    /// List possessions with their value on a date
    List {
        /// Valuation date, today when omitted
        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Record a new possession
    Add {
        #[arg(short, long)]
        label: String,
        /// Acquisition value
        #[arg(long, allow_negative_numbers = true)]
        value: Decimal,
        /// Acquisition date
        #[arg(short, long, value_parser = date_arg)]
        date: NaiveDate,
        /// Yearly depreciation, in percent of the acquisition value
        #[arg(short, long, allow_negative_numbers = true)]
        rate: Option<Decimal>,
        /// Amount gained for every 30 days held
        #[arg(long, allow_negative_numbers = true)]
        accrual_amount: Option<Decimal>,
        /// Day of month the accrual lands on; required for accrual
        #[arg(long)]
        accrual_day: Option<u32>,
    },
    /// Change fields of a possession
    Update {
        id: Uuid,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        value: Option<Decimal>,
        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,
        #[arg(short, long, allow_negative_numbers = true)]
        rate: Option<Decimal>,
        #[arg(long, allow_negative_numbers = true)]
        accrual_amount: Option<Decimal>,
        #[arg(long)]
        accrual_day: Option<u32>,
    },
    /// Close a possession, it no longer counts from that date
    Close {
        label: String,
        /// Closing date, today when omitted
        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Display the total value of the patrimoine on a date
    Value {
        /// Valuation date, today when omitted
        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Chart possessions acquired in a range, or net worth over it
    Chart {
        #[arg(long, value_parser = date_arg)]
        from: NaiveDate,
        #[arg(long, value_parser = date_arg)]
        to: NaiveDate,
        /// Plot total net worth at regular dates instead
        #[arg(long)]
        timeline: bool,
        /// Spacing of timeline points: day, week or month
        #[arg(long, default_value = "month", requires = "timeline")]
        step: Step,
    },
}

impl From<Commands> for patrimoine::AppCommand {
    fn from(cmd: Commands) -> patrimoine::AppCommand {
        match cmd {
            Commands::List { date } => patrimoine::AppCommand::List { date },
            Commands::Add {
                label,
                value,
                date,
                rate,
                accrual_amount,
                accrual_day,
            } => patrimoine::AppCommand::Add(NewAsset {
                label,
                acquisition_value: value,
                acquisition_date: date,
                terms: ValuationTerms {
                    depreciation_rate_percent: rate,
                    accrual_amount,
                    accrual_day: accrual_day.map(AccrualDay::Day),
                },
            }),
            Commands::Update {
                id,
                label,
                value,
                date,
                rate,
                accrual_amount,
                accrual_day,
            } => patrimoine::AppCommand::Update {
                id,
                patch: AssetPatch {
                    label,
                    acquisition_value: value,
                    acquisition_date: date,
                    depreciation_rate_percent: rate,
                    accrual_amount,
                    accrual_day: accrual_day.map(AccrualDay::Day),
                },
            },
            Commands::Close { label, date } => patrimoine::AppCommand::Close { label, date },
            Commands::Value { date } => patrimoine::AppCommand::Value { date },
            Commands::Chart {
                from,
                to,
                timeline,
                step,
            } => patrimoine::AppCommand::Chart {
                from,
                to,
                timeline: timeline.then_some(step),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => patrimoine::cli::setup::setup_at_path(path),
            None => patrimoine::cli::setup::setup(),
        },
        Some(cmd) => patrimoine::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
