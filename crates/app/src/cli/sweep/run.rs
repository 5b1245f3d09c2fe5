use clap::{Args, ValueEnum};
use jiff::{civil::Date, tz::TimeZone};
use larder_app::{
    clock::{Clock, SystemClock},
    database::{self, Db},
    domain::lots::{LotsService, PgLotsService, report::SweepReport},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct RunSweepArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Day to sweep for; defaults to today in `--time-zone`
    #[arg(long)]
    date: Option<Date>,

    /// IANA time zone used to resolve today; defaults to the system zone
    #[arg(long, env = "SWEEP_TIME_ZONE")]
    time_zone: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub(crate) async fn run(args: RunSweepArgs) -> Result<(), String> {
    let today = match args.date {
        Some(date) => date,
        None => clock(args.time_zone.as_deref())?.today(),
    };

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let report = PgLotsService::new(Db::new(pool))
        .run_daily_sweep(today)
        .await
        .map_err(|error| format!("failed to run sweep: {error}"))?;

    match args.format {
        OutputFormat::Table => println!("{}", render_table(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|error| format!("failed to serialize report: {error}"))?
        ),
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(format!(
            "{} product(s) could not be saved",
            report.failures.len()
        ))
    }
}

fn clock(time_zone: Option<&str>) -> Result<SystemClock, String> {
    match time_zone {
        Some(name) => TimeZone::get(name)
            .map(SystemClock::new)
            .map_err(|error| format!("unknown time zone {name:?}: {error}")),
        None => Ok(SystemClock::local()),
    }
}

fn render_table(report: &SweepReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Date", "Examined", "Activated", "Decayed", "Saved", "Failed"]);
    builder.push_record([
        report.today.to_string(),
        report.examined.to_string(),
        report.activated.to_string(),
        report.decayed.to_string(),
        report.persisted.to_string(),
        report.failures.len().to_string(),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());

    let mut out = table.to_string();

    if !report.failures.is_empty() {
        let mut failures = Builder::default();

        failures.push_record(["Product", "Name", "Reason"]);

        for failure in &report.failures {
            failures.push_record([
                failure.product.to_string(),
                failure.name.clone(),
                failure.reason.clone(),
            ]);
        }

        let mut table = failures.build();

        table.with(Style::modern_rounded());

        out.push('\n');
        out.push_str(&table.to_string());
    }

    out
}
