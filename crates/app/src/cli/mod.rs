use clap::{Parser, Subcommand};

mod brand;
mod category;
mod db;
mod discount;
mod sweep;

#[derive(Debug, Parser)]
#[command(name = "larder-app", about = "Larder CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Sweep(sweep::SweepCommand),
    Brand(brand::BrandCommand),
    Category(category::CategoryCommand),
    Discount(discount::DiscountCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Sweep(command) => sweep::run(command).await,
            Commands::Brand(command) => brand::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Discount(command) => discount::run(command).await,
        }
    }
}
