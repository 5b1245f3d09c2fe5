use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct BrandCommand {
    #[command(subcommand)]
    command: BrandSubcommand,
}

#[derive(Debug, Subcommand)]
enum BrandSubcommand {
    Create(create::CreateBrandArgs),
}

pub(crate) async fn run(command: BrandCommand) -> Result<(), String> {
    match command.command {
        BrandSubcommand::Create(args) => create::run(args).await,
    }
}
