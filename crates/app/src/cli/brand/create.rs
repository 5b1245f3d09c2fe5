use clap::Args;
use larder_app::{
    database::{self, Db},
    domain::brands::{BrandsService, PgBrandsService, data::NewBrand},
    ids::BrandUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateBrandArgs {
    /// Brand name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional brand UUID; generated when omitted
    #[arg(long)]
    brand_uuid: Option<BrandUuid>,
}

pub(crate) async fn run(args: CreateBrandArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let brand = PgBrandsService::new(Db::new(pool))
        .create_brand(NewBrand {
            uuid: args.brand_uuid.unwrap_or_default(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create brand: {error}"))?;

    println!("brand_uuid: {}", brand.uuid);
    println!("brand_name: {}", brand.name);

    Ok(())
}
