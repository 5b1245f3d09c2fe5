use clap::Args;
use larder_app::{
    database::{self, Db},
    domain::categories::{CategoriesService, PgCategoriesService, data::NewCategory},
    ids::CategoryUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional category UUID; generated when omitted
    #[arg(long)]
    category_uuid: Option<CategoryUuid>,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let category = PgCategoriesService::new(Db::new(pool))
        .create_category(NewCategory {
            uuid: args.category_uuid.unwrap_or_default(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);

    Ok(())
}
