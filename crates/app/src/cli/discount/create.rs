use clap::Args;
use jiff::Timestamp;
use larder::discounts::DiscountKind;
use larder_app::{
    database::{self, Db},
    domain::discounts::{DiscountsService, PgDiscountsService, data::NewDiscount},
    ids::{DiscountUuid, ProductUuid},
};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CreateDiscountArgs {
    /// Product the discount applies to
    #[arg(long)]
    product_uuid: ProductUuid,

    /// Discount kind, `percent` or `fixed`
    #[arg(long)]
    kind: String,

    /// Percentage points or a fixed amount, depending on kind
    #[arg(long)]
    value: Decimal,

    /// Start of the active window (exclusive), e.g. 2025-06-01T00:00:00Z
    #[arg(long)]
    starts_at: Timestamp,

    /// End of the active window (exclusive)
    #[arg(long)]
    ends_at: Timestamp,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateDiscountArgs) -> Result<(), String> {
    if args.ends_at <= args.starts_at {
        return Err("ends_at must be after starts_at".to_string());
    }

    let kind = DiscountKind::parse(&args.kind);

    if let DiscountKind::Other(other) = &kind {
        eprintln!("warning: discount kind {other:?} is not recognised and will not change prices");
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let discount = PgDiscountsService::new(Db::new(pool))
        .create_discount(NewDiscount {
            uuid: DiscountUuid::new(),
            product: args.product_uuid,
            kind,
            value: args.value,
            starts_at: args.starts_at,
            ends_at: args.ends_at,
        })
        .await
        .map_err(|error| format!("failed to create discount: {error}"))?;

    println!("discount_uuid: {}", discount.uuid);
    println!("product_uuid: {}", discount.product);
    println!("kind: {}", discount.discount.kind);
    println!("value: {}", discount.discount.value);

    Ok(())
}
