//! Lots service.

use async_trait::async_trait;
use jiff::civil::Date;
use larder::lots::{LotTransition, SweepOutcome, sweep_product};
use mockall::automock;
use tracing::{error, info};

use crate::{
    database::Db,
    domain::{
        lots::{
            errors::LotsServiceError,
            report::{SweepFailure, SweepReport},
        },
        products::{data::ProductFilter, repository::PgProductsRepository},
    },
    ids::ProductUuid,
};

#[derive(Debug, Clone)]
pub struct PgLotsService {
    db: Db,
    products: PgProductsRepository,
}

impl PgLotsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
        }
    }

    /// Sweep one product against its current row, saving any change in the same
    /// transaction. `None` when the product was deleted since the catalog was listed.
    pub(crate) async fn sweep_one(
        &self,
        product: ProductUuid,
        today: Date,
    ) -> Result<Option<LotTransition>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let Some(mut record) = self.products.lock_product(&mut tx, product).await? else {
            return Ok(None);
        };

        let transition = sweep_product(&mut record.details, today);

        if transition.is_change() {
            self.products.update_lot_quantities(&mut tx, &record).await?;
        }

        tx.commit().await?;

        Ok(Some(transition))
    }
}

#[async_trait]
impl LotsService for PgLotsService {
    async fn run_daily_sweep(&self, today: Date) -> Result<SweepReport, LotsServiceError> {
        info!(%today, "running lot sweep");

        let mut tx = self.db.begin().await?;

        let products = self
            .products
            .list_products(&mut tx, &ProductFilter::All)
            .await?;

        tx.commit().await?;

        let mut outcome = SweepOutcome::default();
        let mut failures = Vec::new();

        for (index, product) in products.iter().enumerate() {
            match self.sweep_one(product.uuid, today).await {
                Ok(transition) => {
                    outcome.record(index, transition.unwrap_or(LotTransition::Unchanged));
                }
                Err(source) => {
                    error!(
                        product = %product.uuid,
                        name = %product.details.name,
                        "failed to sweep product: {source}"
                    );

                    outcome.record(index, LotTransition::Unchanged);

                    failures.push(SweepFailure {
                        product: product.uuid,
                        name: product.details.name.clone(),
                        reason: source.to_string(),
                    });
                }
            }
        }

        let mut report = SweepReport::new(today, &outcome);

        report.persisted = outcome.changed.len();
        report.failures = failures;

        info!(
            %today,
            examined = report.examined,
            activated = report.activated,
            decayed = report.decayed,
            persisted = report.persisted,
            failed = report.failures.len(),
            "lot sweep finished"
        );

        Ok(report)
    }
}

#[automock]
#[async_trait]
/// Daily lot sweep over the whole catalog.
pub trait LotsService: Send + Sync {
    /// Sweep every product for `today`, saving only changed products.
    ///
    /// A product that fails to save is reported and skipped; the rest of the run continues.
    async fn run_daily_sweep(&self, today: Date) -> Result<SweepReport, LotsServiceError>;
}
