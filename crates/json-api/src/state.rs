//! State

use std::sync::Arc;

use jiff::civil::Date;
use larder_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }

    /// The day prices and sweeps are computed for.
    pub(crate) fn today(&self) -> Date {
        self.app.clock.today()
    }
}
