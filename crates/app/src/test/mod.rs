//! Service-level test support backed by a throwaway Postgres container.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
