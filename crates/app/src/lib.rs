//! Catalog services, persistence and the lot sweep boundary for Larder.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;

#[cfg(test)]
mod test;
