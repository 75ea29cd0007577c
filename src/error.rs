use thiserror::Error;

/// Errors returned when constructing a [`crate::Cache`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum Error {
    /// The cache was asked to hold zero entries.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}
