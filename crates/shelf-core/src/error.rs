use thiserror::Error;

use crate::types::ItemId;

#[derive(Debug, Error)]
pub enum Error {
    /// The catalog source could not be reached or its document could not be decoded.
    #[error("Failed to load catalog: {0}")]
    CatalogLoad(String),

    /// Entry `index` of the catalog document failed validation. The whole batch is rejected.
    #[error("Malformed catalog entry #{index}: {reason}")]
    MalformedCatalog { index: usize, reason: String },

    #[error("Invalid {parameter}: '{value}'")]
    InvalidQueryParameter { parameter: &'static str, value: String },

    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Favourites persistence failed: {0}")]
    FavouritesPersistence(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog { index, reason: reason.into() }
    }

    pub fn invalid_parameter(parameter: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidQueryParameter { parameter, value: value.into() }
    }
}
