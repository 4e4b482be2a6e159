//! Dataset loading from the external provider's JSON file.

use std::path::Path;

use crate::analytics::types::{AnalyticsError, AnalyticsResult};

use super::types::Dataset;

/// Load a [`Dataset`] from a JSON file.
///
/// The file holds one object with optional `payments`, `rentals`,
/// `inventory`, `films`, `categories`, `film_categories`, `customers`, and
/// `stores` arrays; missing collections deserialize as empty.
pub fn load_dataset(path: &Path) -> AnalyticsResult<Dataset> {
    let raw = std::fs::read(path).map_err(AnalyticsError::Io)?;
    let dataset: Dataset = serde_json::from_slice(&raw)?;
    tracing::info!(
        path = %path.display(),
        payments = dataset.payments.len(),
        rentals = dataset.rentals.len(),
        inventory = dataset.inventory.len(),
        films = dataset.films.len(),
        customers = dataset.customers.len(),
        "loaded dataset"
    );
    Ok(dataset)
}
