use crate::models::{Product, SavedProduct};
use crate::storage::{ProductStore, StoreError};
use std::{collections::HashMap, time::Duration};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum BatchError {
    /// A record failed validation; nothing was written.
    #[error("record {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },

    /// The store could not be prepared; nothing was written.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] StoreError),

    /// Some upserts failed, listed in request order. The others stay written.
    #[error("{} upserts failed", .failed.len())]
    Partial { failed: Vec<String> },

    /// The batch did not finish in time. Upserts already handed to the store
    /// still complete.
    #[error("batch exceeded {}ms", .0.as_millis())]
    Timeout(Duration),
}

pub fn validate_batch(products: &[Product]) -> Result<(), BatchError> {
    for (index, product) in products.iter().enumerate() {
        if product.name.trim().is_empty() {
            return Err(BatchError::Invalid {
                index,
                reason: "name is empty".to_string(),
            });
        }
    }
    Ok(())
}

/// Upserts every record by name, all at once, and returns the written
/// records in request order.
pub async fn upsert_batch(
    store: &ProductStore,
    products: Vec<Product>,
    limit: Duration,
) -> Result<Vec<SavedProduct>, BatchError> {
    validate_batch(&products)?;
    tokio::time::timeout(limit, run_batch(store, products))
        .await
        .map_err(|_| BatchError::Timeout(limit))?
}

async fn run_batch(
    store: &ProductStore,
    products: Vec<Product>,
) -> Result<Vec<SavedProduct>, BatchError> {
    store.ensure_connected().await.map_err(BatchError::Unavailable)?;

    let count = products.len();
    let mut tasks = JoinSet::new();
    let mut names = HashMap::with_capacity(count);
    for (index, product) in products.into_iter().enumerate() {
        let store = store.clone();
        let name = product.name.clone();
        let handle = tasks.spawn(async move { (index, store.upsert_by_name(product).await) });
        names.insert(handle.id(), (index, name));
    }

    let mut saved = Vec::with_capacity(count);
    let mut failed = Vec::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, (index, Ok(record)))) => saved.push((index, record)),
            Ok((id, (_, Err(err)))) => {
                let (index, name) = names[&id].clone();
                error!("upsert of {name:?} failed: {err}");
                failed.push((index, name));
            }
            Err(err) => {
                let (index, name) = names[&err.id()].clone();
                error!("upsert task for {name:?} did not complete: {err}");
                failed.push((index, name));
            }
        }
    }

    if !failed.is_empty() {
        failed.sort_by_key(|(index, _)| *index);
        return Err(BatchError::Partial {
            failed: failed.into_iter().map(|(_, name)| name).collect(),
        });
    }

    saved.sort_by_key(|(index, _)| *index);
    info!("upserted {} products", saved.len());
    Ok(saved.into_iter().map(|(_, record)| record).collect())
}
