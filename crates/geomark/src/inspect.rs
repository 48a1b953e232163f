use crate::core::store::{Collection, CollectionStore, StoreError};
use serde::Serialize;

///
/// CollectionSummary
///
/// A committed collection with its current record count.
///

#[derive(Clone, Debug, Serialize)]
pub struct CollectionSummary {
    #[serde(flatten)]
    pub collection: Collection,
    pub records: usize,
}

/// Summarise every collection, in creation order.
pub fn summarize<S>(store: &S) -> Result<Vec<CollectionSummary>, StoreError>
where
    S: CollectionStore + ?Sized,
{
    store
        .collections()
        .into_iter()
        .map(|collection| {
            let records = store.count_records(&collection)?;
            Ok(CollectionSummary {
                collection,
                records,
            })
        })
        .collect()
}
