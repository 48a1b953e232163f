mod id;
mod timestamp;

pub use id::{CollectionId, RecordId};
pub use timestamp::Timestamp;
