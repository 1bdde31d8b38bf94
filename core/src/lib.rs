pub mod builder;
pub mod catalog;
pub mod codec;
pub mod ctr;
pub mod error;
pub mod framing;
pub mod types;
pub mod writer;

pub use error::IndexError;
pub use types::{Catalog, DocEntry, TopicId, TopicIndexEntry, VideoId, VideoRecord, ALL_TOPICS_ID};
