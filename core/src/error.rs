use std::path::PathBuf;
use thiserror::Error;

/// Tagged error for every failure class in the pipeline. Only the fatal
/// variants (file access, framing, flush) propagate out of the loaders;
/// per-record variants are logged at the point of the skip.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record at byte {offset} declares {declared} bytes but only {remaining} remain")]
    Framing {
        offset: usize,
        declared: u64,
        remaining: usize,
    },

    #[error("cannot parse {what} from {value:?}")]
    Parse { what: &'static str, value: String },

    #[error("no catalog entry for video {vid}")]
    LookupMissing { vid: u64 },

    #[error("duplicate video {vid} in topic {topic}")]
    DuplicateKey { vid: u64, topic: u64 },

    #[error("cannot decode engagement payload for key {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: prost::DecodeError,
    },

    #[error("cannot write {what}: {source}")]
    Write {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}
