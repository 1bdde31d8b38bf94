use crate::codec::Endian;
use crate::error::IndexError;
use crate::framing::FrameReader;
use prost::Message;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Engagement counters for one video, decoded from CTR reduce payloads.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CtrInfo {
    #[prost(uint64, tag = "1")]
    pub click: u64,
    #[prost(uint64, tag = "2")]
    pub show: u64,
}

pub type CtrIntStore = HashMap<u64, CtrInfo>;
pub type CtrStrStore = HashMap<String, CtrInfo>;

/// Prefix carried by vote-up engagement keys; keys without it are rejected.
pub const CTR_VP_PREFIX: &str = "vu_";

fn read_file(path: &Path) -> Result<Vec<u8>, IndexError> {
    fs::read(path).map_err(|source| IndexError::FileOpen { path: path.to_path_buf(), source })
}

/// Load the engagement store keyed by numeric video id. Keys must be exactly
/// 8 bytes wide; anything else is dropped per record.
pub fn load_ctr_int(path: impl AsRef<Path>, endian: Endian) -> Result<CtrIntStore, IndexError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let mut store = CtrIntStore::new();
    let mut skipped = 0usize;
    let mut reader = FrameReader::new(&content, endian);
    while let Some((key, value)) = reader.next_record()? {
        let key: [u8; 8] = match key.try_into() {
            Ok(key) => key,
            Err(_) => {
                warn!(key_len = key.len(), "skipping engagement record with non-u64 key");
                skipped += 1;
                continue;
            }
        };
        let vid = endian.read_u64(&key);
        match CtrInfo::decode(value) {
            Ok(ctr) => {
                store.insert(vid, ctr);
            }
            Err(source) => {
                warn!(error = %IndexError::Decode { key: vid.to_string(), source }, "dropping engagement record");
                skipped += 1;
            }
        }
    }
    info!(path = %path.display(), records = store.len(), skipped, "loaded int-keyed engagement store");
    Ok(store)
}

/// Load the engagement store keyed by prefixed string key. Keys must be
/// UTF-8 and start with `prefix`; non-conforming keys are never inserted.
pub fn load_ctr_str(
    path: impl AsRef<Path>,
    endian: Endian,
    prefix: &str,
) -> Result<CtrStrStore, IndexError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let mut store = CtrStrStore::new();
    let mut skipped = 0usize;
    let mut reader = FrameReader::new(&content, endian);
    while let Some((key, value)) = reader.next_record()? {
        let key = match std::str::from_utf8(key) {
            Ok(key) => key,
            Err(_) => {
                warn!("skipping engagement record with non-utf8 key");
                skipped += 1;
                continue;
            }
        };
        match CtrInfo::decode(value) {
            Ok(ctr) if key.starts_with(prefix) => {
                store.insert(key.to_string(), ctr);
            }
            Ok(_) => {
                warn!(key, prefix, "rejecting engagement key without expected prefix");
                skipped += 1;
            }
            Err(source) => {
                warn!(error = %IndexError::Decode { key: key.to_string(), source }, "dropping engagement record");
                skipped += 1;
            }
        }
    }
    info!(path = %path.display(), records = store.len(), skipped, "loaded string-keyed engagement store");
    Ok(store)
}
