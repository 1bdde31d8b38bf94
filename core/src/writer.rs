use crate::builder::TopicIndexes;
use crate::codec::Endian;
use crate::error::IndexError;
use crate::types::{DocEntry, TopicId, TopicIndexEntry};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Serialized byte size of one doc entry: 8-byte id + 1-byte weight. Written
/// once as the format header; `sort_val` is not persisted.
pub const DOC_ENTRY_SIZE: u32 = 9;

/// Key under which the aggregate all-topics list is written.
pub const ALL_TOPICS_KEY: &str = "TOPIC_ALL_8";

fn popularity_key(topic: TopicId) -> String {
    format!("TOPIC_{topic}_HOT_8")
}

fn recency_key(topic: TopicId) -> String {
    format!("TOPIC_{topic}_NEW_8")
}

fn write_record(
    out: &mut impl Write,
    endian: Endian,
    key: &str,
    doc_list: &[DocEntry],
) -> Result<(), IndexError> {
    out.write_all(&endian.u32_to_bytes(key.len() as u32))
        .map_err(|source| IndexError::Write { what: "key length", source })?;
    out.write_all(key.as_bytes())
        .map_err(|source| IndexError::Write { what: "key", source })?;
    let list_len = doc_list.len() as u32 * DOC_ENTRY_SIZE;
    out.write_all(&endian.u32_to_bytes(list_len))
        .map_err(|source| IndexError::Write { what: "list length", source })?;
    for entry in doc_list {
        out.write_all(&endian.u64_to_bytes(entry.vid))
            .map_err(|source| IndexError::Write { what: "vid", source })?;
        out.write_all(&endian.u8_to_bytes(entry.weight))
            .map_err(|source| IndexError::Write { what: "weight", source })?;
    }
    Ok(())
}

/// Map iteration order is arbitrary; the file is written ascending by topic
/// id so identical inputs produce identical bytes.
fn by_topic_id(map: &HashMap<TopicId, TopicIndexEntry>) -> Vec<(TopicId, &TopicIndexEntry)> {
    let mut entries: Vec<_> = map.iter().map(|(id, entry)| (*id, entry)).collect();
    entries.sort_unstable_by_key(|(id, _)| *id);
    entries
}

/// Serialize the three index structures into one file: the record stride,
/// then the aggregate list, the popularity lists and the recency lists, each
/// as key length, key, list byte length, entries. A failed record is
/// abandoned with a warning and the writer moves on to the next one.
pub fn dump_topic_indexes(
    path: impl AsRef<Path>,
    indexes: &TopicIndexes,
    endian: Endian,
) -> Result<(), IndexError> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|source| IndexError::FileOpen { path: path.to_path_buf(), source })?;
    let mut out = BufWriter::new(file);
    out.write_all(&endian.u32_to_bytes(DOC_ENTRY_SIZE))
        .map_err(|source| IndexError::Write { what: "record stride", source })?;

    let mut records = 0usize;
    for (_, entry) in by_topic_id(&indexes.all_topics) {
        match write_record(&mut out, endian, ALL_TOPICS_KEY, &entry.doc_list) {
            Ok(()) => records += 1,
            Err(err) => warn!(error = %err, key = ALL_TOPICS_KEY, "abandoning record"),
        }
    }
    for (topic, entry) in by_topic_id(&indexes.popularity) {
        let key = popularity_key(topic);
        match write_record(&mut out, endian, &key, &entry.doc_list) {
            Ok(()) => records += 1,
            Err(err) => warn!(error = %err, key = %key, "abandoning record"),
        }
    }
    out.flush()
        .map_err(|source| IndexError::Write { what: "popularity block", source })?;
    for (topic, entry) in by_topic_id(&indexes.recency) {
        let key = recency_key(topic);
        match write_record(&mut out, endian, &key, &entry.doc_list) {
            Ok(()) => records += 1,
            Err(err) => warn!(error = %err, key = %key, "abandoning record"),
        }
    }
    out.flush()
        .map_err(|source| IndexError::Write { what: "recency block", source })?;
    info!(path = %path.display(), records, "wrote topic index");
    Ok(())
}
