use crate::error::IndexError;
use crate::types::{Catalog, VideoRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Wire shape of one catalog line; numeric ids arrive as strings.
#[derive(Debug, Deserialize)]
struct RawVideo {
    title: String,
    vid: String,
    title_sign: u64,
    mthid: String,
    playcnt: u64,
    commentcnt: u64,
    pubtime: u64,
}

pub(crate) fn parse_u64(what: &'static str, value: &str) -> Result<u64, IndexError> {
    value
        .parse::<u64>()
        .map_err(|_| IndexError::Parse { what, value: value.to_string() })
}

/// Load the video catalog from a JSON-lines file, keyed by the parsed `vid`.
/// Malformed lines are logged and skipped; later lines win on duplicate ids.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, IndexError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| IndexError::FileOpen { path: path.to_path_buf(), source })?;
    let mut catalog = Catalog::new();
    let mut skipped = 0usize;
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "stopping catalog scan on read error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawVideo = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "skipping malformed catalog line");
                skipped += 1;
                continue;
            }
        };
        let id = match parse_u64("vid", &raw.vid) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "skipping catalog line");
                skipped += 1;
                continue;
            }
        };
        // A malformed mthid degrades the popularity weight, not the record.
        let mthid = parse_u64("mthid", &raw.mthid).map_or_else(
            |err| {
                warn!(error = %err, vid = id, "defaulting mthid to 0");
                0
            },
            |v| v,
        );
        catalog.insert(
            id,
            VideoRecord {
                id,
                title: raw.title,
                title_sign: raw.title_sign,
                mthid,
                play_cnt: raw.playcnt,
                comment_cnt: raw.commentcnt,
                publish_time: raw.pubtime,
            },
        );
    }
    info!(videos = catalog.len(), skipped, "loaded video catalog");
    Ok(catalog)
}
