use crate::catalog::parse_u64;
use crate::ctr::{CtrIntStore, CtrStrStore, CTR_VP_PREFIX};
use crate::error::IndexError;
use crate::types::{Catalog, DocEntry, TopicId, TopicIndexEntry, VideoRecord, ALL_TOPICS_ID};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RawTopic {
    topicid: String,
    title: String,
    vidlist: Vec<String>,
}

/// Read-only inputs the builder joins against. The int-keyed store is loaded
/// alongside the string-keyed one but the scoring path only consults the
/// latter.
pub struct BuildContext {
    pub catalog: Catalog,
    pub ctr_int: CtrIntStore,
    pub ctr_str: CtrStrStore,
}

/// Whether the all-topics list records every parsed topic or only the ones
/// that survive the minimum-videos threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregatePolicy {
    #[default]
    SurvivorsOnly,
    AllTopics,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Minimum popularity-scored videos a topic needs to be indexed.
    pub min_videos: usize,
    pub ctr_prefix: String,
    pub aggregate: AggregatePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            min_videos: 1,
            ctr_prefix: CTR_VP_PREFIX.to_string(),
            aggregate: AggregatePolicy::SurvivorsOnly,
        }
    }
}

/// The three index structures produced by one build run: per-topic recency
/// and popularity rankings, and the aggregate list of topic ids under
/// [`ALL_TOPICS_ID`].
#[derive(Debug, Default)]
pub struct TopicIndexes {
    pub recency: HashMap<TopicId, TopicIndexEntry>,
    pub popularity: HashMap<TopicId, TopicIndexEntry>,
    pub all_topics: HashMap<TopicId, TopicIndexEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Unstable sort over doc entries, parameterized by key extractor and
/// direction. Ties land in arbitrary order.
pub fn sort_entries<K: Ord>(
    entries: &mut [DocEntry],
    key: impl Fn(&DocEntry) -> K,
    direction: Direction,
) {
    match direction {
        Direction::Ascending => entries.sort_unstable_by(|a, b| key(a).cmp(&key(b))),
        Direction::Descending => entries.sort_unstable_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Bitmap of the non-zero bytes of `value`: bit i is set iff byte i, counting
/// from the least significant byte, is non-zero.
fn byte_occupancy(value: u64) -> u8 {
    let mut weight = 0u8;
    for i in 0..8 {
        if (value >> (i * 8)) & 0xff != 0 {
            weight |= 1 << i;
        }
    }
    weight
}

impl VideoRecord {
    pub fn recency_score(&self) -> u64 {
        self.publish_time
    }

    pub fn recency_weight(&self) -> u8 {
        byte_occupancy(self.publish_time)
    }

    /// A byte position counts if any of mthid, play count or comment count
    /// has a non-zero byte there.
    pub fn popularity_weight(&self) -> u8 {
        byte_occupancy(self.mthid | self.play_cnt | self.comment_cnt)
    }
}

/// Join one topic's member list against the catalog and the string-keyed
/// engagement store. Every catalog hit yields a recency entry; a popularity
/// entry additionally needs an engagement hit.
fn score_topic(
    raw: &RawTopic,
    topic_id: TopicId,
    ctx: &BuildContext,
    opts: &BuildOptions,
) -> (TopicIndexEntry, TopicIndexEntry) {
    let mut recency = TopicIndexEntry { title: raw.title.clone(), doc_list: Vec::new() };
    let mut popularity = TopicIndexEntry { title: raw.title.clone(), doc_list: Vec::new() };
    let mut seen: HashSet<u64> = HashSet::new();
    for vid_str in &raw.vidlist {
        let vid = match parse_u64("vid", vid_str) {
            Ok(vid) => vid,
            Err(err) => {
                warn!(error = %err, topic = topic_id, "skipping list entry");
                continue;
            }
        };
        if !seen.insert(vid) {
            warn!(error = %IndexError::DuplicateKey { vid, topic: topic_id }, "skipping list entry");
            continue;
        }
        let Some(video) = ctx.catalog.get(&vid) else {
            warn!(error = %IndexError::LookupMissing { vid }, topic = topic_id, "skipping list entry");
            continue;
        };
        recency.doc_list.push(DocEntry {
            vid,
            weight: video.recency_weight(),
            sort_val: video.recency_score(),
        });
        let ctr_key = format!("{}{}", opts.ctr_prefix, vid_str);
        match ctx.ctr_str.get(&ctr_key) {
            Some(ctr) => popularity.doc_list.push(DocEntry {
                vid,
                weight: video.popularity_weight(),
                sort_val: ctr.click,
            }),
            None => warn!(vid, topic = topic_id, "no vote-up engagement for video"),
        }
    }
    (recency, popularity)
}

/// Build all three index structures from a JSON-lines topic file. Per-line
/// and per-member failures are logged and skipped; only opening the file can
/// fail the build.
pub fn build_topic_indexes(
    path: impl AsRef<Path>,
    ctx: &BuildContext,
    opts: &BuildOptions,
) -> Result<TopicIndexes, IndexError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| IndexError::FileOpen { path: path.to_path_buf(), source })?;
    let mut indexes = TopicIndexes::default();
    let mut dropped = 0usize;
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "stopping topic scan on read error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawTopic = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "skipping malformed topic line");
                continue;
            }
        };
        let topic_id = match parse_u64("topicid", &raw.topicid) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "skipping topic");
                continue;
            }
        };
        let (mut recency, mut popularity) = score_topic(&raw, topic_id, ctx, opts);
        let survives = popularity.doc_list.len() >= opts.min_videos;
        if survives {
            sort_entries(&mut recency.doc_list, |e| e.sort_val, Direction::Descending);
            sort_entries(&mut popularity.doc_list, |e| e.sort_val, Direction::Descending);
            indexes.recency.insert(topic_id, recency);
            indexes.popularity.insert(topic_id, popularity);
        } else {
            warn!(topic = topic_id, scored = popularity.doc_list.len(), "dropping topic below minimum videos");
            dropped += 1;
        }
        if survives || opts.aggregate == AggregatePolicy::AllTopics {
            indexes
                .all_topics
                .entry(ALL_TOPICS_ID)
                .or_default()
                .doc_list
                .push(DocEntry { vid: topic_id, weight: 0, sort_val: 0 });
        }
    }
    info!(topics = indexes.recency.len(), dropped, "built topic indexes");
    Ok(indexes)
}
