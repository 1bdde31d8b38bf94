use std::collections::HashMap;

pub type VideoId = u64;
pub type TopicId = u64;

/// Reserved topic id under which the aggregate all-topics list is kept.
pub const ALL_TOPICS_ID: TopicId = 1111;

/// One video's catalog metadata, keyed by its numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: String,
    pub title_sign: u64,
    pub mthid: u64,
    pub play_cnt: u64,
    pub comment_cnt: u64,
    pub publish_time: u64,
}

/// One ranked document in a topic's index list. Only `vid` and `weight`
/// survive serialization; `sort_val` orders the list before the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocEntry {
    pub vid: VideoId,
    pub weight: u8,
    pub sort_val: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TopicIndexEntry {
    pub title: String,
    pub doc_list: Vec<DocEntry>,
}

pub type Catalog = HashMap<VideoId, VideoRecord>;
