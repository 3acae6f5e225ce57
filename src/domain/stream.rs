//! Playable stream descriptors

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub quality: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtitleDescriptor {
    pub language: String,
    pub url: String,
}

/// Everything playable for one translator / episode selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBundle {
    pub streams: Vec<StreamDescriptor>,
    pub subtitles: Vec<SubtitleDescriptor>,
}

impl StreamBundle {
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
