use serde::{Deserialize, Serialize};

pub type TrackId = i64;
pub type ArtistId = i64;
pub type UserId = i64;

/// A catalog track as stored in the track store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    #[serde(alias = "track")]
    pub id: TrackId,
    pub artist: ArtistId,
    #[serde(default)]
    pub title: String,
    /// Contextual candidates computed offline for this track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<TrackId>>,
}

/// A catalog artist as stored in the artist store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: ArtistId,
    #[serde(default)]
    pub name: String,
}

/// Candidate track ids cached under a single key
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecommendationList(pub Vec<TrackId>);

impl RecommendationList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TrackId] {
        &self.0
    }
}
