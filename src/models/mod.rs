pub mod track;
pub mod treatment;

pub use track::{Artist, ArtistId, RecommendationList, Track, TrackId, UserId};
pub use treatment::Treatment;

use serde::{Deserialize, Serialize};

/// Body of `/next` and `/last` requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlaybackEvent {
    /// Previously played track
    pub track: TrackId,
    /// Fraction of the previous track that was played
    pub time: f64,
}

/// Response of the `/next` endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NextTrackResponse {
    pub user: UserId,
    pub track: TrackId,
}

/// Response of the `/last` endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LastTrackResponse {
    pub user: UserId,
}
