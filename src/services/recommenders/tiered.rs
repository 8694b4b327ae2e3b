use std::sync::Arc;

use crate::{
    db::{CatalogStores, Decode, KeyedStore},
    error::{AppError, AppResult},
    models::{Artist, RecommendationList, Track, TrackId, UserId},
    services::random::RandomSource,
};

use super::FallbackRecommender;

/// Below this play fraction the previous track counts as skipped
pub const EARLY_SKIP_THRESHOLD: f64 = 0.3;

/// At or above this play fraction the previous track counts as played through
pub const PLAY_THROUGH_THRESHOLD: f64 = 0.9;

/// Picks the next track from cached candidate sets keyed by engagement signal
///
/// Tiers are tried in a fixed order and the first that applies wins:
/// 1. Early skip: a random track from the user's personal top.
/// 2. Play-through: a random track from the previous artist's neighbours.
/// 3. Anything else: the fallback recommender.
///
/// A play-through of a track or artist missing from the catalog fails the
/// request. A missing or empty candidate list falls through to the next tier.
pub struct TieredRecommender {
    stores: CatalogStores,
    fallback: Arc<dyn FallbackRecommender>,
    random: Arc<dyn RandomSource>,
}

impl TieredRecommender {
    pub fn new(
        stores: CatalogStores,
        fallback: Arc<dyn FallbackRecommender>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            stores,
            fallback,
            random,
        }
    }

    pub async fn recommend_next(
        &self,
        user: UserId,
        prev_track: TrackId,
        play_fraction: f64,
    ) -> AppResult<TrackId> {
        if play_fraction < EARLY_SKIP_THRESHOLD {
            if let Some(track) = self.pick_from(self.stores.personal_top.as_ref(), user).await? {
                tracing::debug!(user, track, tier = "personal_top", "Tier matched");
                return Ok(track);
            }
        }

        if play_fraction >= PLAY_THROUGH_THRESHOLD {
            if let Some(track) = self.pick_from_artist_neighbours(prev_track).await? {
                tracing::debug!(user, track, tier = "artist_neighbours", "Tier matched");
                return Ok(track);
            }
        }

        let track = self
            .fallback
            .recommend_next(user, prev_track, play_fraction)
            .await;
        tracing::debug!(user, track, tier = "fallback", "Tier matched");

        Ok(track)
    }

    async fn pick_from_artist_neighbours(&self, prev_track: TrackId) -> AppResult<Option<TrackId>> {
        let track = match self.stores.tracks.get(prev_track).await? {
            Some(bytes) => Track::decode(&bytes)?,
            None => return Err(AppError::TrackNotFound(prev_track)),
        };

        let artist = match self.stores.artists.get(track.artist).await? {
            Some(bytes) => Artist::decode(&bytes)?,
            None => return Err(AppError::ArtistNotFound(track.artist)),
        };

        tracing::trace!(artist = artist.id, name = %artist.name, "Resolved previous artist");

        self.pick_from(self.stores.artist_neighbours.as_ref(), track.artist)
            .await
    }

    /// Random member of the list stored under `key`; absent and empty lists yield `None`
    async fn pick_from(&self, store: &dyn KeyedStore, key: i64) -> AppResult<Option<TrackId>> {
        let Some(bytes) = store.get(key).await? else {
            return Ok(None);
        };

        let candidates = RecommendationList::decode(&bytes)?;
        if candidates.is_empty() {
            tracing::debug!(store = store.name(), key, "Empty candidate list treated as absent");
            return Ok(None);
        }

        Ok(self.random.pick(candidates.as_slice()))
    }
}
