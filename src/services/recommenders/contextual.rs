use std::sync::Arc;

use crate::{
    db::{Decode, KeyedStore},
    error::AppResult,
    models::{Track, TrackId, UserId},
    services::random::RandomSource,
};

use super::{FallbackRecommender, RandomRecommender};

/// Recommends from the contextual candidates cached on the previous track
///
/// Falls back to a random catalog track when the previous track is unknown,
/// carries no candidates, or cannot be read.
pub struct ContextualRecommender {
    tracks: Arc<dyn KeyedStore>,
    random: Arc<dyn RandomSource>,
    fallback: RandomRecommender,
}

impl ContextualRecommender {
    pub fn new(
        tracks: Arc<dyn KeyedStore>,
        random: Arc<dyn RandomSource>,
        catalog_size: i64,
    ) -> Self {
        Self {
            tracks,
            fallback: RandomRecommender::new(catalog_size, random.clone()),
            random,
        }
    }

    async fn contextual_candidates(&self, prev_track: TrackId) -> AppResult<Vec<TrackId>> {
        let Some(bytes) = self.tracks.get(prev_track).await? else {
            return Ok(Vec::new());
        };

        Ok(Track::decode(&bytes)?.recommendations.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl FallbackRecommender for ContextualRecommender {
    async fn recommend_next(
        &self,
        user: UserId,
        prev_track: TrackId,
        play_fraction: f64,
    ) -> TrackId {
        let candidates = match self.contextual_candidates(prev_track).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    prev_track,
                    "Contextual lookup failed, using random track"
                );
                Vec::new()
            }
        };

        match self.random.pick(&candidates) {
            Some(track) => track,
            None => self.fallback.recommend_next(user, prev_track, play_fraction).await,
        }
    }

    fn name(&self) -> &'static str {
        "contextual"
    }
}
