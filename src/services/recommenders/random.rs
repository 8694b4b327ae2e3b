use std::sync::Arc;

use crate::{
    models::{TrackId, UserId},
    services::random::RandomSource,
};

use super::FallbackRecommender;

/// Recommends a uniformly random track from the whole catalog
pub struct RandomRecommender {
    catalog_size: i64,
    random: Arc<dyn RandomSource>,
}

impl RandomRecommender {
    pub fn new(catalog_size: i64, random: Arc<dyn RandomSource>) -> Self {
        Self {
            catalog_size: catalog_size.max(1),
            random,
        }
    }
}

#[async_trait::async_trait]
impl FallbackRecommender for RandomRecommender {
    async fn recommend_next(
        &self,
        _user: UserId,
        _prev_track: TrackId,
        _play_fraction: f64,
    ) -> TrackId {
        self.random.index(self.catalog_size as usize) as TrackId
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
