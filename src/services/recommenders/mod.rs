use crate::{
    error::AppResult,
    models::{TrackId, Treatment, UserId},
};

pub mod contextual;
pub mod random;
pub mod tiered;

pub use contextual::ContextualRecommender;
pub use random::RandomRecommender;
pub use tiered::TieredRecommender;

/// Unconditional next-track policy
///
/// A fallback always produces a track id. Failures of its own lookups are
/// absorbed by degrading to a simpler pick.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FallbackRecommender: Send + Sync {
    async fn recommend_next(
        &self,
        user: UserId,
        prev_track: TrackId,
        play_fraction: f64,
    ) -> TrackId;

    /// Recommender name for logging
    fn name(&self) -> &'static str;
}

/// Strategy chosen for a single request
pub enum Recommender<'a> {
    Tiered(&'a TieredRecommender),
    Fallback(&'a dyn FallbackRecommender),
}

impl<'a> Recommender<'a> {
    /// Selects the strategy for a treatment; only `Variant1` runs the tiered recommender
    pub fn for_treatment(
        treatment: Treatment,
        tiered: &'a TieredRecommender,
        fallback: &'a dyn FallbackRecommender,
    ) -> Self {
        match treatment {
            Treatment::Variant1 => Recommender::Tiered(tiered),
            Treatment::Control => Recommender::Fallback(fallback),
        }
    }

    pub async fn recommend_next(
        &self,
        user: UserId,
        prev_track: TrackId,
        play_fraction: f64,
    ) -> AppResult<TrackId> {
        match self {
            Recommender::Tiered(tiered) => {
                tiered.recommend_next(user, prev_track, play_fraction).await
            }
            Recommender::Fallback(fallback) => {
                Ok(fallback.recommend_next(user, prev_track, play_fraction).await)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Recommender::Tiered(_) => "tiered",
            Recommender::Fallback(fallback) => fallback.name(),
        }
    }
}
