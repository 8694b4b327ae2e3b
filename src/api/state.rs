use std::sync::Arc;

use crate::db::CatalogStores;
use crate::models::{Treatment, UserId};
use crate::services::{
    data_logger::DataLogger,
    experiment::TreatmentAssigner,
    random::RandomSource,
    recommenders::{ContextualRecommender, FallbackRecommender, Recommender, TieredRecommender},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub stores: CatalogStores,
    pub assigner: Arc<dyn TreatmentAssigner>,
    pub tiered: Arc<TieredRecommender>,
    pub fallback: Arc<dyn FallbackRecommender>,
    pub data_logger: DataLogger,
}

impl AppState {
    /// Wires the recommenders over the catalog stores
    ///
    /// The contextual recommender serves control users directly and is the
    /// last tier of the tiered recommender.
    pub fn new(
        stores: CatalogStores,
        assigner: Arc<dyn TreatmentAssigner>,
        random: Arc<dyn RandomSource>,
        catalog_size: i64,
        data_logger: DataLogger,
    ) -> Self {
        let fallback: Arc<dyn FallbackRecommender> = Arc::new(ContextualRecommender::new(
            stores.tracks.clone(),
            random.clone(),
            catalog_size,
        ));
        let tiered = Arc::new(TieredRecommender::new(stores.clone(), fallback.clone(), random));

        Self {
            stores,
            assigner,
            tiered,
            fallback,
            data_logger,
        }
    }

    /// Buckets the user and returns the strategy that serves them
    pub fn recommender_for(&self, user: UserId) -> (Treatment, Recommender<'_>) {
        let treatment = self.assigner.assign(user);
        let recommender =
            Recommender::for_treatment(treatment, self.tiered.as_ref(), self.fallback.as_ref());
        (treatment, recommender)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::db::MemoryStore;
    use crate::services::data_logger::EventSink;
    use crate::services::experiment::MockTreatmentAssigner;
    use crate::services::random::SeededRandom;

    fn state_with(assigner: MockTreatmentAssigner) -> AppState {
        let stores = CatalogStores {
            tracks: Arc::new(MemoryStore::new("tracks")),
            artists: Arc::new(MemoryStore::new("artists")),
            artist_neighbours: Arc::new(MemoryStore::new("artist_neighbours")),
            personal_top: Arc::new(MemoryStore::new("personal_top")),
        };
        let (data_logger, _handle) = DataLogger::new(EventSink::Tracing);

        AppState::new(
            stores,
            Arc::new(assigner),
            Arc::new(SeededRandom::new(1)),
            10,
            data_logger,
        )
    }

    #[tokio::test]
    async fn test_variant_users_get_tiered_recommender() {
        let mut assigner = MockTreatmentAssigner::new();
        assigner
            .expect_assign()
            .with(eq(7))
            .times(1)
            .return_const(Treatment::Variant1);
        let state = state_with(assigner);

        let (treatment, recommender) = state.recommender_for(7);

        assert_eq!(treatment, Treatment::Variant1);
        assert_eq!(recommender.name(), "tiered");
    }

    #[tokio::test]
    async fn test_control_users_get_contextual_recommender() {
        let mut assigner = MockTreatmentAssigner::new();
        assigner
            .expect_assign()
            .with(eq(8))
            .times(1)
            .return_const(Treatment::Control);
        let state = state_with(assigner);

        let (treatment, recommender) = state.recommender_for(8);

        assert_eq!(treatment, Treatment::Control);
        assert_eq!(recommender.name(), "contextual");
    }
}
