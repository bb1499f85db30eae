use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MoodPreferences, Recommendation, RecommendationMatch, ResolvedRecommendation},
    services::{
        classifier::classify,
        prompts::build_mood_prompt,
        providers::{CatalogSearch, RecommendationSource},
        resolver::resolve,
    },
};

/// Resolves a batch of recommendations against the catalog
///
/// Every recommendation with a title gets its own catalog search, all running
/// concurrently. Results come back in input order. A failed search only
/// affects its own entry, which is reported as `Unavailable`; it is not
/// retried.
pub async fn resolve_recommendations(
    catalog: Arc<dyn CatalogSearch>,
    recommendations: Vec<Recommendation>,
) -> Vec<ResolvedRecommendation> {
    tracing::info!(
        count = recommendations.len(),
        provider = catalog.name(),
        "Resolving recommendation batch"
    );

    let pending: Vec<_> = recommendations
        .into_iter()
        .map(|rec| {
            let task = rec.has_title().then(|| {
                let catalog = Arc::clone(&catalog);
                let kind = classify(&rec.kind);
                let title = rec.title.clone();
                tokio::spawn(async move { catalog.search(kind, &title).await })
            });
            (rec, task)
        })
        .collect();

    let mut resolved = Vec::with_capacity(pending.len());

    for (rec, task) in pending {
        let outcome = match task {
            None => {
                tracing::debug!("Skipping recommendation without a title");
                RecommendationMatch::Unmatched
            }
            Some(task) => {
                let candidates = match task.await {
                    Ok(result) => result,
                    Err(e) => Err(AppError::Internal(e.to_string())),
                };

                match candidates {
                    Ok(candidates) => resolve(&rec, candidates).into(),
                    Err(e) => {
                        tracing::warn!(
                            title = %rec.title,
                            error = %e,
                            "Catalog search failed for recommendation"
                        );
                        RecommendationMatch::Unavailable {
                            error: e.to_string(),
                        }
                    }
                }
            }
        };

        resolved.push(ResolvedRecommendation {
            recommendation: rec,
            outcome,
        });
    }

    let matched = resolved
        .iter()
        .filter(|r| matches!(r.outcome, RecommendationMatch::Matched { .. }))
        .count();
    let unavailable = resolved
        .iter()
        .filter(|r| matches!(r.outcome, RecommendationMatch::Unavailable { .. }))
        .count();

    if unavailable > 0 {
        tracing::warn!(
            success_count = resolved.len() - unavailable,
            error_count = unavailable,
            "Partial catalog lookup failure"
        );
    }

    tracing::info!(
        total = resolved.len(),
        matched = matched,
        "Recommendation batch resolved"
    );

    resolved
}

/// Turns questionnaire answers into resolved recommendations
///
/// Fails only if the recommendation source fails; catalog problems are
/// reported per entry.
pub async fn recommend_for_mood(
    source: Arc<dyn RecommendationSource>,
    catalog: Arc<dyn CatalogSearch>,
    prefs: &MoodPreferences,
) -> AppResult<Vec<ResolvedRecommendation>> {
    let prompt = build_mood_prompt(prefs);
    tracing::debug!(prompt = %prompt, provider = source.name(), "Requesting recommendations");

    let recommendations = source.recommend(&prompt).await?;

    Ok(resolve_recommendations(catalog, recommendations).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{CatalogRecord, MediaKind},
        services::providers::{MockCatalogSearch, MockRecommendationSource},
    };
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn record(id: u64, kind: MediaKind, release_date: &str, genre_ids: &[u32]) -> CatalogRecord {
        CatalogRecord {
            id,
            kind,
            display_title: format!("Title {}", id),
            release_date: Some(release_date.to_string()),
            genre_ids: genre_ids.to_vec(),
            overview: None,
            poster_path: None,
            vote_average: None,
        }
    }

    fn catalog(mock: MockCatalogSearch) -> Arc<dyn CatalogSearch> {
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_batch_resolves_in_input_order() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search()
            .with(eq(MediaKind::Movie), eq("Inception"))
            .times(1)
            .returning(|kind, _| {
                Ok(vec![
                    record(1, kind, "2010-07-16", &[878]),
                    record(2, kind, "2020-01-01", &[35]),
                ])
            });
        mock.expect_search()
            .with(eq(MediaKind::Series), eq("Dark"))
            .times(1)
            .returning(|kind, _| Ok(vec![record(70523, kind, "2017-12-01", &[18])]));

        let recs = vec![
            Recommendation::new("Inception", "Movie")
                .with_release_year("2010")
                .with_genres(["Sci-Fi"])
                .with_reason("Dreams within dreams."),
            Recommendation::new("Dark", "TV Show"),
        ];

        let resolved = resolve_recommendations(catalog(mock), recs).await;

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].recommendation.title, "Inception");
        assert_eq!(
            resolved[0].recommendation.reason.as_deref(),
            Some("Dreams within dreams.")
        );
        match &resolved[0].outcome {
            RecommendationMatch::Matched { record } => assert_eq!(record.id, 1),
            other => panic!("unexpected outcome {:?}", other),
        }
        match &resolved[1].outcome {
            RecommendationMatch::Matched { record } => {
                assert_eq!(record.id, 70523);
                assert_eq!(record.kind, MediaKind::Series);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_search_is_isolated() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search()
            .with(eq(MediaKind::Movie), eq("Broken"))
            .returning(|_, _| Err(AppError::ExternalApi("status 503".to_string())));
        mock.expect_search()
            .with(eq(MediaKind::Movie), eq("Heat"))
            .returning(|kind, _| Ok(vec![record(949, kind, "1995-12-15", &[80])]));

        let recs = vec![
            Recommendation::new("Broken", "Movie"),
            Recommendation::new("Heat", "Movie"),
        ];

        let resolved = resolve_recommendations(catalog(mock), recs).await;

        match &resolved[0].outcome {
            RecommendationMatch::Unavailable { error } => assert!(error.contains("503")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(
            resolved[1].outcome,
            RecommendationMatch::Matched { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_title_is_never_searched() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search().times(0);

        let resolved =
            resolve_recommendations(catalog(mock), vec![Recommendation::new("", "Movie")]).await;

        assert_eq!(resolved[0].outcome, RecommendationMatch::Unmatched);
    }

    #[tokio::test]
    async fn test_no_results_is_unmatched() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search().returning(|_, _| Ok(vec![]));

        let resolved = resolve_recommendations(
            catalog(mock),
            vec![Recommendation::new("Nonexistent Film", "Movie")],
        )
        .await;

        assert_eq!(resolved[0].outcome, RecommendationMatch::Unmatched);
    }

    #[tokio::test]
    async fn test_documentary_is_searched_as_series() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search()
            .with(eq(MediaKind::Series), eq("Planet Earth"))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        resolve_recommendations(
            catalog(mock),
            vec![Recommendation::new("Planet Earth", "Documentary")],
        )
        .await;
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");

        let resolved = resolve_recommendations(catalog(mock), vec![]).await;
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_for_mood_sends_prompt() {
        let mut source = MockRecommendationSource::new();
        source.expect_name().return_const("mock");
        source
            .expect_recommend()
            .withf(|prompt: &str| prompt.contains("What vibe are you going for?: Serious"))
            .times(1)
            .returning(|_| Ok(vec![Recommendation::new("Heat", "Movie")]));

        let mut mock = MockCatalogSearch::new();
        mock.expect_name().return_const("mock");
        mock.expect_search()
            .returning(|kind, _| Ok(vec![record(949, kind, "1995-12-15", &[80])]));

        let prefs = MoodPreferences {
            tone: Some("Serious".to_string()),
            ..Default::default()
        };

        let resolved = assert_ok!(recommend_for_mood(Arc::new(source), catalog(mock), &prefs).await);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(
            resolved[0].outcome,
            RecommendationMatch::Matched { .. }
        ));
    }

    #[tokio::test]
    async fn test_recommend_for_mood_propagates_source_failure() {
        let mut source = MockRecommendationSource::new();
        source.expect_name().return_const("mock");
        source
            .expect_recommend()
            .returning(|_| Err(AppError::ExternalApi("quota exceeded".to_string())));

        let mut mock = MockCatalogSearch::new();
        mock.expect_search().times(0);

        let result =
            recommend_for_mood(Arc::new(source), catalog(mock), &MoodPreferences::default())
                .await;

        assert!(matches!(assert_err!(result), AppError::ExternalApi(_)));
    }
}
