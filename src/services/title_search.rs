use crate::{
    error::{AppError, AppResult},
    models::{CatalogList, CatalogRecord, MediaKind, TitleDetails},
    services::providers::CatalogSearch,
};
use std::sync::Arc;

/// Searches the catalog by title
///
/// With a kind only that partition is searched. Without one both partitions
/// are searched together and every record carries the kind it was found
/// under.
pub async fn search_titles(
    catalog: Arc<dyn CatalogSearch>,
    kind: Option<MediaKind>,
    query: &str,
) -> AppResult<Vec<CatalogRecord>> {
    match kind {
        Some(kind) => catalog.search(kind, query).await,
        None => catalog.search_all(query).await,
    }
}

pub async fn title_details(
    catalog: Arc<dyn CatalogSearch>,
    kind: MediaKind,
    id: u64,
) -> AppResult<TitleDetails> {
    catalog.details(kind, id).await
}

/// First page of a curated list. Movies have no "on the air" list and series
/// have no "now playing" list; asking for either is invalid input.
pub async fn browse_list(
    catalog: Arc<dyn CatalogSearch>,
    kind: MediaKind,
    list: CatalogList,
) -> AppResult<Vec<CatalogRecord>> {
    if list.path(kind).is_none() {
        return Err(AppError::InvalidInput(format!(
            "No {:?} list for {}",
            list, kind
        )));
    }
    catalog.list(kind, list).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCatalogSearch;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn record(id: u64, kind: MediaKind) -> CatalogRecord {
        CatalogRecord {
            id,
            kind,
            display_title: format!("Title {}", id),
            release_date: None,
            genre_ids: vec![],
            overview: None,
            poster_path: None,
            vote_average: None,
        }
    }

    #[tokio::test]
    async fn test_search_with_kind_uses_that_partition() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_search()
            .with(eq(MediaKind::Series), eq("Dark"))
            .times(1)
            .returning(|kind, _| Ok(vec![record(70523, kind)]));
        mock.expect_search_all().never();

        let records = assert_ok!(search_titles(Arc::new(mock), Some(MediaKind::Series), "Dark").await);
        assert_eq!(records[0].id, 70523);
    }

    #[tokio::test]
    async fn test_search_without_kind_searches_both() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_search().never();
        mock.expect_search_all()
            .with(eq("Dark"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    record(70523, MediaKind::Series),
                    record(1, MediaKind::Movie),
                ])
            });

        let records = assert_ok!(search_titles(Arc::new(mock), None, "Dark").await);
        let kinds: Vec<MediaKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![MediaKind::Series, MediaKind::Movie]);
    }

    #[tokio::test]
    async fn test_browse_list_rejects_mismatched_kind() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_list().never();

        let result = browse_list(Arc::new(mock), MediaKind::Movie, CatalogList::OnTheAir).await;
        assert!(matches!(assert_err!(result), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_browse_list_delegates() {
        let mut mock = MockCatalogSearch::new();
        mock.expect_list()
            .with(eq(MediaKind::Movie), eq(CatalogList::TopRated))
            .times(1)
            .returning(|kind, _| Ok(vec![record(238, kind)]));

        let records = assert_ok!(browse_list(Arc::new(mock), MediaKind::Movie, CatalogList::TopRated).await);
        assert_eq!(records.len(), 1);
    }
}
