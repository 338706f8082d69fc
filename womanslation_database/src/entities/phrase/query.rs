use sqlx::{PgConnection, Postgres, QueryBuilder};
use womanslation_core::{api_models::PhraseSortOrder, id::PhraseId};

use super::{InternalPhraseModel, PhraseModel};
use crate::{IntoExternalModel, QueryResult};


const PHRASE_COLUMNS: &str = "id, text, suggested_response, tags, views, create_date";


/// Filtering, ordering and paging of a phrase listing.
///
/// Tags and search text are expected to already be normalized.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseListOptions {
    pub page_index: u32,
    pub page_size: u32,
    pub sort_order: PhraseSortOrder,
    pub search_text: Option<String>,
    pub tags: Vec<String>,
}

impl PhraseListOptions {
    fn offset(&self) -> i64 {
        i64::from(self.page_index) * i64::from(self.page_size)
    }
}


fn order_by_clause(sort_order: PhraseSortOrder) -> &'static str {
    // The trailing id keeps pages stable when the primary key of the sort ties.
    match sort_order {
        PhraseSortOrder::AToZ => " ORDER BY text ASC, id ASC",
        PhraseSortOrder::ZToA => " ORDER BY text DESC, id DESC",
        PhraseSortOrder::Oldest => " ORDER BY create_date ASC, id ASC",
        PhraseSortOrder::Newest => " ORDER BY create_date DESC, id DESC",
        PhraseSortOrder::MostViewed => " ORDER BY views DESC, id ASC",
    }
}

fn build_phrase_list_query(options: PhraseListOptions) -> QueryBuilder<'static, Postgres> {
    let offset = options.offset();
    let limit = i64::from(options.page_size);

    let mut list_query_builder = QueryBuilder::new("SELECT ");
    list_query_builder.push(PHRASE_COLUMNS);
    list_query_builder.push(" FROM womanslation.phrase");

    let has_search_text = options.search_text.is_some();
    let has_tags = !options.tags.is_empty();

    if has_search_text || has_tags {
        list_query_builder.push(" WHERE ");
    }

    let mut separated_conditions = list_query_builder.separated(" AND ");

    if let Some(search_text) = options.search_text {
        separated_conditions.push("strpos(lower(text), lower(");
        separated_conditions.push_bind_unseparated(search_text);
        separated_conditions.push_unseparated(")) > 0");
    }

    if has_tags {
        separated_conditions.push("tags && ");
        separated_conditions.push_bind_unseparated(options.tags);
    }


    list_query_builder.push(order_by_clause(options.sort_order));

    list_query_builder.push(" LIMIT ");
    list_query_builder.push_bind(limit);
    list_query_builder.push(" OFFSET ");
    list_query_builder.push_bind(offset);

    list_query_builder
}



pub struct PhraseQuery;

impl PhraseQuery {
    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<Option<PhraseModel>> {
        let internal_phrase = sqlx::query_as::<_, InternalPhraseModel>(
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase \
                WHERE id = $1",
        )
        .bind(phrase_id.into_uuid())
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_phrase.map(IntoExternalModel::into_external_model))
    }

    pub async fn get_by_text(
        database_connection: &mut PgConnection,
        phrase_text: &str,
    ) -> QueryResult<Option<PhraseModel>> {
        let internal_phrase = sqlx::query_as::<_, InternalPhraseModel>(
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase \
                WHERE text = $1",
        )
        .bind(phrase_text)
        .fetch_optional(database_connection)
        .await?;

        Ok(internal_phrase.map(IntoExternalModel::into_external_model))
    }

    pub async fn exists_by_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM womanslation.phrase WHERE id = $1)",
        )
        .bind(phrase_id.into_uuid())
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    /// Locks the phrase row until the end of the current transaction.
    ///
    /// Returns `false` if the phrase does not exist.
    pub async fn lock_by_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<bool> {
        let locked_phrase_id = sqlx::query_scalar::<_, uuid::Uuid>(
            "SELECT id FROM womanslation.phrase WHERE id = $1 FOR UPDATE",
        )
        .bind(phrase_id.into_uuid())
        .fetch_optional(database_connection)
        .await?;

        Ok(locked_phrase_id.is_some())
    }

    /// Checks whether `phrase_text` belongs to any phrase other than `excluded_phrase_id`.
    pub async fn exists_by_text(
        database_connection: &mut PgConnection,
        phrase_text: &str,
        excluded_phrase_id: Option<PhraseId>,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM womanslation.phrase \
                    WHERE text = $1 AND ($2::uuid IS NULL OR id <> $2) \
            )",
        )
        .bind(phrase_text)
        .bind(excluded_phrase_id.map(PhraseId::into_uuid))
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    pub async fn exists_any(database_connection: &mut PgConnection) -> QueryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM womanslation.phrase)")
                .fetch_one(database_connection)
                .await?;

        Ok(exists)
    }

    pub async fn list(
        database_connection: &mut PgConnection,
        options: PhraseListOptions,
    ) -> QueryResult<Vec<PhraseModel>> {
        let mut list_query_builder = build_phrase_list_query(options);

        let internal_phrases = list_query_builder
            .build_query_as::<InternalPhraseModel>()
            .fetch_all(database_connection)
            .await?;

        Ok(internal_phrases
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }

    /// All phrases containing `search_text` (case-insensitive), oldest first.
    pub async fn search_by_text(
        database_connection: &mut PgConnection,
        search_text: &str,
    ) -> QueryResult<Vec<PhraseModel>> {
        let internal_phrases = sqlx::query_as::<_, InternalPhraseModel>(
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase \
                WHERE strpos(lower(text), lower($1)) > 0 \
                ORDER BY create_date ASC, id ASC",
        )
        .bind(search_text)
        .fetch_all(database_connection)
        .await?;

        Ok(internal_phrases
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }

    /// All phrases carrying exactly `tag`, oldest first.
    pub async fn search_by_tag(
        database_connection: &mut PgConnection,
        tag: &str,
    ) -> QueryResult<Vec<PhraseModel>> {
        let internal_phrases = sqlx::query_as::<_, InternalPhraseModel>(
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase \
                WHERE $1 = ANY(tags) \
                ORDER BY create_date ASC, id ASC",
        )
        .bind(tag)
        .fetch_all(database_connection)
        .await?;

        Ok(internal_phrases
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }
}



#[cfg(test)]
mod test {
    use sqlx::Execute;

    use super::*;

    fn options(sort_order: PhraseSortOrder) -> PhraseListOptions {
        PhraseListOptions {
            page_index: 0,
            page_size: 10,
            sort_order,
            search_text: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn builds_unfiltered_list_query() {
        assert_eq!(
            build_phrase_list_query(options(PhraseSortOrder::Newest))
                .build()
                .sql(),
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase ORDER BY create_date DESC, id DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn builds_filtered_list_query() {
        let mut list_options = options(PhraseSortOrder::MostViewed);
        list_options.search_text = Some("talk".to_string());
        list_options.tags = vec!["love".to_string(), "testing".to_string()];

        assert_eq!(
            build_phrase_list_query(list_options).build().sql(),
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase \
                WHERE strpos(lower(text), lower($1)) > 0 AND tags && $2 \
                ORDER BY views DESC, id ASC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn builds_tag_only_list_query() {
        let mut list_options = options(PhraseSortOrder::AToZ);
        list_options.tags = vec!["love".to_string()];

        assert_eq!(
            build_phrase_list_query(list_options).build().sql(),
            "SELECT id, text, suggested_response, tags, views, create_date \
                FROM womanslation.phrase WHERE tags && $1 \
                ORDER BY text ASC, id ASC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn offset_is_page_index_times_page_size() {
        let mut list_options = options(PhraseSortOrder::Oldest);
        list_options.page_index = 3;
        list_options.page_size = 25;

        assert_eq!(list_options.offset(), 75);
    }
}
