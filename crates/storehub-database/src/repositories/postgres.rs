//! Generic PostgreSQL repository.
//!
//! One [`PgRepository`] serves every entity; the table layout comes from
//! the entity's [`PgEntity`] impl and queries are assembled with
//! `sqlx::QueryBuilder`, so every value travels as a bind parameter.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{Encode, FromRow, PgPool, Postgres, QueryBuilder, Type};
use tracing::debug;

use storehub_core::cancel::{CancellationToken, cancellable};
use storehub_core::error::{AppError, ErrorKind};
use storehub_core::result::AppResult;
use storehub_core::traits::{Entity, EntityKey, Repository};
use storehub_core::types::filter::{FilterField, FilterOp, FilterValue};
use storehub_core::types::sorting::SortField;
use storehub_core::types::specification::Specification;

/// Table mapping for an entity stored in PostgreSQL.
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Table name.
    const TABLE: &'static str;

    /// Every column except `id`, in the order [`push_values`] binds them.
    ///
    /// [`push_values`]: PgEntity::push_values
    const COLUMNS: &'static [&'static str];

    /// Bind one value per entry of [`COLUMNS`](PgEntity::COLUMNS).
    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// Repository over the table of `E`.
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PgRepository<E> {
    /// Create a new repository on the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E> Repository<E> for PgRepository<E>
where
    E: PgEntity,
    E::Key: for<'q> Encode<'q, Postgres> + Type<Postgres>,
{
    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<E>> {
        self.list_matching(&Specification::new(), cancel).await
    }

    async fn list_matching(
        &self,
        spec: &Specification<E>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<E>> {
        let mut query = select_query(spec)?;
        debug!(entity = E::NAME, sql = query.sql(), "Listing records");

        cancellable(cancel, async {
            query
                .build_query_as::<E>()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error::<E>("list", e))
        })
        .await
    }

    async fn get_by_id(&self, id: &E::Key, cancel: &CancellationToken) -> AppResult<Option<E>> {
        let sql = format!("{} WHERE id = $1", Self::select_sql());

        cancellable(cancel, async {
            sqlx::query_as::<_, E>(&sql)
                .bind(*id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_error::<E>("find", e))
        })
        .await
    }

    async fn add(&self, entity: &mut E, cancel: &CancellationToken) -> AppResult<()> {
        if entity.id().is_unset() {
            entity.set_id(E::Key::generate());
        }

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} (id, {}) VALUES (",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        {
            let mut values = query.separated(", ");
            values.push_bind(entity.id());
            entity.push_values(&mut values);
            values.push_unseparated(")");
        }

        cancellable(cancel, async {
            query
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error::<E>("create", e))
        })
        .await?;
        Ok(())
    }

    async fn update(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "UPDATE {} SET ({}) = ROW(",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        {
            let mut values = query.separated(", ");
            entity.push_values(&mut values);
        }
        query.push(") WHERE id = ").push_bind(entity.id());

        let result = cancellable(cancel, async {
            query
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error::<E>("update", e))
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} with ID: {} not found",
                E::NAME,
                entity.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);

        let result = cancellable(cancel, async {
            sqlx::query(&sql)
                .bind(entity.id())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error::<E>("delete", e))
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} with ID: {} not found",
                E::NAME,
                entity.id()
            )));
        }
        Ok(())
    }
}

/// Render `spec` as a `SELECT` over the table of `E`.
pub(crate) fn select_query<E: PgEntity>(
    spec: &Specification<E>,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    spec.validate()?;

    let mut query = QueryBuilder::new(PgRepository::<E>::select_sql());

    for (index, filter) in spec.filters().iter().enumerate() {
        query.push(if index == 0 { " WHERE " } else { " AND " });
        push_filter(&mut query, filter);
    }

    for (index, sort) in spec.sort().iter().enumerate() {
        query.push(if index == 0 { " ORDER BY " } else { ", " });
        push_sort(&mut query, sort);
    }

    if let Some(page) = spec.page() {
        query
            .push(" LIMIT ")
            .push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    }

    Ok(query)
}

fn push_filter(query: &mut QueryBuilder<'static, Postgres>, filter: &FilterField) {
    query.push(&filter.field);

    match (filter.op, &filter.value) {
        (FilterOp::IsNull | FilterOp::IsNotNull, _) => {
            query.push(" ").push(filter.op.as_sql());
        }
        (FilterOp::In, FilterValue::StringList(items)) => {
            query.push("::text = ANY(").push_bind(items.clone()).push(")");
        }
        (op, value) => {
            // Text comparisons go through a cast so UUID columns can be
            // matched against their string form.
            if matches!(value, FilterValue::String(_)) {
                query.push("::text");
            }
            let sql_op = if op == FilterOp::In { "=" } else { op.as_sql() };
            query.push(" ").push(sql_op).push(" ");
            push_value(query, value);
        }
    }
}

fn push_value(query: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::String(v) => query.push_bind(v.clone()),
        FilterValue::Integer(v) => query.push_bind(*v),
        FilterValue::Float(v) => query.push_bind(*v),
        FilterValue::Boolean(v) => query.push_bind(*v),
        FilterValue::StringList(v) => query.push_bind(v.clone()),
        FilterValue::Null => query.push("NULL"),
    };
}

fn push_sort(query: &mut QueryBuilder<'static, Postgres>, sort: &SortField) {
    query
        .push(&sort.field)
        .push(" ")
        .push(sort.direction.as_sql());
}

/// Map a driver error, turning constraint violations into client errors.
fn map_sqlx_error<E: Entity>(action: &str, err: sqlx::Error) -> AppError {
    let state = match &err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    };
    if let Some(mapped) = state.as_deref().and_then(constraint_error::<E>) {
        return mapped;
    }
    AppError::with_source(
        ErrorKind::Persistence,
        format!("Failed to {action} {}", E::NAME),
        err,
    )
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn constraint_error<E: Entity>(sql_state: &str) -> Option<AppError> {
    match sql_state {
        UNIQUE_VIOLATION => Some(AppError::conflict(format!(
            "{} with the same ID already exists",
            E::NAME
        ))),
        FOREIGN_KEY_VIOLATION => Some(AppError::invalid_argument(format!(
            "{} references a record that does not exist",
            E::NAME
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storehub_core::types::pagination::PageRequest;
    use storehub_entity::{InstagramPost, Product};

    #[test]
    fn test_plain_select() {
        let query = select_query(&Specification::<InstagramPost>::new()).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, title, description, likes FROM instagram_posts"
        );
    }

    #[test]
    fn test_not_deleted_renders_bound_flag() {
        let query = select_query(&Specification::<Product>::not_deleted()).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT id, name, description, cost, category_id, is_deleted FROM products \
             WHERE is_deleted = $1"
        );
    }

    #[test]
    fn test_combined_clauses() {
        let spec = Specification::<Product>::not_deleted()
            .filter(FilterField::ilike("name", "%tea%"))
            .filter(FilterField::new("category_id", FilterOp::IsNull, FilterValue::Null))
            .order_by(SortField::desc("cost"))
            .order_by(SortField::asc("name"))
            .paginate(PageRequest::new(2, 10));

        let query = select_query(&spec).unwrap();
        assert!(query.sql().ends_with(
            "WHERE is_deleted = $1 AND name::text ILIKE $2 AND category_id IS NULL \
             ORDER BY cost DESC, name ASC LIMIT $3 OFFSET $4"
        ));
    }

    #[test]
    fn test_in_list_uses_any() {
        let spec = Specification::<InstagramPost>::new().filter(FilterField::new(
            "title",
            FilterOp::In,
            FilterValue::StringList(vec!["a".into(), "b".into()]),
        ));
        let query = select_query(&spec).unwrap();
        assert!(query.sql().ends_with("WHERE title::text = ANY($1)"));
    }

    #[test]
    fn test_rejects_unsafe_field_names() {
        let spec = Specification::<Product>::new().filter(FilterField::eq("id; DROP TABLE x", "1"));
        let err = select_query(&spec).err().unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_huge_page_renders_without_overflow() {
        let spec = Specification::<InstagramPost>::new().paginate(PageRequest::new(u64::MAX, 50));
        let query = select_query(&spec).unwrap();
        assert!(query.sql().ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_constraint_violations_are_client_errors() {
        let duplicate = constraint_error::<Product>(UNIQUE_VIOLATION).unwrap();
        assert_eq!(duplicate.kind, ErrorKind::Conflict);

        let dangling = constraint_error::<Product>(FOREIGN_KEY_VIOLATION).unwrap();
        assert_eq!(dangling.kind, ErrorKind::InvalidArgument);
        assert!(dangling.message.starts_with("Product"));

        assert!(constraint_error::<Product>("42P01").is_none());
    }

    #[test]
    fn test_driver_errors_without_state_are_persistence() {
        let err = map_sqlx_error::<Product>("list", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert_eq!(err.message, "Failed to list Product");
    }
}
