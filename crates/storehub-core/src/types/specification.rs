//! Composable, data-only query descriptors.
//!
//! A [`Specification`] never touches storage. Repositories translate it:
//! the Postgres backend renders a `WHERE`/`ORDER BY`/`LIMIT` clause, the
//! in-memory backend calls [`Specification::evaluate`].

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::entity::{Entity, SoftDelete};
use crate::types::filter::{FilterField, is_valid_field_name};
use crate::types::pagination::PageRequest;
use crate::types::sorting::SortField;

/// Filter, ordering, and paging for a query over entities of type `E`.
///
/// All filters are combined with `AND`. An empty specification selects
/// every record in storage order.
pub struct Specification<E> {
    filters: Vec<FilterField>,
    sort: Vec<SortField>,
    page: Option<PageRequest>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Specification<E> {
    /// A specification that selects everything.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Vec::new(),
            page: None,
            _entity: PhantomData,
        }
    }

    /// Add a filter condition.
    pub fn filter(mut self, filter: FilterField) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append an ordering key. Earlier keys take precedence.
    pub fn order_by(mut self, sort: SortField) -> Self {
        self.sort.push(sort);
        self
    }

    /// Restrict the result to one page.
    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Combine two specifications.
    ///
    /// Filters are conjoined and ordering keys appended. `other`'s page
    /// wins when both carry one.
    pub fn and(mut self, other: Specification<E>) -> Self {
        self.filters.extend(other.filters);
        self.sort.extend(other.sort);
        if other.page.is_some() {
            self.page = other.page;
        }
        self
    }

    /// Filter conditions.
    pub fn filters(&self) -> &[FilterField] {
        &self.filters
    }

    /// Ordering keys.
    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// Requested page, if any.
    pub fn page(&self) -> Option<PageRequest> {
        self.page
    }

    /// Reject field names that are not plain identifiers.
    pub fn validate(&self) -> AppResult<()> {
        let fields = self
            .filters
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.sort.iter().map(|s| s.field.as_str()));

        for field in fields {
            if !is_valid_field_name(field) {
                return Err(AppError::invalid_argument(format!(
                    "Invalid field name in {} query: '{field}'",
                    E::NAME
                )));
            }
        }
        Ok(())
    }

    /// Whether a record, serialized to JSON, satisfies every filter.
    pub fn matches(&self, record: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Apply this specification to an in-memory sequence of records.
    ///
    /// Input order is preserved among records that compare equal.
    pub fn evaluate<I>(&self, records: I) -> AppResult<Vec<E>>
    where
        I: IntoIterator<Item = E>,
    {
        self.validate()?;

        let mut selected = Vec::new();
        for record in records {
            let value = serde_json::to_value(&record)?;
            if self.matches(&value) {
                selected.push((value, record));
            }
        }

        if !self.sort.is_empty() {
            selected.sort_by(|(a, _), (b, _)| {
                self.sort
                    .iter()
                    .map(|key| key.compare(a, b))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let records = selected.into_iter().map(|(_, record)| record);
        Ok(match self.page {
            Some(page) => records
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect(),
            None => records.collect(),
        })
    }
}

impl<E: SoftDelete> Specification<E> {
    /// Select records whose deletion flag is unset.
    pub fn not_deleted() -> Self {
        Self::new().filter(FilterField::flag(E::DELETED_FIELD, false))
    }
}

impl<E: Entity> Default for Specification<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Specification<E> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: self.page,
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Specification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .finish()
    }
}

/// Serialized form, used when logging queries.
impl<E> Serialize for Specification<E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Specification", 3)?;
        state.serialize_field("filters", &self.filters)?;
        state.serialize_field("sort", &self.sort)?;
        state.serialize_field("page", &self.page)?;
        state.end()
    }
}
