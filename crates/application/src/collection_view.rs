//! Generic list state shared by the ticket, asset and user views.
//!
//! A view owns a `Loading | Loaded` state, a lifetime token and the
//! presentation logic that picks between the empty, no-match and row
//! renderings. Fetch results land only while the view is alive and still
//! serving the scope they were started for.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use servicedesk_core::AppResult;
use servicedesk_domain::{SearchQuery, SelectOption, Searchable, filter_records};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::strings::ListStrings;

/// Observable list state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    /// The first fetch has not completed.
    Loading,
    /// The collection from the last applied fetch.
    Loaded(Vec<T>),
}

impl<T> ListState<T> {
    /// Returns the loaded records, if any fetch completed.
    #[must_use]
    pub fn records(&self) -> Option<&[T]> {
        match self {
            Self::Loading => None,
            Self::Loaded(records) => Some(records.as_slice()),
        }
    }
}

/// What happened to one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result replaced the collection.
    Applied,
    /// The view was torn down or reset before the result could land.
    Cancelled,
    /// The backend call failed.
    Failed(servicedesk_core::AppError),
}

/// Presentation of a list view for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListPresentation<T> {
    /// Loading indicator.
    Loading,
    /// The collection itself is empty.
    Empty,
    /// The collection has records but none match the query.
    NoMatches {
        /// Query echoed back so the user can edit it.
        query: String,
    },
    /// Matching records in collection order.
    Rows {
        /// Query echoed back.
        query: String,
        /// Matching records.
        rows: Vec<T>,
    },
}

impl<T> ListPresentation<T> {
    /// Converts every row, keeping the variant.
    pub fn map_rows<U>(self, convert: impl FnMut(T) -> U) -> ListPresentation<U> {
        match self {
            Self::Loading => ListPresentation::Loading,
            Self::Empty => ListPresentation::Empty,
            Self::NoMatches { query } => ListPresentation::NoMatches { query },
            Self::Rows { query, rows } => ListPresentation::Rows {
                query,
                rows: rows.into_iter().map(convert).collect(),
            },
        }
    }

    /// Returns the status line shown instead of, or above, the rows.
    #[must_use]
    pub fn message(&self, strings: &ListStrings) -> Option<&'static str> {
        match self {
            Self::Loading => Some(strings.loading),
            Self::Empty => Some(strings.empty),
            Self::NoMatches { .. } => Some(strings.no_matches),
            Self::Rows { .. } => None,
        }
    }

    /// Returns the rendered rows.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Rows { rows, .. } => rows.as_slice(),
            Self::Loading | Self::Empty | Self::NoMatches { .. } => &[],
        }
    }
}

/// A select control: current value plus its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    /// Currently selected option value.
    pub value: String,
    /// Options in display order.
    pub options: Vec<SelectOption>,
}

/// List state bound to a view lifetime.
///
/// Each scope (the span between two [`CollectionView::reset`] calls) owns a
/// child of the lifetime token, so a reset drops fetches started for the
/// previous principal.
pub struct CollectionView<T> {
    state: RwLock<Slot<T>>,
    lifetime: CancellationToken,
    scope: Mutex<CancellationToken>,
}

/// Records plus the query they were fetched for.
struct Slot<T> {
    list: ListState<T>,
    answers: SearchQuery,
}

impl<T> Slot<T> {
    fn loading() -> Self {
        Self {
            list: ListState::Loading,
            answers: SearchQuery::default(),
        }
    }
}

impl<T> CollectionView<T>
where
    T: Clone + Searchable + Send + Sync,
{
    /// Creates a view in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        let lifetime = CancellationToken::new();
        let scope = lifetime.child_token();
        Self {
            state: RwLock::new(Slot::loading()),
            lifetime,
            scope: Mutex::new(scope),
        }
    }

    /// Runs `fetch` for the whole collection and replaces the records with its result.
    ///
    /// A failed fetch on a view that never loaded settles on an empty
    /// collection. A failed re-fetch keeps the previous records.
    pub async fn load<F>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = AppResult<Vec<T>>>,
    {
        self.load_answering(&SearchQuery::default(), fetch).await
    }

    /// Like [`Self::load`] for a fetch already narrowed to `query` by the backend.
    pub async fn load_answering<F>(&self, query: &SearchQuery, fetch: F) -> LoadOutcome
    where
        F: Future<Output = AppResult<Vec<T>>>,
    {
        let scope = self.current_scope();
        let result = tokio::select! {
            () = scope.cancelled() => return LoadOutcome::Cancelled,
            result = fetch => result,
        };

        let mut slot = self.state.write().await;
        if scope.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        match result {
            Ok(records) => {
                slot.list = ListState::Loaded(records);
                slot.answers = query.clone();
                LoadOutcome::Applied
            }
            Err(error) => {
                if matches!(slot.list, ListState::Loading) {
                    slot.list = ListState::Loaded(Vec::new());
                    slot.answers = query.clone();
                }
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Returns the view to `Loading`, discarding the records and every fetch still in flight.
    pub async fn reset(&self) {
        let mut slot = self.state.write().await;
        if self.lifetime.is_cancelled() {
            return;
        }

        let stale = std::mem::replace(
            &mut *self.scope.lock().unwrap_or_else(PoisonError::into_inner),
            self.lifetime.child_token(),
        );
        stale.cancel();
        *slot = Slot::loading();
    }

    /// Ends the view lifetime. In-flight fetches are dropped and never land.
    pub fn teardown(&self) {
        self.lifetime.cancel();
    }

    /// Returns whether [`Self::teardown`] ran.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Returns a token cancelled when the view is torn down.
    #[must_use]
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> ListState<T> {
        self.state.read().await.list.clone()
    }

    /// Filters the collection by `query` and picks the rendering.
    pub async fn present(&self, query: &SearchQuery) -> ListPresentation<T> {
        let slot = self.state.read().await;
        let Some(records) = slot.list.records() else {
            return ListPresentation::Loading;
        };
        present_records(records, query)
    }

    /// Presents records the backend already narrowed to `query`.
    ///
    /// Records fetched for another query are filtered locally instead, so
    /// the rows never contradict the query shown with them.
    pub async fn present_unfiltered(&self, query: &SearchQuery) -> ListPresentation<T> {
        let slot = self.state.read().await;
        let Some(records) = slot.list.records() else {
            return ListPresentation::Loading;
        };

        if slot.answers.selects_same_as(query) {
            present_records(records, &SearchQuery::default()).with_query(query)
        } else {
            present_records(records, query)
        }
    }

    fn current_scope(&self) -> CancellationToken {
        self.scope
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Default for CollectionView<T>
where
    T: Clone + Searchable + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListPresentation<T> {
    fn with_query(self, query: &SearchQuery) -> Self {
        match self {
            Self::Rows { rows, .. } => Self::Rows {
                query: query.raw().to_owned(),
                rows,
            },
            Self::Empty if !query.is_blank() => Self::NoMatches {
                query: query.raw().to_owned(),
            },
            other => other,
        }
    }
}

fn present_records<T: Clone + Searchable>(
    records: &[T],
    query: &SearchQuery,
) -> ListPresentation<T> {
    if records.is_empty() {
        return ListPresentation::Empty;
    }

    let rows: Vec<T> = filter_records(records, query).into_iter().cloned().collect();
    if rows.is_empty() {
        return ListPresentation::NoMatches {
            query: query.raw().to_owned(),
        };
    }

    ListPresentation::Rows {
        query: query.raw().to_owned(),
        rows,
    }
}
