//! View state of the paginated users table.
//!
//! Every method is synchronous; operations that need fresh data return a
//! [`PendingLoad`] the caller executes and later feeds back through
//! [`UserListState::apply`].

use crate::client::error::ClientError;
use crate::domain::types::SearchField;
use crate::domain::user::User;
use crate::dto::users::{PaginatedUsersResponse, UsersPageQuery};
use crate::pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE, MAX_ITEMS_PER_PAGE, MAX_SHOWN_PAGES, page_window,
};

/// Page sizes offered by the limit selector.
pub const LIMIT_OPTIONS: [u32; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Identifies a list request; only the most recent one may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// A list request that the caller should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub ticket: LoadTicket,
    pub query: UsersPageQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserListState {
    pub users: Vec<User>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_records: u64,
    /// Search input as typed; may be ahead of the last committed search.
    pub search_term: String,
    pub filter_by: SearchField,
    pub status: LoadStatus,
    pub last_error: Option<String>,
    /// Term requests are filtered by; only a debounced commit updates it.
    committed_term: String,
    latest_ticket: u64,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl UserListState {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            users: Vec::new(),
            page: DEFAULT_PAGE,
            limit: limit.clamp(1, MAX_ITEMS_PER_PAGE),
            total_pages: 0,
            total_records: 0,
            search_term: String::new(),
            filter_by: SearchField::default(),
            status: LoadStatus::Idle,
            last_error: None,
            committed_term: String::new(),
            latest_ticket: 0,
        }
    }

    /// Issues a new ticket for the current parameters and enters `Loading`.
    pub fn begin_load(&mut self) -> PendingLoad {
        self.latest_ticket += 1;
        self.status = LoadStatus::Loading;

        let term = self.committed_term.trim();
        let (q, filter) = if term.is_empty() {
            (None, None)
        } else {
            (
                Some(term.to_string()),
                Some(self.filter_by.as_str().to_string()),
            )
        };

        PendingLoad {
            ticket: LoadTicket(self.latest_ticket),
            query: UsersPageQuery {
                page: Some(self.page),
                limit: Some(self.limit),
                q,
                filter,
            },
        }
    }

    /// Applies the outcome of a request. Returns `false` and leaves the state
    /// untouched when `ticket` has been superseded.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<PaginatedUsersResponse, ClientError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            log::debug!("Discarding stale users response {ticket:?}");
            return false;
        }

        match result {
            Ok(response) => {
                self.users = response.users;
                self.total_pages = response.total_pages;
                self.total_records = response.total_records;
                self.status = LoadStatus::Loaded;
                self.last_error = None;
            }
            Err(err) => {
                log::error!("Failed to load users: {err}");
                self.status = LoadStatus::Error;
                self.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// Re-requests the current page with unchanged parameters.
    pub fn refresh(&mut self) -> PendingLoad {
        self.begin_load()
    }

    /// Moves to `page`; out-of-range pages are ignored.
    pub fn change_page(&mut self, page: u32) -> Option<PendingLoad> {
        if page < 1 || (self.total_pages > 0 && u64::from(page) > self.total_pages) {
            return None;
        }
        self.page = page;
        Some(self.begin_load())
    }

    pub fn next_page(&mut self) -> Option<PendingLoad> {
        if u64::from(self.page) >= self.total_pages {
            return None;
        }
        self.change_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<PendingLoad> {
        if self.page <= 1 {
            return None;
        }
        self.change_page(self.page - 1)
    }

    /// Changes the page size and returns to the first page. Only sizes from
    /// [`LIMIT_OPTIONS`] are accepted.
    pub fn set_limit(&mut self, limit: u32) -> Option<PendingLoad> {
        if !LIMIT_OPTIONS.contains(&limit) {
            return None;
        }
        self.limit = limit;
        self.page = DEFAULT_PAGE;
        Some(self.begin_load())
    }

    pub fn set_filter(&mut self, field: SearchField) -> PendingLoad {
        self.filter_by = field;
        self.page = DEFAULT_PAGE;
        self.begin_load()
    }

    /// Records typed input without loading; see [`Self::commit_search`].
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Runs the search for `term` from the first page.
    pub fn commit_search(&mut self, term: impl Into<String>) -> PendingLoad {
        let term = term.into();
        self.search_term.clone_from(&term);
        self.committed_term = term;
        self.page = DEFAULT_PAGE;
        self.begin_load()
    }

    pub fn clear_search(&mut self) -> PendingLoad {
        self.search_term.clear();
        self.committed_term.clear();
        self.filter_by = SearchField::default();
        self.page = DEFAULT_PAGE;
        self.begin_load()
    }

    /// Page numbers to render as controls around the current page.
    pub fn page_list(&self) -> Vec<u64> {
        page_window(self.total_pages, u64::from(self.page), MAX_SHOWN_PAGES)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
