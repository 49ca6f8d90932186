//! Catalog navigation state machine.
//!
//! [`CatalogNavigator`] owns the current [`CatalogPath`] and
//! [`NavigationMode`] and decides which service call each user action
//! needs. It never performs I/O itself: transitions return a [`Request`]
//! stamped with a generation [`Ticket`], the host runs it (see
//! [`crate::nav::fetch`]) and feeds the [`Reply`] back through
//! [`CatalogNavigator::apply`]. Replies whose ticket is no longer current
//! are dropped, so a slow response can never overwrite a newer view.

use crate::catalog::{
    CatalogError, CatalogItem, CatalogPath, ItemPayload, LookupOptions, ScoredItem,
    SearchParameters,
};
use crate::error::CoreError;
use crate::event::{Command, Event};
use crate::nav::view::CatalogView;

/// Whether the view shows a folder listing or search hits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationMode {
    #[default]
    Browsing,
    /// Showing hits for `query` inside the current catalog root.
    SearchResults { query: String },
}

impl NavigationMode {
    pub fn is_search(&self) -> bool {
        matches!(self, Self::SearchResults { .. })
    }
}

/// Generation stamp of a request. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A catalog service call the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListChildren {
        ticket: Ticket,
        path: CatalogPath,
        options: LookupOptions,
    },
    Search {
        ticket: Ticket,
        params: SearchParameters,
        options: LookupOptions,
    },
    ResolvePath {
        ticket: Ticket,
        catalog_id: String,
        node_key: String,
    },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::ListChildren { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::ResolvePath { ticket, .. } => *ticket,
        }
    }
}

/// Result of a service call, matching the [`Request`] variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Children(Result<Vec<CatalogItem>, CatalogError>),
    Hits(Result<Vec<ScoredItem>, CatalogError>),
    Path(Result<CatalogPath, CatalogError>),
}

/// A [`Response`] paired with the ticket of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub ticket: Ticket,
    pub response: Response,
}

/// What the host has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing; the action was ignored or had no effect.
    Idle,
    /// Run this request and pass the reply to [`CatalogNavigator::apply`].
    Fetch(Request),
    /// Hand this event to the host; navigation state is unchanged.
    Emit(Event),
}

/// How a reply was handled by [`CatalogNavigator::apply`].
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The view now shows the reply's items.
    Rendered,
    /// The reply belonged to an earlier request and was discarded.
    Stale,
    /// The service call failed; the view shows the empty safe state.
    Failed(CoreError),
    /// A folder path was resolved; run this listing next.
    FollowUp(Request),
}

/// Navigation state for one catalog panel.
///
/// Immutable: every transition consumes the navigator and returns a new
/// one together with the [`Step`] or [`Request`] the host must carry out.
#[derive(Debug, Clone, Default)]
pub struct CatalogNavigator {
    path: CatalogPath,
    mode: NavigationMode,
    generation: u64,
    awaiting: Option<Ticket>,
    view: CatalogView,
}

impl CatalogNavigator {
    /// Creates a navigator at the top level with nothing requested yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &CatalogPath {
        &self.path
    }

    pub fn mode(&self) -> &NavigationMode {
        &self.mode
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Ticket of the request whose reply is still expected, if any.
    pub fn pending(&self) -> Option<Ticket> {
        self.awaiting
    }

    fn show_back(&self) -> bool {
        self.mode.is_search() || !self.path.is_empty()
    }

    // Searching across every catalog root is not supported.
    fn show_search_bar(&self) -> bool {
        !self.path.is_empty()
    }

    /// Starts a new generation: older replies become stale and the view
    /// is cleared until the new reply arrives.
    fn begin(mut self) -> (Self, Ticket) {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.awaiting = Some(ticket);
        self.view = CatalogView::loading(self.show_back(), self.show_search_bar());
        (self, ticket)
    }

    /// Starts browsing at `root` (the top level when `None`).
    pub fn enter(mut self, root: Option<CatalogPath>) -> (Self, Request) {
        self.path = root.unwrap_or_default();
        self.mode = NavigationMode::Browsing;
        self.refresh()
    }

    /// Re-issues the request for the current path or search.
    pub fn refresh(self) -> (Self, Request) {
        let (nav, ticket) = self.begin();
        let options = LookupOptions::navigable();
        let request = match (&nav.mode, nav.path.root()) {
            (NavigationMode::SearchResults { query }, Some(root)) => Request::Search {
                ticket,
                params: SearchParameters::scoped(root, query),
                options,
            },
            _ => Request::ListChildren {
                ticket,
                path: nav.path.clone(),
                options,
            },
        };
        tracing::debug!(
            generation = ticket.generation(),
            path = %nav.path,
            search = nav.mode.is_search(),
            "catalog refresh"
        );
        (nav, request)
    }

    /// Searches the current catalog root for `query`.
    ///
    /// Ignored (no state change, no request) outside a catalog or when
    /// the query is blank.
    pub fn search(mut self, query: &str) -> (Self, Option<Request>) {
        if self.path.is_empty() {
            tracing::debug!("search ignored: no catalog entered");
            return (self, None);
        }
        if query.trim().is_empty() {
            tracing::debug!(reason = %CoreError::EmptyQuery, "search ignored");
            return (self, None);
        }
        self.mode = NavigationMode::SearchResults {
            query: query.to_owned(),
        };
        let (nav, request) = self.refresh();
        (nav, Some(request))
    }

    /// Activates `item`.
    ///
    /// Articles and containers are handed to the host, information items
    /// open their PDF resource, folders navigate: relative descent while
    /// browsing, absolute path resolution when picked from search hits.
    pub fn select(self, item: &CatalogItem) -> (Self, Step) {
        match &item.payload {
            ItemPayload::Article { .. } => (self, Step::Emit(Event::InsertArticle(item.clone()))),
            ItemPayload::Container => (self, Step::Emit(Event::InsertContainer(item.clone()))),
            ItemPayload::Information { .. } => {
                let step = item
                    .pdf_url()
                    .map_or(Step::Idle, |url| Step::Emit(Event::OpenUrl(url.to_owned())));
                (self, step)
            }
            ItemPayload::Folder if self.mode.is_search() => {
                let (nav, ticket) = self.begin();
                tracing::debug!(
                    generation = ticket.generation(),
                    catalog = %item.catalog_id,
                    node = %item.node_key,
                    "resolving folder from search"
                );
                let request = Request::ResolvePath {
                    ticket,
                    catalog_id: item.catalog_id.clone(),
                    node_key: item.node_key.clone(),
                };
                (nav, Step::Fetch(request))
            }
            ItemPayload::Folder => {
                let path = self.path.with_segment(item.name.as_str());
                let (nav, request) = Self { path, ..self }.refresh();
                (nav, Step::Fetch(request))
            }
        }
    }

    /// Activates the row at `index` of the current view. Out of range is a no-op.
    pub fn select_index(self, index: usize) -> (Self, Step) {
        match self.view.row(index).cloned() {
            Some(item) => self.select(&item),
            None => (self, Step::Idle),
        }
    }

    /// Leaves search results (keeping the path), or goes up one folder.
    ///
    /// Going back at the top level leaves the path empty and just refreshes.
    pub fn back(mut self) -> (Self, Request) {
        if self.mode.is_search() {
            self.mode = NavigationMode::Browsing;
        } else {
            self.path = self.path.parent();
        }
        self.refresh()
    }

    /// Dispatches a UI [`Command`].
    pub fn handle_command(self, command: Command) -> (Self, Step) {
        match command {
            Command::Enter(root) => {
                let (nav, request) = self.enter(root);
                (nav, Step::Fetch(request))
            }
            Command::Refresh => {
                let (nav, request) = self.refresh();
                (nav, Step::Fetch(request))
            }
            Command::Search(query) => {
                let (nav, request) = self.search(&query);
                (nav, request.map_or(Step::Idle, Step::Fetch))
            }
            Command::Select(index) => self.select_index(index),
            Command::Back => {
                let (nav, request) = self.back();
                (nav, Step::Fetch(request))
            }
        }
    }

    /// Applies a service reply.
    ///
    /// Only the reply to the latest request is used; anything else is
    /// [`ApplyOutcome::Stale`]. A failed call leaves the view empty with
    /// its controls intact so the panel stays operable.
    pub fn apply(mut self, reply: Reply) -> (Self, ApplyOutcome) {
        if self.awaiting != Some(reply.ticket) {
            tracing::debug!(
                generation = reply.ticket.generation(),
                current = self.generation,
                "discarding stale catalog reply"
            );
            return (self, ApplyOutcome::Stale);
        }
        self.awaiting = None;

        let failure = match reply.response {
            Response::Children(Ok(items)) => {
                self.view = self.view.with_rows(items);
                return (self, ApplyOutcome::Rendered);
            }
            Response::Hits(Ok(hits)) => {
                let rows = hits.into_iter().map(|hit| hit.item).collect();
                self.view = self.view.with_rows(rows);
                return (self, ApplyOutcome::Rendered);
            }
            Response::Path(Ok(path)) => {
                self.path = path;
                self.mode = NavigationMode::Browsing;
                let (nav, request) = self.refresh();
                return (nav, ApplyOutcome::FollowUp(request));
            }
            Response::Children(Err(e)) | Response::Hits(Err(e)) => {
                CoreError::ServiceUnavailable(e.to_string())
            }
            Response::Path(Err(e)) => CoreError::ResolveFailure(e.to_string()),
        };

        tracing::warn!(error = %failure, path = %self.path, "catalog request failed");
        self.view = self.view.with_failure(failure.to_string());
        (self, ApplyOutcome::Failed(failure))
    }
}
