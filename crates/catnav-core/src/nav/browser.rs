//! Sequential driver tying a [`CatalogNavigator`] to a service and a host.
//!
//! [`CatalogBrowser`] awaits each request before accepting the next
//! action, which is what headless callers and tests want. Interactive
//! hosts that must stay responsive use [`crate::nav::fetch::spawn_fetch`]
//! and feed replies into the navigator themselves.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{CatalogItem, CatalogPath, CatalogService};
use crate::error::CoreResult;
use crate::event::{Command, Event};
use crate::nav::fetch;
use crate::nav::navigator::{ApplyOutcome, CatalogNavigator, Request, Step};
use crate::nav::view::CatalogView;

/// Receives selections that leave the navigator.
#[async_trait]
pub trait NavigatorHost: Send + Sync {
    /// Inserts an article into the host's scene.
    async fn insert_article(&self, item: &CatalogItem) -> CoreResult<()>;

    /// Inserts a container into the host's scene.
    async fn insert_container(&self, item: &CatalogItem) -> CoreResult<()>;

    /// Opens a document, e.g. a PDF data sheet.
    async fn open_url(&self, url: &str) -> CoreResult<()>;
}

pub struct CatalogBrowser<H> {
    navigator: CatalogNavigator,
    service: Arc<dyn CatalogService>,
    host: H,
}

impl<H: NavigatorHost> CatalogBrowser<H> {
    pub fn new(service: Arc<dyn CatalogService>, host: H) -> Self {
        Self {
            navigator: CatalogNavigator::new(),
            service,
            host,
        }
    }

    pub fn navigator(&self) -> &CatalogNavigator {
        &self.navigator
    }

    pub fn view(&self) -> &CatalogView {
        self.navigator.view()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub async fn enter(&mut self, root: Option<CatalogPath>) {
        self.dispatch(Command::Enter(root)).await;
    }

    pub async fn refresh(&mut self) {
        self.dispatch(Command::Refresh).await;
    }

    pub async fn search(&mut self, query: &str) {
        self.dispatch(Command::Search(query.to_owned())).await;
    }

    pub async fn select_index(&mut self, index: usize) {
        self.dispatch(Command::Select(index)).await;
    }

    pub async fn back(&mut self) {
        self.dispatch(Command::Back).await;
    }

    pub async fn select(&mut self, item: &CatalogItem) {
        let (navigator, step) = std::mem::take(&mut self.navigator).select(item);
        self.navigator = navigator;
        self.run(step).await;
    }

    /// Applies `command` and waits until the resulting view is rendered.
    pub async fn dispatch(&mut self, command: Command) {
        let (navigator, step) = std::mem::take(&mut self.navigator).handle_command(command);
        self.navigator = navigator;
        self.run(step).await;
    }

    async fn run(&mut self, step: Step) {
        match step {
            Step::Idle => {}
            Step::Fetch(request) => self.fetch(request).await,
            Step::Emit(event) => self.emit(event).await,
        }
    }

    async fn fetch(&mut self, mut request: Request) {
        loop {
            let reply = fetch::execute(self.service.as_ref(), request).await;
            let (navigator, outcome) = std::mem::take(&mut self.navigator).apply(reply);
            self.navigator = navigator;
            match outcome {
                ApplyOutcome::FollowUp(next) => request = next,
                ApplyOutcome::Rendered | ApplyOutcome::Stale | ApplyOutcome::Failed(_) => return,
            }
        }
    }

    async fn emit(&self, event: Event) {
        let result = match &event {
            Event::InsertArticle(item) => self.host.insert_article(item).await,
            Event::InsertContainer(item) => self.host.insert_container(item).await,
            Event::OpenUrl(url) => self.host.open_url(url).await,
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, ?event, "host rejected catalog selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogError, InMemoryCatalog, LookupOptions, ScoredItem, SearchParameters,
    };
    use crate::error::CoreError;
    use crate::nav::navigator::NavigationMode;
    use crate::nav::view::ViewStatus;
    use std::sync::Mutex;

    const SHOWROOM: &str = r#"{
        "catalogs": [
            { "id": "Chairs", "children": [
                { "type": "Folder", "name": "Lounge", "children": [
                    { "type": "Article", "name": "L1", "label": "Lounge classic", "article_number": "L1" }
                ] },
                { "type": "Folder", "name": "Office", "label": "Red office", "children": [
                    { "type": "Article", "name": "O1", "label": "Task chair", "article_number": "O1" }
                ] },
                { "type": "Article", "name": "C1", "label": "Red chair", "article_number": "C1" },
                { "type": "Container", "name": "K1", "label": "Red corner" },
                { "type": "Information", "name": "I1", "label": "Care guide",
                  "resources": [ { "kind": "Document", "value": "application/pdf;https://example.com/care.pdf" } ] }
            ] },
            { "id": "Tables", "children": [] }
        ]
    }"#;

    /// Wraps an [`InMemoryCatalog`] and records every call.
    struct RecordingCatalog {
        inner: InMemoryCatalog,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingCatalog {
        fn showroom() -> Arc<Self> {
            Arc::new(Self {
                inner: InMemoryCatalog::from_json(SHOWROOM).unwrap(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn count(&self, call: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
        }
    }

    #[async_trait]
    impl CatalogService for RecordingCatalog {
        async fn list_children(
            &self,
            path: &CatalogPath,
            options: &LookupOptions,
        ) -> Result<Vec<CatalogItem>, CatalogError> {
            self.calls.lock().unwrap().push("list_children");
            self.inner.list_children(path, options).await
        }

        async fn search(
            &self,
            params: &SearchParameters,
            options: &LookupOptions,
        ) -> Result<Vec<ScoredItem>, CatalogError> {
            self.calls.lock().unwrap().push("search");
            self.inner.search(params, options).await
        }

        async fn resolve_path(
            &self,
            catalog_id: &str,
            node_key: &str,
        ) -> Result<CatalogPath, CatalogError> {
            self.calls.lock().unwrap().push("resolve_path");
            self.inner.resolve_path(catalog_id, node_key).await
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        events: Mutex<Vec<String>>,
        reject: bool,
    }

    impl RecordingHost {
        fn record(&self, entry: String) -> CoreResult<()> {
            if self.reject {
                return Err(CoreError::ServiceUnavailable("host busy".to_string()));
            }
            self.events.lock().unwrap().push(entry);
            Ok(())
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NavigatorHost for RecordingHost {
        async fn insert_article(&self, item: &CatalogItem) -> CoreResult<()> {
            self.record(format!("article {}", item.name))
        }

        async fn insert_container(&self, item: &CatalogItem) -> CoreResult<()> {
            self.record(format!("container {}", item.name))
        }

        async fn open_url(&self, url: &str) -> CoreResult<()> {
            self.record(format!("open {url}"))
        }
    }

    fn browser(catalog: &Arc<RecordingCatalog>) -> CatalogBrowser<RecordingHost> {
        let service: Arc<dyn CatalogService> = catalog.clone();
        CatalogBrowser::new(service, RecordingHost::default())
    }

    fn names(view: &CatalogView) -> Vec<&str> {
        view.rows().iter().map(|i| i.name.as_str()).collect()
    }

    fn path(segments: &[&str]) -> CatalogPath {
        CatalogPath::from_segments(segments.iter().copied())
    }

    #[tokio::test]
    async fn browse_search_and_back() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(None).await;
        assert_eq!(names(browser.view()), vec!["Chairs", "Tables"]);
        assert!(!browser.view().show_back());
        assert!(!browser.view().show_search_bar());

        browser.select_index(0).await;
        assert_eq!(browser.navigator().path(), &path(&["Chairs"]));
        assert!(browser.view().show_back());
        assert!(browser.view().show_search_bar());
        assert_eq!(names(browser.view()), vec!["Lounge", "Office", "C1", "K1", "I1"]);

        browser.search("red").await;
        assert_eq!(
            browser.navigator().mode(),
            &NavigationMode::SearchResults {
                query: "red".to_string()
            }
        );
        // Prefix ties keep traversal order.
        assert_eq!(names(browser.view()), vec!["Office", "C1", "K1"]);

        browser.back().await;
        assert_eq!(browser.navigator().mode(), &NavigationMode::Browsing);
        assert_eq!(browser.navigator().path(), &path(&["Chairs"]));
        assert_eq!(names(browser.view()), vec!["Lounge", "Office", "C1", "K1", "I1"]);

        browser.back().await;
        assert!(browser.navigator().path().is_empty());
        assert!(!browser.view().show_back());
    }

    #[tokio::test]
    async fn folder_hit_resolves_absolute_path() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(Some(path(&["Chairs", "Lounge"]))).await;
        browser.search("office").await;
        assert_eq!(names(browser.view()), vec!["Office"]);

        browser.select_index(0).await;
        assert_eq!(catalog.count("resolve_path"), 1);
        assert_eq!(browser.navigator().path(), &path(&["Chairs", "Office"]));
        assert_eq!(browser.navigator().mode(), &NavigationMode::Browsing);
        assert_eq!(names(browser.view()), vec!["O1"]);
    }

    #[tokio::test]
    async fn browsing_folder_never_resolves() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(None).await;
        browser.select_index(0).await;
        browser.select_index(1).await;

        assert_eq!(browser.navigator().path(), &path(&["Chairs", "Office"]));
        assert_eq!(catalog.count("resolve_path"), 0);
        assert_eq!(catalog.count("list_children"), 3);
    }

    #[tokio::test]
    async fn blank_search_makes_no_call() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(Some(path(&["Chairs"]))).await;
        browser.search("   ").await;

        assert_eq!(catalog.count("search"), 0);
        assert_eq!(browser.navigator().mode(), &NavigationMode::Browsing);
        assert_eq!(browser.view().rows().len(), 5);
    }

    #[tokio::test]
    async fn leaf_selections_reach_host() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(Some(path(&["Chairs"]))).await;
        browser.select_index(2).await;
        browser.select_index(3).await;
        browser.select_index(4).await;

        assert_eq!(
            browser.host().events(),
            vec![
                "article C1".to_string(),
                "container K1".to_string(),
                "open https://example.com/care.pdf".to_string(),
            ]
        );
        assert_eq!(browser.navigator().path(), &path(&["Chairs"]));
        assert_eq!(catalog.count("list_children"), 1);
    }

    #[tokio::test]
    async fn host_failure_keeps_navigation_usable() {
        let catalog = RecordingCatalog::showroom();
        let service: Arc<dyn CatalogService> = catalog.clone();
        let host = RecordingHost {
            reject: true,
            ..RecordingHost::default()
        };
        let mut browser = CatalogBrowser::new(service, host);

        browser.enter(Some(path(&["Chairs"]))).await;
        browser.select_index(2).await;

        assert!(browser.host().events().is_empty());
        assert_eq!(browser.view().status(), &ViewStatus::Ready);
        assert_eq!(browser.view().rows().len(), 5);
    }

    #[tokio::test]
    async fn offline_service_shows_empty_view_then_recovers() {
        let catalog = RecordingCatalog::showroom();
        let mut browser = browser(&catalog);

        browser.enter(Some(path(&["Chairs"]))).await;
        catalog.inner.set_offline(true);
        browser.refresh().await;

        assert!(matches!(browser.view().status(), ViewStatus::Failed(_)));
        assert!(browser.view().rows().is_empty());
        assert!(browser.view().show_back());
        assert!(browser.view().show_search_bar());

        catalog.inner.set_offline(false);
        browser.refresh().await;
        assert_eq!(browser.view().status(), &ViewStatus::Ready);
        assert_eq!(browser.view().rows().len(), 5);
    }
}
