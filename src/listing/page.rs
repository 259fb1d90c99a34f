use crate::api::types::PropertyPage;
use crate::api::ListingsApi;
use crate::listing::filters::FilterCriteria;
use crate::models::Property;
use tracing::{info, warn};

/// Listings shown in the home page carousel
pub const FEATURED_COUNT: usize = 6;

/// One numbered pagination button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Pagination controls for a loaded listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub links: Vec<PageLink>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl Pagination {
    /// Links `1..=total_pages`, each keeping every active filter of `criteria`.
    pub fn build(criteria: &FilterCriteria, total_pages: u32, current_page: u32) -> Self {
        let total_pages = total_pages.max(1);
        let links = (1..=total_pages)
            .map(|number| PageLink {
                number,
                href: criteria.page_href(number),
                current: number == current_page,
            })
            .collect();
        let previous = (current_page > 1).then(|| criteria.page_href(current_page - 1));
        let next = (current_page < total_pages).then(|| criteria.page_href(current_page + 1));
        Self { links, previous, next }
    }

    /// Controls are only rendered when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.links.len() > 1
    }
}

/// A successfully loaded, non-empty page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub properties: Vec<Property>,
    pub count: u32,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub pagination: Pagination,
}

impl ListingPage {
    pub fn summary(&self) -> String {
        format!("Showing {} of {} properties", self.properties.len(), self.total)
    }
}

/// Terminal result of one render pass of the listing page
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Loaded(ListingPage),
    /// The service answered but nothing matched
    NoResults,
    /// The service could not be reached or answered with garbage
    Unavailable,
}

impl ListingView {
    /// Manual remedy offered by the empty and error states: label and link
    pub fn remedy(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ListingView::Loaded(_) => None,
            ListingView::NoResults => Some(("Clear All Filters", "/properties")),
            ListingView::Unavailable => Some(("Refresh Page", "/properties")),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ListingView::Loaded(_) => "Explore Our Properties",
            ListingView::NoResults => "No Properties Found",
            ListingView::Unavailable => "Something went wrong",
        }
    }
}

/// Loads exactly one page of listings per call, with no retry.
pub struct ListingController<'a> {
    api: &'a dyn ListingsApi,
}

impl<'a> ListingController<'a> {
    pub fn new(api: &'a dyn ListingsApi) -> Self {
        Self { api }
    }

    /// Load the page described by a raw query string.
    pub async fn load_query(&self, query: &str) -> ListingView {
        self.load(&FilterCriteria::parse(query)).await
    }

    pub async fn load(&self, criteria: &FilterCriteria) -> ListingView {
        let criteria = criteria.normalize();
        info!("Loading properties: {}", criteria.href());

        match self.api.fetch_properties(&criteria).await {
            None => {
                warn!("Listing page unavailable for {}", criteria.href());
                ListingView::Unavailable
            }
            Some(page) if page.properties.is_empty() => ListingView::NoResults,
            Some(page) => ListingView::Loaded(Self::assemble(&criteria, page)),
        }
    }

    /// Home page picks: the head of the unfiltered first page, or nothing.
    pub async fn featured(&self) -> Vec<Property> {
        match self.api.fetch_properties(&FilterCriteria::default()).await {
            Some(page) => page.properties.into_iter().take(FEATURED_COUNT).collect(),
            None => Vec::new(),
        }
    }

    fn assemble(criteria: &FilterCriteria, page: PropertyPage) -> ListingPage {
        let total_pages = page.total_pages.max(1);
        let current_page = match page.current_page {
            0 => criteria.page,
            n => n,
        };
        let count = match page.count {
            0 => page.properties.len() as u32,
            n => n,
        };
        ListingPage {
            pagination: Pagination::build(criteria, total_pages, current_page),
            count,
            total: page.total,
            total_pages,
            current_page,
            properties: page.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Ack, ContactRequest};
    use crate::test_utils::sample_property;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and replays a canned page
    struct FakeListings {
        page: Option<PropertyPage>,
        requests: Mutex<Vec<FilterCriteria>>,
    }

    impl FakeListings {
        fn new(page: Option<PropertyPage>) -> Self {
            Self {
                page,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ListingsApi for FakeListings {
        async fn fetch_properties(&self, criteria: &FilterCriteria) -> Option<PropertyPage> {
            self.requests.lock().unwrap().push(criteria.clone());
            self.page.clone()
        }

        async fn fetch_property(&self, _id: &str) -> Option<Property> {
            None
        }

        async fn submit_contact(&self, _request: &ContactRequest) -> Option<Ack> {
            None
        }
    }

    fn page_of(n: usize, total_pages: u32, current_page: u32) -> PropertyPage {
        PropertyPage {
            properties: (0..n).map(|i| sample_property(&format!("p{}", i))).collect(),
            count: n as u32,
            total: 41,
            total_pages,
            current_page,
        }
    }

    #[tokio::test]
    async fn builds_one_link_per_page_and_marks_current() {
        let api = FakeListings::new(Some(page_of(9, 5, 3)));
        let view = ListingController::new(&api)
            .load_query("category=Apartment&minPrice=100000&page=3")
            .await;

        let ListingView::Loaded(page) = view else {
            panic!("expected a loaded page");
        };
        let links = &page.pagination.links;
        assert_eq!(links.len(), 5);
        assert_eq!(links.iter().filter(|l| l.current).count(), 1);
        assert!(links[2].current);
        for link in links {
            assert!(link.href.contains("category=Apartment"));
            assert!(link.href.contains("minPrice=100000"));
            assert!(link.href.contains(&format!("page={}", link.number)));
        }
        assert_eq!(page.pagination.previous.as_deref(), Some("/properties?page=2&category=Apartment&minPrice=100000"));
        assert!(page.pagination.next.is_some());
        assert!(page.pagination.is_visible());
        assert_eq!(page.summary(), "Showing 9 of 41 properties");
    }

    #[tokio::test]
    async fn failure_renders_unavailable_without_retrying() {
        let api = FakeListings::new(None);
        let view = ListingController::new(&api).load(&FilterCriteria::default()).await;
        assert_eq!(view, ListingView::Unavailable);
        assert_eq!(view.remedy(), Some(("Refresh Page", "/properties")));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn empty_page_is_no_results() {
        let api = FakeListings::new(Some(page_of(0, 0, 0)));
        let view = ListingController::new(&api).load_query("location=Downtown").await;
        assert_eq!(view, ListingView::NoResults);
        assert_eq!(view.title(), "No Properties Found");
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn featured_takes_the_first_six() {
        let api = FakeListings::new(Some(page_of(9, 2, 1)));
        let featured = ListingController::new(&api).featured().await;
        assert_eq!(featured.len(), FEATURED_COUNT);
        assert_eq!(featured[0].id, "p0");

        let offline = FakeListings::new(None);
        assert!(ListingController::new(&offline).featured().await.is_empty());
    }

    #[tokio::test]
    async fn requests_carry_the_parsed_criteria() {
        let api = FakeListings::new(Some(page_of(1, 1, 0)));
        let view = ListingController::new(&api).load_query("bedrooms=2&page=0").await;

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].bedrooms, Some(2));
        assert_eq!(requests[0].page, 1);

        let ListingView::Loaded(page) = view else {
            panic!("expected a loaded page");
        };
        assert_eq!(page.current_page, 1);
        assert!(!page.pagination.is_visible());
        assert_eq!(page.pagination.previous, None);
        assert_eq!(page.pagination.next, None);
    }

    #[tokio::test]
    async fn missing_current_page_falls_back_to_the_requested_one() {
        let api = FakeListings::new(Some(page_of(2, 5, 0)));
        let view = ListingController::new(&api).load_query("page=3").await;

        let ListingView::Loaded(page) = view else {
            panic!("expected a loaded page");
        };
        assert_eq!(page.current_page, 3);
        let current: Vec<u32> = page
            .pagination
            .links
            .iter()
            .filter(|l| l.current)
            .map(|l| l.number)
            .collect();
        assert_eq!(current, vec![3]);
        assert_eq!(page.pagination.previous.as_deref(), Some("/properties?page=2"));
    }
}
