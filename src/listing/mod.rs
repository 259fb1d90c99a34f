pub mod detail;
pub mod filters;
pub mod form;
pub mod page;

pub use detail::{DetailController, DetailView, PropertyView};
pub use filters::FilterCriteria;
pub use form::FilterForm;
pub use page::{ListingController, ListingPage, ListingView, PageLink, Pagination};
