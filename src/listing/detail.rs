use crate::api::ListingsApi;
use crate::carousel::Gallery;
use crate::models::Property;
use crate::share::ShareLinks;
use tracing::info;

/// Everything the detail page shows for one listing
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyView {
    pub property: Property,
    pub gallery: Gallery,
    pub price: String,
    pub listed_on: String,
    pub share: ShareLinks,
}

impl PropertyView {
    pub fn new(property: Property, origin: &str) -> Self {
        Self {
            gallery: Gallery::new(property.display_images(), property.videos.clone()),
            price: property.formatted_price(),
            listed_on: property.listed_on(),
            share: ShareLinks::for_property(&property, origin),
            property,
        }
    }
}

/// Terminal state of the detail page
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Found(Box<PropertyView>),
    /// Maps to a 404 response
    NotFound,
}

impl DetailView {
    pub fn status_code(&self) -> u16 {
        match self {
            DetailView::Found(_) => 200,
            DetailView::NotFound => 404,
        }
    }
}

/// Fetches exactly one listing by identifier.
pub struct DetailController<'a> {
    api: &'a dyn ListingsApi,
    origin: String,
}

impl<'a> DetailController<'a> {
    /// `origin` is used to build absolute share links.
    pub fn new(api: &'a dyn ListingsApi, origin: impl Into<String>) -> Self {
        Self {
            api,
            origin: origin.into(),
        }
    }

    pub async fn load(&self, id: &str) -> DetailView {
        let id = id.trim();
        if id.is_empty() {
            return DetailView::NotFound;
        }
        match self.api.fetch_property(id).await {
            Some(property) => DetailView::Found(Box::new(PropertyView::new(property, &self.origin))),
            None => {
                info!("Property {} not found", id);
                DetailView::NotFound
            }
        }
    }
}
