use crate::models::Property;
use urlencoding::encode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub name: &'static str,
    pub url: String,
}

/// Outbound share targets for one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub property_url: String,
    pub title: String,
    pub text: String,
    pub links: Vec<ShareLink>,
}

impl ShareLinks {
    pub fn for_property(property: &Property, origin: &str) -> Self {
        let property_url = format!("{}{}", origin.trim_end_matches('/'), property.href());
        let title = format!("Check out this property: {}", property.title);
        let text = format!(
            "{} bed, {} bath property in {} for {}",
            property.bedrooms,
            property.bathrooms,
            property.location,
            property.formatted_price()
        );

        let links = vec![
            ShareLink {
                name: "Facebook",
                url: format!("https://www.facebook.com/sharer/sharer.php?u={}", encode(&property_url)),
            },
            ShareLink {
                name: "WhatsApp",
                url: format!(
                    "https://api.whatsapp.com/send?text={}",
                    encode(&format!("{} {}", title, property_url))
                ),
            },
            ShareLink {
                name: "Email",
                url: format!(
                    "mailto:?subject={}&body={}",
                    encode(&title),
                    encode(&format!("{}\n\n{}", text, property_url))
                ),
            },
        ];

        Self {
            property_url,
            title,
            text,
            links,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.name.eq_ignore_ascii_case(name))
            .map(|link| link.url.as_str())
    }
}
