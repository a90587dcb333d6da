use super::value_objects::SiteId;
use serde::{Deserialize, Serialize};

/// The site every comment operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub site_id: SiteId,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl Blog {
    pub fn new(site_id: SiteId) -> Self {
        Self {
            site_id,
            name: None,
            url: None,
        }
    }

    /// Builds a blog from a raw site identifier such as `12345` or
    /// `example.wordpress.com`.
    pub fn from_site(site: &str) -> Result<Self, validator::ValidationErrors> {
        SiteId::new(site.to_string()).map(Self::new)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
