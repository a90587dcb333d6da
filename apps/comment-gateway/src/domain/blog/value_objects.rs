use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

lazy_static! {
    // Numeric site id, or a host name with at least one dot.
    static ref SITE_ID_REGEX: regex::Regex =
        regex::Regex::new(r"^(\d+|[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+)$")
            .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct SiteId {
    #[validate(length(min = 1, max = 253), regex(path = *SITE_ID_REGEX))]
    pub value: String,
}

impl SiteId {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let site_id = Self {
            value: value.trim().to_ascii_lowercase(),
        };
        site_id.validate()?;
        Ok(site_id)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_numeric(&self) -> bool {
        self.value.bytes().all(|b| b.is_ascii_digit())
    }
}

impl TryFrom<String> for SiteId {
    type Error = validator::ValidationErrors;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SiteId> for String {
    fn from(site_id: SiteId) -> Self {
        site_id.value
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
