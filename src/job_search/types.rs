use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub const TITLE_PLACEHOLDER: &str = "Untitled role";
pub const COMPANY_PLACEHOLDER: &str = "Unknown company";
pub const LOCATION_PLACEHOLDER: &str = "Unknown location";
pub const SOURCE_PLACEHOLDER: &str = "Unknown source";
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Substitute `placeholder` for an absent value
pub fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

/// Text fields arrive loosely typed. Numbers and booleans keep their text;
/// anything else reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// Lists that are null or not arrays read as empty, and unusable items are dropped
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// One entry of `jobs_results` in a Google Jobs search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "company_name", default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    /// Board the listing was found through, e.g. "via LinkedIn"
    #[serde(rename = "via", default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
}

impl JobSummary {
    pub fn title_or_placeholder(&self) -> &str {
        or_placeholder(&self.title, TITLE_PLACEHOLDER)
    }

    pub fn company_or_placeholder(&self) -> &str {
        or_placeholder(&self.company, COMPANY_PLACEHOLDER)
    }

    pub fn location_or_placeholder(&self) -> &str {
        or_placeholder(&self.location, LOCATION_PLACEHOLDER)
    }

    pub fn source_or_placeholder(&self) -> &str {
        or_placeholder(&self.source, SOURCE_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOption {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

/// Google Jobs listing response, reduced to what gets rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub apply_options: Vec<ApplyOption>,
}

impl JobDetail {
    pub fn description_or_placeholder(&self) -> &str {
        or_placeholder(&self.description, DESCRIPTION_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub jobs: Vec<JobSummary>,
    /// Error text reported by the provider, if any. `jobs` is empty when set.
    pub error: Option<String>,
}

/// Remaining searches on the provider plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "remaining", rename_all = "snake_case")]
pub enum Quota {
    Remaining(i64),
    Unavailable,
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Remaining(left) => write!(f, "{}", left),
            Quota::Unavailable => write!(f, "N/A"),
        }
    }
}
