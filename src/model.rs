use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format the listing API uses for `publishedAt`.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One job listing as returned by the API.
///
/// Every field the tool reads is optional upstream, so each is `Option`
/// with the default supplied by an accessor: empty string for text fields,
/// `false` for the remote flag, empty list for locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(rename = "allowRemote", default, skip_serializing_if = "Option::is_none")]
    pub allow_remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    /// Number or free-form string upstream; kept loose and rendered on
    /// demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wage: Option<Value>,
}

impl Job {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn wage(&self) -> String {
        match &self.wage {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn published_at(&self) -> &str {
        self.published_at.as_deref().unwrap_or("")
    }

    pub fn allow_remote(&self) -> bool {
        self.allow_remote.unwrap_or(false)
    }

    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("")
    }

    /// Location names in listing order. A location without a name still
    /// occupies a slot (as ""), so "has a physical location" stays a
    /// property of the list, not of the names.
    pub fn location_names(&self) -> Vec<&str> {
        self.locations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(Location::name)
            .collect()
    }

    /// Calendar date of publication; `None` when `publishedAt` is missing
    /// or does not match `PUBLISHED_AT_FORMAT`.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.as_deref()?;
        NaiveDateTime::parse_from_str(raw, PUBLISHED_AT_FORMAT)
            .ok()
            .map(|dt| dt.date())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Envelope for `/job/list.json` and `/job/search.json` responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub results: Vec<Job>,
}
