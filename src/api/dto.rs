use serde::{Deserialize, Serialize};

/// A list endpoint's body. The catalog endpoint pages its results in an
/// envelope while the admin endpoint returns a bare array, so both shapes
/// are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Envelope(Envelope<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Normalized list result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> ListResponse<T> {
    pub fn bare(items: Vec<T>) -> Self {
        ListResponse::Bare(items)
    }

    pub fn envelope(content: Vec<T>, total_pages: u32) -> Self {
        ListResponse::Envelope(Envelope {
            content,
            total_pages: Some(total_pages),
        })
    }

    /// A bare array is a single page; a missing or zero page count is 1.
    pub fn into_page(self) -> Page<T> {
        match self {
            ListResponse::Bare(items) => Page {
                items,
                total_pages: 1,
            },
            ListResponse::Envelope(envelope) => Page {
                items: envelope.content,
                total_pages: envelope.total_pages.unwrap_or(1).max(1),
            },
        }
    }
}
