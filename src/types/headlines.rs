use serde::{Deserialize, Deserializer, Serialize};

fn deserialize_nullable_source<'de, D: Deserializer<'de>>(d: D) -> Result<Source, D::Error> {
    Option::<Source>::deserialize(d).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_source")]
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source.name.as_deref()
    }
}

/// Headlines payload as returned by the upstream provider, or synthesized
/// locally when the provider could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlinesRequest {
    /// `None` requests top headlines across all categories.
    pub topic: Option<String>,
}

impl HeadlinesRequest {
    pub fn top() -> Self {
        Self { topic: None }
    }

    pub fn category(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
        }
    }
}
