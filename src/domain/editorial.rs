use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::body::Body;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Editorial {
    pub id: String,
    /// Set only for editorials authored in the new system; `None` routes to the legacy service.
    #[serde(default)]
    pub source_editorial_id: Option<String>,
    pub titles: Titles,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub standfirst: Option<Body>,
    pub publication_date: DateTime<Utc>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub indexable: bool,
    #[serde(default)]
    pub commentable: bool,
    #[serde(default)]
    pub is_brand: bool,
    #[serde(default)]
    pub is_amazon_onsite: bool,
    #[serde(rename = "type", default)]
    pub kind: EditorialKind,
    #[serde(default)]
    pub closing_mode_id: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub canonical_editorial_id: Option<String>,
    #[serde(default)]
    pub count_words: u32,
    pub section_id: String,
    /// Alias ids, in byline order.
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub multimedia: MultimediaRef,
    #[serde(default)]
    pub opening_multimedia_id: Option<String>,
    #[serde(default)]
    pub meta_image: Option<String>,
    #[serde(default)]
    pub recommended_editorials: Vec<String>,
}

impl Editorial {
    pub fn is_visible(&self) -> bool {
        self.visible && self.published && !self.deleted
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Titles {
    pub title: String,
    #[serde(default)]
    pub pre_title: String,
    #[serde(default)]
    pub url_title: String,
    #[serde(default)]
    pub mobile_title: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EditorialKind {
    #[default]
    News,
    Blog,
    Livesport,
    Live,
    Chronicle,
    Lovers,
    /// Any type outside the table above.
    #[serde(other)]
    Other,
}

impl EditorialKind {
    pub fn id(&self) -> &'static str {
        match self {
            Self::News => "1",
            Self::Blog => "3",
            Self::Livesport => "12",
            Self::Live => "13",
            Self::Chronicle => "14",
            Self::Lovers => "15",
            Self::Other => "unknown",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Blog => "blog",
            Self::Livesport => "livesport",
            Self::Live => "live",
            Self::Chronicle => "chronicle",
            Self::Lovers => "lovers",
            Self::Other => "unknown",
        }
    }

    /// Only blog signatures carry the journalist's twitter handle.
    pub fn wants_twitter(&self) -> bool {
        matches!(self, Self::Blog)
    }
}

/// The editorial's own (non-opening) multimedia reference.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MultimediaRef {
    #[default]
    None,
    Photo { id: String },
    #[serde(rename_all = "camelCase")]
    Video { id: String, photo_id: String },
    #[serde(rename_all = "camelCase")]
    Widget { id: String, photo_id: String },
}

impl MultimediaRef {
    /// Multimedia id whose photo represents this reference; videos and widgets use their poster.
    pub fn photo_id(&self) -> Option<&str> {
        let id = match self {
            Self::None => None,
            Self::Photo { id } => Some(id.as_str()),
            Self::Video { photo_id, .. } | Self::Widget { photo_id, .. } => Some(photo_id.as_str()),
        };
        id.filter(|id| !id.is_empty())
    }
}
