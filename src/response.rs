//! Serializable shapes of the assembled editorial document.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::domain::BodyElementKind;

/// Insertion-ordered string-keyed map; serializes as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<&V> {
        self.0.first().map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for BodyElementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Breakpoint label -> image URL.
pub type Shots = OrderedMap<String>;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub journalist_id: String,
    pub alias_id: String,
    pub name: String,
    pub private: bool,
    pub url: String,
    pub photo: String,
    pub departments: Vec<DepartmentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
}

/// Teaser of a referenced editorial (inserted news or recommended editorial).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorialCard {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub editorial_id: String,
    pub title: String,
    pub signatures: Vec<Signature>,
    /// Canonical URL of the referenced editorial.
    pub editorial: String,
    pub shots: Shots,
    pub photo: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BodyFragment {
    #[serde(rename = "type")]
    pub kind: BodyElementKind,
    #[serde(flatten)]
    pub payload: BodyPayload,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum BodyPayload {
    ContentWithLinks(ContentWithLinksPayload),
    Content(ContentPayload),
    Link(LinkPayload),
    List(ListPayload),
    Picture(PicturePayload),
    Video(VideoPayload),
    ExplanatorySummary(ExplanatorySummaryPayload),
    InsertedNews(EditorialCard),
    MembershipCard(MembershipCardPayload),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentPayload {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentWithLinksPayload {
    pub content: String,
    /// Position in the text -> link; `null` when the text carries no links.
    pub links: Option<OrderedMap<InlineLink>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineLink {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
    pub url: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkPayload {
    pub content: String,
    pub url: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListPayload {
    pub items: Vec<ListItemPayload>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListItemPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
    pub links: Option<OrderedMap<InlineLink>>,
}

/// Picture data; every field is omitted when the photo could not be resolved.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PicturePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots: Option<Shots>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoPayload {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub caption: String,
    pub video: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExplanatorySummaryPayload {
    pub title: String,
    pub items: Vec<BodyFragment>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCardPayload {
    pub title: String,
    pub buttons: Vec<MembershipButtonPayload>,
    pub title_banner: String,
    pub class_banner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Box<BodyFragment>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipButtonPayload {
    pub url: String,
    pub url_membership: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BodyResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub elements: Vec<BodyFragment>,
}

/// Opening or inline multimedia of an editorial.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum MediaFragment {
    #[serde(rename = "photo")]
    Photo {
        id: String,
        caption: String,
        shots: OrderedMap<Shots>,
        photo: String,
    },
    #[serde(rename = "embedVideo")]
    EmbedVideo { id: String, caption: String, html: String },
    #[serde(rename = "embedVideoDailyMotion", rename_all = "camelCase")]
    EmbedVideoDailyMotion {
        id: String,
        caption: String,
        player_id: String,
        video_id: String,
    },
    #[serde(rename = "widget", rename_all = "camelCase")]
    Widget {
        caption: String,
        url: String,
        aspect_ratio: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitlesResponse {
    pub title: String,
    pub pre_title: String,
    pub url_title: String,
    pub mobile_title: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeResponse {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    pub encode_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Fully merged document for an editorial authored in the new system.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorialResponse {
    pub id: String,
    pub url: String,
    pub titles: TitlesResponse,
    pub lead: String,
    pub publication_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_on: Option<String>,
    #[serde(rename = "type")]
    pub kind: TypeResponse,
    pub indexable: bool,
    pub deleted: bool,
    pub published: bool,
    pub closing_mode_id: String,
    pub commentable: bool,
    pub is_brand: bool,
    pub is_amazon_onsite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_editorial_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_date: Option<String>,
    pub count_words: u32,
    pub section: SectionResponse,
    pub tags: Vec<TagResponse>,
    pub ads_options: Vec<SectionResponse>,
    pub analytics_options: Vec<SectionResponse>,
    pub body: BodyResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multimedia: Option<MediaFragment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standfirst: Option<BodyResponse>,
    pub signatures: Vec<Signature>,
    pub count_comments: u64,
    pub recommended_editorials: Vec<EditorialCard>,
}

/// What `resolve_editorial` hands back: the legacy payload verbatim, or the merged document.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EditorialDocument {
    Legacy(serde_json::Value),
    Resolved(Box<EditorialResponse>),
}
