use serde::Deserialize;
use std::fmt;

/// One node of an editorial's rich-content tree.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BodyElement {
    #[serde(rename = "paragraph")]
    Paragraph(ContentWithLinks),
    #[serde(rename = "subhead")]
    Subhead(ContentWithLinks),
    #[serde(rename = "bodytagpicture")]
    Picture(Picture),
    #[serde(rename = "bodytagpicturemembership")]
    PictureMembership(PictureMembership),
    #[serde(rename = "bodytagvideo")]
    Video(Video),
    #[serde(rename = "bodytagvideoyoutube")]
    VideoYoutube(Video),
    #[serde(rename = "bodytaghtml")]
    Html(Content),
    #[serde(rename = "bodytagsummary")]
    Summary(Content),
    #[serde(rename = "bodytagexplanatorysummary")]
    ExplanatorySummary(ExplanatorySummary),
    #[serde(rename = "bodytaginsertednews")]
    InsertedNews(InsertedNews),
    #[serde(rename = "bodytagmembershipcard")]
    MembershipCard(MembershipCard),
    #[serde(rename = "link")]
    Link(Link),
    #[serde(rename = "unorderedlist")]
    UnorderedList(List),
    #[serde(rename = "numberedlist")]
    NumberedList(List),
    #[serde(rename = "genericlist")]
    GenericList(List),
}

/// Discriminant of [`BodyElement`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyElementKind {
    Paragraph,
    Subhead,
    Picture,
    PictureMembership,
    Video,
    VideoYoutube,
    Html,
    Summary,
    ExplanatorySummary,
    InsertedNews,
    MembershipCard,
    Link,
    UnorderedList,
    NumberedList,
    GenericList,
}

impl BodyElementKind {
    pub const ALL: [BodyElementKind; 15] = [
        Self::Paragraph,
        Self::Subhead,
        Self::Picture,
        Self::PictureMembership,
        Self::Video,
        Self::VideoYoutube,
        Self::Html,
        Self::Summary,
        Self::ExplanatorySummary,
        Self::InsertedNews,
        Self::MembershipCard,
        Self::Link,
        Self::UnorderedList,
        Self::NumberedList,
        Self::GenericList,
    ];

    /// Wire name, shared by the input payload and the response fragment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Subhead => "subhead",
            Self::Picture => "bodytagpicture",
            Self::PictureMembership => "bodytagpicturemembership",
            Self::Video => "bodytagvideo",
            Self::VideoYoutube => "bodytagvideoyoutube",
            Self::Html => "bodytaghtml",
            Self::Summary => "bodytagsummary",
            Self::ExplanatorySummary => "bodytagexplanatorysummary",
            Self::InsertedNews => "bodytaginsertednews",
            Self::MembershipCard => "bodytagmembershipcard",
            Self::Link => "link",
            Self::UnorderedList => "unorderedlist",
            Self::NumberedList => "numberedlist",
            Self::GenericList => "genericlist",
        }
    }
}

impl fmt::Display for BodyElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BodyElement {
    pub fn kind(&self) -> BodyElementKind {
        match self {
            Self::Paragraph(_) => BodyElementKind::Paragraph,
            Self::Subhead(_) => BodyElementKind::Subhead,
            Self::Picture(_) => BodyElementKind::Picture,
            Self::PictureMembership(_) => BodyElementKind::PictureMembership,
            Self::Video(_) => BodyElementKind::Video,
            Self::VideoYoutube(_) => BodyElementKind::VideoYoutube,
            Self::Html(_) => BodyElementKind::Html,
            Self::Summary(_) => BodyElementKind::Summary,
            Self::ExplanatorySummary(_) => BodyElementKind::ExplanatorySummary,
            Self::InsertedNews(_) => BodyElementKind::InsertedNews,
            Self::MembershipCard(_) => BodyElementKind::MembershipCard,
            Self::Link(_) => BodyElementKind::Link,
            Self::UnorderedList(_) => BodyElementKind::UnorderedList,
            Self::NumberedList(_) => BodyElementKind::NumberedList,
            Self::GenericList(_) => BodyElementKind::GenericList,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Content {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentWithLinks {
    pub content: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Link {
    pub content: String,
    pub url: String,
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    "_self".to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Photo id in the multimedia store.
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub alternate: String,
    #[serde(default)]
    pub orientation: String,
    #[serde(flatten)]
    pub crop: Crop,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PictureMembership {
    pub id: String,
    #[serde(default)]
    pub orientation: String,
    #[serde(flatten)]
    pub crop: Crop,
}

/// Crop rectangle chosen by the editor, in original-image pixels.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[serde(default)]
    pub top_x: u32,
    #[serde(default)]
    pub top_y: u32,
    #[serde(default)]
    pub bottom_x: u32,
    #[serde(default)]
    pub bottom_y: u32,
}

impl Crop {
    pub fn is_empty(&self) -> bool {
        self.bottom_x <= self.top_x || self.bottom_y <= self.top_y
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub width: u32,
    pub height: u32,
    /// Start offset in seconds; only meaningful for YouTube players.
    #[serde(default)]
    pub start: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExplanatorySummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<BodyElement>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertedNews {
    pub editorial_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub buttons: Vec<MembershipButton>,
    #[serde(default)]
    pub title_banner: String,
    #[serde(default)]
    pub class_banner: String,
    #[serde(default)]
    pub picture: Option<PictureMembership>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipButton {
    pub url: String,
    pub url_membership: String,
    #[serde(default)]
    pub cta: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct List {
    #[serde(default)]
    pub items: Vec<ContentWithLinks>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Body(pub Vec<BodyElement>);

impl Body {
    pub fn elements(&self) -> &[BodyElement] {
        &self.0
    }

    /// Depth-first walk, descending into explanatory summaries.
    fn walk<'a>(elements: &'a [BodyElement], visit: &mut dyn FnMut(&'a BodyElement)) {
        for element in elements {
            visit(element);
            if let BodyElement::ExplanatorySummary(summary) = element {
                Self::walk(&summary.elements, visit);
            }
        }
    }

    /// Referenced editorial ids of inserted-news blocks, in body order.
    pub fn inserted_news_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        Self::walk(&self.0, &mut |element: &BodyElement| {
            if let BodyElement::InsertedNews(news) = element {
                ids.push(news.editorial_id.clone());
            }
        });
        ids
    }

    /// Every url and membership url carried by membership-card buttons.
    pub fn membership_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        Self::walk(&self.0, &mut |element: &BodyElement| {
            if let BodyElement::MembershipCard(card) = element {
                for button in &card.buttons {
                    urls.push(button.url_membership.clone());
                    urls.push(button.url.clone());
                }
            }
        });
        urls
    }

    /// Photo ids of inline pictures, membership pictures and membership-card pictures.
    pub fn picture_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        Self::walk(&self.0, &mut |element: &BodyElement| match element {
            BodyElement::Picture(picture) => ids.push(picture.id.clone()),
            BodyElement::PictureMembership(picture) => ids.push(picture.id.clone()),
            BodyElement::MembershipCard(card) => {
                if let Some(picture) = &card.picture {
                    ids.push(picture.id.clone());
                }
            }
            _ => {}
        });
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_body() -> Body {
        serde_json::from_value(json!([
            {"type": "paragraph", "content": "intro", "links": [{"content": "here", "url": "https://a.es"}]},
            {"type": "bodytaginsertednews", "editorialId": "2"},
            {"type": "bodytagexplanatorysummary", "title": "Key points", "elements": [
                {"type": "bodytaginsertednews", "editorialId": "3"},
                {"type": "bodytagpicture", "id": "p2", "orientation": "portrait"}
            ]},
            {"type": "bodytagpicture", "id": "p1", "caption": "c", "alternate": "a", "orientation": "landscape"},
            {"type": "bodytagmembershipcard", "title": "Join", "buttons": [
                {"url": "https://x.es", "urlMembership": "https://m.es", "cta": "Buy"}
            ], "picture": {"id": "p3", "orientation": "square"}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_deserializes_every_variant_tag() {
        for kind in BodyElementKind::ALL {
            let value = match kind {
                BodyElementKind::Paragraph | BodyElementKind::Subhead => json!({"type": kind.as_str(), "content": "x"}),
                BodyElementKind::Html | BodyElementKind::Summary => json!({"type": kind.as_str(), "content": "x"}),
                BodyElementKind::Picture | BodyElementKind::PictureMembership => json!({"type": kind.as_str(), "id": "1"}),
                BodyElementKind::Video | BodyElementKind::VideoYoutube => {
                    json!({"type": kind.as_str(), "id": "v", "width": 640, "height": 360})
                }
                BodyElementKind::ExplanatorySummary => json!({"type": kind.as_str()}),
                BodyElementKind::InsertedNews => json!({"type": kind.as_str(), "editorialId": "9"}),
                BodyElementKind::MembershipCard => json!({"type": kind.as_str()}),
                BodyElementKind::Link => json!({"type": kind.as_str(), "content": "x", "url": "u"}),
                _ => json!({"type": kind.as_str(), "items": []}),
            };
            let element: BodyElement = serde_json::from_value(value).unwrap();
            assert_eq!(element.kind(), kind);
        }
    }

    #[test]
    fn test_scans_descend_into_summaries() {
        let body = sample_body();
        assert_eq!(body.inserted_news_ids(), vec!["2", "3"]);
        assert_eq!(body.picture_ids(), vec!["p2", "p1", "p3"]);
        assert_eq!(body.membership_urls(), vec!["https://m.es", "https://x.es"]);
    }

    #[test]
    fn test_link_target_defaults_to_self() {
        let body = sample_body();
        match &body.elements()[0] {
            BodyElement::Paragraph(p) => assert_eq!(p.links[0].target, "_self"),
            other => panic!("unexpected element {:?}", other),
        }
    }
}
