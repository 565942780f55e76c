use std::collections::HashMap;

use crate::domain::{Editorial, Multimedia, Photo, Section, Widget};
use crate::response::Signature;

/// Backing resource fetched alongside a multimedia entity.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaResource {
    Photo(Photo),
    Widget(Widget),
}

/// Where a resolved multimedia is rendered; selects the shot tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Opening,
    Inline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMultimedia {
    pub multimedia: Multimedia,
    pub resource: Option<MediaResource>,
    pub placement: Placement,
}

impl ResolvedMultimedia {
    pub fn photo(&self) -> Option<&Photo> {
        match &self.resource {
            Some(MediaResource::Photo(photo)) => Some(photo),
            _ => None,
        }
    }

    pub fn widget(&self) -> Option<&Widget> {
        match &self.resource {
            Some(MediaResource::Widget(widget)) => Some(widget),
            _ => None,
        }
    }
}

/// A referenced editorial resolved far enough to render its teaser.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorialBundle {
    pub editorial: Editorial,
    pub section: Section,
    pub signatures: Vec<Signature>,
    /// Key into `multimedia_by_id` or `opening_by_id` for the thumbnail.
    pub multimedia_id: Option<String>,
}

/// Per-request side entities, filled by the aggregator and read by the transformers.
#[derive(Debug, Clone, Default)]
pub struct ResolveData {
    pub multimedia_by_id: HashMap<String, ResolvedMultimedia>,
    pub opening_by_id: HashMap<String, ResolvedMultimedia>,
    pub inserted_news_by_id: HashMap<String, EditorialBundle>,
    pub recommended_by_id: HashMap<String, EditorialBundle>,
    /// Recommended ids that resolved, in list order.
    pub recommended_order: Vec<String>,
    pub photo_by_id: HashMap<String, Photo>,
    pub membership_links: HashMap<String, String>,
}

impl ResolveData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thumbnail multimedia for a bundle: openings first, then inline multimedia.
    pub fn bundle_multimedia(&self, bundle: &EditorialBundle) -> Option<&ResolvedMultimedia> {
        let id = bundle.multimedia_id.as_deref()?;
        self.opening_by_id.get(id).or_else(|| self.multimedia_by_id.get(id))
    }

    pub fn recommended(&self) -> impl Iterator<Item = &EditorialBundle> {
        self.recommended_order.iter().filter_map(|id| self.recommended_by_id.get(id))
    }

    /// Rewritten url, or the original when the batch did not cover it.
    pub fn membership_link<'a>(&'a self, url: &'a str) -> &'a str {
        self.membership_links.get(url).map(String::as_str).unwrap_or(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_link_falls_back_to_original() {
        let mut data = ResolveData::new();
        data.membership_links.insert("https://a".into(), "https://a?m=1".into());
        assert_eq!(data.membership_link("https://a"), "https://a?m=1");
        assert_eq!(data.membership_link("https://b"), "https://b");
    }
}
