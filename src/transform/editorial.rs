use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::resolve_data::{ResolveData, ResolvedMultimedia};
use crate::constants::closing_mode_name;
use crate::domain::{Editorial, Section, Tag};
use crate::error::Result;
use crate::response::{
    BodyResponse, EditorialResponse, Signature, SectionResponse, TagResponse, TitlesResponse, TypeResponse,
};

use super::body::{build_body_registry, BodyRegistry};
use super::media::{build_media_registry, MediaRegistry};
use super::teaser::recommended_cards;
use super::RenderSettings;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const BODY_TYPE: &str = "normal";
const STANDFIRST_TYPE: &str = "standfirst";

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Everything resolved for the primary editorial besides the shared context.
#[derive(Debug, Clone)]
pub struct PrimaryEditorial {
    pub editorial: Editorial,
    pub section: Section,
    pub signatures: Vec<Signature>,
    pub tags: Vec<Tag>,
    pub count_comments: u64,
}

pub fn section_response(section: &Section, settings: &RenderSettings) -> SectionResponse {
    SectionResponse {
        id: section.id.clone(),
        name: section.name.clone(),
        url: settings.urls.section_url(section),
        encode_name: section.encode_name.clone(),
    }
}

/// Opening multimedia when it resolved, otherwise the editorial's inline multimedia.
pub fn primary_multimedia<'a>(editorial: &Editorial, data: &'a ResolveData) -> Option<&'a ResolvedMultimedia> {
    editorial
        .opening_multimedia_id
        .as_deref()
        .and_then(|id| data.opening_by_id.get(id))
        .or_else(|| editorial.multimedia.photo_id().and_then(|id| data.multimedia_by_id.get(id)))
}

/// Builds the final document from the primary editorial and the resolution context.
pub struct ResponseAssembler {
    settings: Arc<RenderSettings>,
    body: BodyRegistry,
    media: MediaRegistry,
}

impl ResponseAssembler {
    pub fn new(settings: Arc<RenderSettings>) -> Result<Self> {
        Ok(Self {
            body: build_body_registry(settings.clone())?,
            media: build_media_registry(settings.clone())?,
            settings,
        })
    }

    pub fn assemble(&self, primary: &PrimaryEditorial, data: &ResolveData) -> Result<EditorialResponse> {
        let editorial = &primary.editorial;
        let section = &primary.section;
        let settings = self.settings.as_ref();

        let body = BodyResponse { kind: BODY_TYPE, elements: self.body.dispatch_all(editorial.body.elements(), data)? };

        let standfirst = match &editorial.standfirst {
            Some(standfirst) => Some(BodyResponse {
                kind: STANDFIRST_TYPE,
                elements: self.body.dispatch_all(standfirst.elements(), data)?,
            }),
            None => None,
        };

        let multimedia = match primary_multimedia(editorial, data) {
            Some(resolved) => self.media.dispatch(resolved, data)?,
            None => None,
        };

        let breadcrumb: Vec<SectionResponse> =
            section.breadcrumb().into_iter().map(|s| section_response(s, settings)).collect();

        let tags = primary
            .tags
            .iter()
            .map(|tag| TagResponse {
                id: tag.id.clone(),
                name: tag.name.clone(),
                url: settings.urls.tag_url(tag, section),
            })
            .collect();

        Ok(EditorialResponse {
            id: editorial.id.clone(),
            url: settings.urls.editorial_url(editorial, section),
            titles: TitlesResponse {
                title: editorial.titles.title.clone(),
                pre_title: editorial.titles.pre_title.clone(),
                url_title: editorial.titles.url_title.clone(),
                mobile_title: editorial.titles.mobile_title.clone(),
            },
            lead: editorial.lead.clone(),
            publication_date: format_date(&editorial.publication_date),
            updated_on: editorial.updated_on.as_ref().map(format_date),
            end_on: editorial.end_on.as_ref().map(format_date),
            kind: TypeResponse { id: editorial.kind.id(), name: editorial.kind.name() },
            indexable: editorial.indexable,
            deleted: editorial.deleted,
            published: editorial.published,
            closing_mode_id: closing_mode_name(editorial.closing_mode_id.as_deref().unwrap_or_default()).to_string(),
            commentable: editorial.commentable,
            is_brand: editorial.is_brand,
            is_amazon_onsite: editorial.is_amazon_onsite,
            content_type: editorial.content_type.clone(),
            canonical_editorial_id: editorial.canonical_editorial_id.clone(),
            url_date: editorial.url_date.as_ref().map(format_date),
            count_words: editorial.count_words,
            section: section_response(section, settings),
            tags,
            ads_options: breadcrumb.clone(),
            analytics_options: breadcrumb,
            body,
            multimedia,
            standfirst,
            signatures: primary.signatures.clone(),
            count_comments: primary.count_comments,
            recommended_editorials: recommended_cards(data, settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::fixtures;
    use serde_json::json;

    fn primary() -> PrimaryEditorial {
        let editorial: Editorial = serde_json::from_value(json!({
            "id": "100",
            "sourceEditorialId": "src",
            "titles": {"title": "Main", "preTitle": "Pre", "urlTitle": "main story", "mobileTitle": "M"},
            "lead": "Lead",
            "publicationDate": "2024-03-01T10:30:00Z",
            "updatedOn": "2024-03-02T11:00:00Z",
            "visible": true,
            "published": true,
            "type": "blog",
            "closingModeId": "1",
            "countWords": 320,
            "sectionId": "s1",
            "body": [{"type": "paragraph", "content": "Hello"}],
            "standfirst": [{"type": "bodytagsummary", "content": "In short"}]
        }))
        .unwrap();
        let mut section = fixtures::section();
        section.parent = Some(Box::new(Section {
            id: "root".into(),
            name: "Home".into(),
            site_id: "1".into(),
            path: "".into(),
            encode_name: "home".into(),
            is_subdomain_blog: false,
            parent: None,
        }));
        PrimaryEditorial {
            editorial,
            section,
            signatures: vec![],
            tags: vec![Tag { id: "7".into(), name: "Madrid".into(), kind: "lugares".into() }],
            count_comments: 12,
        }
    }

    #[test]
    fn test_direct_fields() {
        let assembler = ResponseAssembler::new(Arc::new(fixtures::settings())).unwrap();
        let response = assembler.assemble(&primary(), &ResolveData::new()).unwrap();
        let out = serde_json::to_value(&response).unwrap();

        assert_eq!(out["url"], "https://www.elconfidencial.com/espana/2024-03-01/main-story_100");
        assert_eq!(out["publicationDate"], "2024-03-01 10:30:00");
        assert_eq!(out["updatedOn"], "2024-03-02 11:00:00");
        assert!(out.get("endOn").is_none());
        assert_eq!(out["type"], json!({"id": "3", "name": "blog"}));
        assert_eq!(out["closingModeId"], "registry");
        assert_eq!(out["countWords"], 320);
        assert_eq!(out["countComments"], 12);
        assert_eq!(out["tags"][0]["url"], "https://www.elconfidencial.com/tags/lugares/madrid-7");
        assert_eq!(out["body"]["type"], "normal");
        assert_eq!(out["body"]["elements"][0]["content"], "Hello");
        assert_eq!(out["standfirst"]["elements"][0]["type"], "bodytagsummary");
        assert_eq!(out["recommendedEditorials"], json!([]));
        assert!(out.get("multimedia").is_none());
    }

    #[test]
    fn test_breadcrumb_options_are_root_first() {
        let assembler = ResponseAssembler::new(Arc::new(fixtures::settings())).unwrap();
        let response = assembler.assemble(&primary(), &ResolveData::new()).unwrap();
        let ids: Vec<&str> = response.ads_options.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "s1"]);
        assert_eq!(response.ads_options, response.analytics_options);
    }
}
