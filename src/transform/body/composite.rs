use std::sync::Arc;

use crate::app::resolve_data::ResolveData;
use crate::domain::{BodyElement, BodyElementKind};
use crate::error::Result;
use crate::response::{
    BodyFragment, BodyPayload, ExplanatorySummaryPayload, MembershipButtonPayload, MembershipCardPayload,
};
use crate::transform::registry::Transformer;
use crate::transform::teaser::editorial_card;
use crate::transform::RenderSettings;

use super::BodyRegistry;

pub struct ExplanatorySummaryTransformer;

impl Transformer<BodyElement, BodyFragment> for ExplanatorySummaryTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::ExplanatorySummary]
    }

    fn transform(&self, element: &BodyElement, data: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::ExplanatorySummary(summary) = element else {
            return Err(registry.mismatch(element));
        };
        let items = registry.dispatch_all(&summary.elements, data)?;
        Ok(Some(BodyFragment {
            kind: BodyElementKind::ExplanatorySummary,
            payload: BodyPayload::ExplanatorySummary(ExplanatorySummaryPayload { title: summary.title.clone(), items }),
        }))
    }
}

/// Teaser of another editorial; omitted when that editorial did not resolve.
pub struct InsertedNewsTransformer {
    settings: Arc<RenderSettings>,
}

impl InsertedNewsTransformer {
    pub fn new(settings: Arc<RenderSettings>) -> Self {
        Self { settings }
    }
}

impl Transformer<BodyElement, BodyFragment> for InsertedNewsTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::InsertedNews]
    }

    fn transform(&self, element: &BodyElement, data: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::InsertedNews(news) = element else {
            return Err(registry.mismatch(element));
        };
        let Some(bundle) = data.inserted_news_by_id.get(&news.editorial_id) else {
            return Ok(None);
        };
        Ok(Some(BodyFragment {
            kind: BodyElementKind::InsertedNews,
            payload: BodyPayload::InsertedNews(editorial_card(bundle, data, &self.settings, None)),
        }))
    }
}

/// Buttons take their rewritten urls from the batched membership result.
pub struct MembershipCardTransformer;

impl Transformer<BodyElement, BodyFragment> for MembershipCardTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::MembershipCard]
    }

    fn transform(&self, element: &BodyElement, data: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::MembershipCard(card) = element else {
            return Err(registry.mismatch(element));
        };
        let buttons = card
            .buttons
            .iter()
            .map(|button| MembershipButtonPayload {
                url: data.membership_link(&button.url).to_string(),
                url_membership: data.membership_link(&button.url_membership).to_string(),
                text: button.cta.clone(),
            })
            .collect();
        let picture = match &card.picture {
            Some(picture) => registry
                .dispatch(&BodyElement::PictureMembership(picture.clone()), data)?
                .map(Box::new),
            None => None,
        };
        Ok(Some(BodyFragment {
            kind: BodyElementKind::MembershipCard,
            payload: BodyPayload::MembershipCard(MembershipCardPayload {
                title: card.title.clone(),
                buttons,
                title_banner: card.title_banner.clone(),
                class_banner: card.class_banner.clone(),
                picture,
            }),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::build_body_registry;
    use super::*;
    use crate::app::resolve_data::EditorialBundle;
    use crate::domain::{Editorial, Photo};
    use crate::transform::fixtures;
    use serde_json::json;

    fn registry() -> BodyRegistry {
        build_body_registry(Arc::new(fixtures::settings())).unwrap()
    }

    fn element(value: serde_json::Value) -> BodyElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_inserted_news_without_bundle_is_omitted() {
        let el = element(json!({"type": "bodytaginsertednews", "editorialId": "404"}));
        assert_eq!(registry().dispatch(&el, &ResolveData::new()).unwrap(), None);
    }

    #[test]
    fn test_inserted_news_renders_teaser() {
        let editorial: Editorial = serde_json::from_value(json!({
            "id": "2",
            "sourceEditorialId": "s",
            "titles": {"title": "Second", "urlTitle": "second story"},
            "publicationDate": "2024-05-02T08:00:00Z",
            "sectionId": "s1"
        }))
        .unwrap();
        let mut data = ResolveData::new();
        data.inserted_news_by_id.insert(
            "2".into(),
            EditorialBundle { editorial, section: fixtures::section(), signatures: vec![], multimedia_id: None },
        );
        let el = element(json!({"type": "bodytaginsertednews", "editorialId": "2"}));
        let out = serde_json::to_value(registry().dispatch(&el, &data).unwrap().unwrap()).unwrap();
        assert_eq!(out["type"], "bodytaginsertednews");
        assert_eq!(out["editorialId"], "2");
        assert_eq!(out["title"], "Second");
        assert_eq!(out["editorial"], "https://www.elconfidencial.com/espana/2024-05-02/second-story_2");
        assert_eq!(out["photo"], "");
        assert_eq!(out["shots"], json!({}));
    }

    #[test]
    fn test_membership_buttons_share_rewritten_url() {
        let mut data = ResolveData::new();
        data.membership_links.insert("https://shop.es".into(), "https://shop.es?ref=m".into());
        data.photo_by_id.insert("p9".into(), Photo { id: "p9".into(), file: "abcdefghij.jpg".into() });
        let el = element(json!({
            "type": "bodytagmembershipcard",
            "title": "Subscribe",
            "titleBanner": "Banner",
            "classBanner": "dark",
            "buttons": [
                {"url": "https://shop.es", "urlMembership": "https://shop.es", "cta": "Monthly"},
                {"url": "https://shop.es", "urlMembership": "https://other.es", "cta": "Yearly"}
            ],
            "picture": {"id": "p9", "orientation": "square", "topX": 0, "topY": 0, "bottomX": 500, "bottomY": 500}
        }));
        let out = serde_json::to_value(registry().dispatch(&el, &data).unwrap().unwrap()).unwrap();
        assert_eq!(out["buttons"][0]["url"], "https://shop.es?ref=m");
        assert_eq!(out["buttons"][1]["url"], "https://shop.es?ref=m");
        assert_eq!(out["buttons"][1]["urlMembership"], "https://other.es");
        assert_eq!(out["buttons"][1]["text"], "Yearly");
        assert_eq!(out["picture"]["type"], "bodytagpicturemembership");
        assert_eq!(out["picture"]["orientation"], "square");
        assert_eq!(out["titleBanner"], "Banner");
    }

    #[test]
    fn test_explanatory_summary_transforms_nested_items() {
        let el = element(json!({
            "type": "bodytagexplanatorysummary",
            "title": "Keys",
            "elements": [
                {"type": "paragraph", "content": "one"},
                {"type": "bodytaginsertednews", "editorialId": "missing"}
            ]
        }));
        let out = serde_json::to_value(registry().dispatch(&el, &ResolveData::new()).unwrap().unwrap()).unwrap();
        assert_eq!(out["title"], "Keys");
        assert_eq!(out["items"], json!([{"type": "paragraph", "content": "one", "links": null}]));
    }
}
