use crate::app::resolve_data::ResolveData;
use crate::domain::body::Link;
use crate::domain::{BodyElement, BodyElementKind};
use crate::error::Result;
use crate::response::{
    BodyFragment, BodyPayload, ContentPayload, ContentWithLinksPayload, InlineLink, LinkPayload, ListItemPayload,
    ListPayload, OrderedMap,
};

use super::BodyRegistry;
use crate::transform::registry::Transformer;

/// Links keyed by their position in the text; `None` when there are none.
pub fn extract_links(links: &[Link]) -> Option<OrderedMap<InlineLink>> {
    if links.is_empty() {
        return None;
    }
    let mut map = OrderedMap::new();
    for (position, link) in links.iter().enumerate() {
        map.insert(
            position.to_string(),
            InlineLink {
                kind: "link",
                content: link.content.clone(),
                url: link.url.clone(),
                target: link.target.clone(),
            },
        );
    }
    Some(map)
}

pub struct ContentWithLinksTransformer;

impl Transformer<BodyElement, BodyFragment> for ContentWithLinksTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::Paragraph, BodyElementKind::Subhead]
    }

    fn transform(&self, element: &BodyElement, _: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let text = match element {
            BodyElement::Paragraph(text) | BodyElement::Subhead(text) => text,
            _ => return Err(registry.mismatch(element)),
        };
        Ok(Some(BodyFragment {
            kind: element.kind(),
            payload: BodyPayload::ContentWithLinks(ContentWithLinksPayload {
                content: text.content.clone(),
                links: extract_links(&text.links),
            }),
        }))
    }
}

pub struct ContentTransformer;

impl Transformer<BodyElement, BodyFragment> for ContentTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::Html, BodyElementKind::Summary]
    }

    fn transform(&self, element: &BodyElement, _: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let content = match element {
            BodyElement::Html(c) | BodyElement::Summary(c) => c.content.clone(),
            _ => return Err(registry.mismatch(element)),
        };
        Ok(Some(BodyFragment { kind: element.kind(), payload: BodyPayload::Content(ContentPayload { content }) }))
    }
}

pub struct LinkTransformer;

impl Transformer<BodyElement, BodyFragment> for LinkTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::Link]
    }

    fn transform(&self, element: &BodyElement, _: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::Link(link) = element else {
            return Err(registry.mismatch(element));
        };
        Ok(Some(BodyFragment {
            kind: BodyElementKind::Link,
            payload: BodyPayload::Link(LinkPayload {
                content: link.content.clone(),
                url: link.url.clone(),
                target: link.target.clone(),
            }),
        }))
    }
}

/// Shared by unordered, numbered and generic lists.
pub struct ListTransformer;

impl Transformer<BodyElement, BodyFragment> for ListTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::UnorderedList, BodyElementKind::NumberedList, BodyElementKind::GenericList]
    }

    fn transform(&self, element: &BodyElement, _: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let list = match element {
            BodyElement::UnorderedList(l) | BodyElement::NumberedList(l) | BodyElement::GenericList(l) => l,
            _ => return Err(registry.mismatch(element)),
        };
        let items = list
            .items
            .iter()
            .map(|item| ListItemPayload {
                kind: "listitem",
                content: item.content.clone(),
                links: extract_links(&item.links),
            })
            .collect();
        Ok(Some(BodyFragment { kind: element.kind(), payload: BodyPayload::List(ListPayload { items }) }))
    }
}
