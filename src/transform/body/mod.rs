//! Body element -> response fragment dispatch.

mod composite;
mod media;
mod text;

use std::sync::Arc;

use crate::domain::{BodyElement, BodyElementKind};
use crate::error::Result;
use crate::response::BodyFragment;

use super::registry::{Dispatchable, TransformerRegistry};
use super::RenderSettings;

pub use text::extract_links;

pub type BodyRegistry = TransformerRegistry<BodyElement, BodyFragment>;

impl Dispatchable for BodyElement {
    type Kind = BodyElementKind;

    fn kind(&self) -> BodyElementKind {
        BodyElement::kind(self)
    }
}

/// Registry with a transformer for every body element kind.
pub fn build_body_registry(settings: Arc<RenderSettings>) -> Result<BodyRegistry> {
    let mut registry = BodyRegistry::new("body");
    registry.register(Box::new(text::ContentWithLinksTransformer))?;
    registry.register(Box::new(text::ContentTransformer))?;
    registry.register(Box::new(text::LinkTransformer))?;
    registry.register(Box::new(text::ListTransformer))?;
    registry.register(Box::new(media::PictureTransformer::new(settings.clone())))?;
    registry.register(Box::new(media::PictureMembershipTransformer::new(settings.clone())))?;
    registry.register(Box::new(media::VideoTransformer::new(settings.clone())))?;
    registry.register(Box::new(composite::ExplanatorySummaryTransformer))?;
    registry.register(Box::new(composite::InsertedNewsTransformer::new(settings)))?;
    registry.register(Box::new(composite::MembershipCardTransformer))?;
    Ok(registry)
}
