//! Resolved multimedia -> opening/inline media fragment dispatch.

mod embed_video;
mod photo;
mod widget;

use std::fmt;
use std::sync::Arc;

use crate::app::resolve_data::ResolvedMultimedia;
use crate::domain::Multimedia;
use crate::error::Result;
use crate::response::MediaFragment;

use super::registry::{Dispatchable, TransformerRegistry};
use super::RenderSettings;

pub type MediaRegistry = TransformerRegistry<ResolvedMultimedia, MediaFragment>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    EmbedVideo,
    Widget,
    Unknown,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Photo => "photo",
            Self::EmbedVideo => "embedVideo",
            Self::Widget => "widget",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl Dispatchable for ResolvedMultimedia {
    type Kind = MediaKind;

    fn kind(&self) -> MediaKind {
        match self.multimedia {
            Multimedia::Photo(_) => MediaKind::Photo,
            Multimedia::EmbedVideo(_) => MediaKind::EmbedVideo,
            Multimedia::Widget(_) => MediaKind::Widget,
            Multimedia::Unknown => MediaKind::Unknown,
        }
    }
}

pub fn build_media_registry(settings: Arc<RenderSettings>) -> Result<MediaRegistry> {
    let mut registry = MediaRegistry::new("multimedia");
    registry.register(Box::new(photo::PhotoTransformer::new(settings)))?;
    registry.register(Box::new(embed_video::EmbedVideoTransformer))?;
    registry.register(Box::new(widget::WidgetTransformer))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::resolve_data::{Placement, ResolveData};
    use crate::transform::fixtures;

    #[test]
    fn test_unknown_multimedia_has_no_transformer() {
        let registry = build_media_registry(Arc::new(fixtures::settings())).unwrap();
        assert_eq!(registry.len(), 3);
        let unknown = ResolvedMultimedia { multimedia: Multimedia::Unknown, resource: None, placement: Placement::Opening };
        let err = registry.dispatch(&unknown, &ResolveData::new()).unwrap_err();
        assert!(err.is_configuration());
    }
}
