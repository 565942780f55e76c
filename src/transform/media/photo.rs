use std::sync::Arc;

use crate::app::resolve_data::{Placement, ResolveData, ResolvedMultimedia};
use crate::constants::{ASPECT_16_9, CLIPPING_MULTIMEDIA_BIG};
use crate::domain::Multimedia;
use crate::error::Result;
use crate::response::MediaFragment;
use crate::transform::registry::Transformer;
use crate::transform::shots::{ShotGenerator, INLINE_SIZES, OPENING_SIZES};
use crate::transform::RenderSettings;

use super::{MediaKind, MediaRegistry};

pub struct PhotoTransformer {
    settings: Arc<RenderSettings>,
}

impl PhotoTransformer {
    pub fn new(settings: Arc<RenderSettings>) -> Self {
        Self { settings }
    }
}

impl Transformer<ResolvedMultimedia, MediaFragment> for PhotoTransformer {
    fn supports(&self) -> Vec<MediaKind> {
        vec![MediaKind::Photo]
    }

    fn transform(
        &self,
        resolved: &ResolvedMultimedia,
        _: &ResolveData,
        registry: &MediaRegistry,
    ) -> Result<Option<MediaFragment>> {
        let Multimedia::Photo(multimedia) = &resolved.multimedia else {
            return Err(registry.mismatch(resolved));
        };
        let Some(photo) = resolved.photo() else {
            return Ok(None);
        };
        let table = match resolved.placement {
            Placement::Opening => OPENING_SIZES,
            Placement::Inline => INLINE_SIZES,
        };
        let shots = self.settings.shots.shot_set(
            &photo.file,
            resolved.multimedia.clipping(CLIPPING_MULTIMEDIA_BIG),
            table,
        );
        let canonical = ShotGenerator::canonical(&shots, ASPECT_16_9);
        Ok(Some(MediaFragment::Photo {
            id: multimedia.id.clone(),
            caption: multimedia.caption.clone(),
            shots,
            photo: canonical,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::resolve_data::MediaResource;
    use crate::domain::Photo;
    use crate::transform::fixtures;
    use serde_json::json;

    fn resolved(placement: Placement, clipping: serde_json::Value) -> ResolvedMultimedia {
        ResolvedMultimedia {
            multimedia: serde_json::from_value(json!({
                "type": "photo", "id": "m1", "caption": "Cover", "resourceId": "r1", "clippings": [clipping]
            }))
            .unwrap(),
            resource: Some(MediaResource::Photo(Photo { id: "r1".into(), file: "abcdefghij.jpg".into() })),
            placement,
        }
    }

    fn big(bottom_x: u32) -> serde_json::Value {
        json!({"name": "size_multimedia_big", "topX": 0, "topY": 0, "bottomX": bottom_x, "bottomY": 1080})
    }

    fn render(resolved: &ResolvedMultimedia) -> serde_json::Value {
        let transformer = PhotoTransformer::new(Arc::new(fixtures::settings()));
        let registry = MediaRegistry::new("multimedia");
        serde_json::to_value(transformer.transform(resolved, &ResolveData::new(), &registry).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_opening_photo_renders_all_aspects() {
        let out = render(&resolved(Placement::Opening, big(1920)));
        assert_eq!(out["type"], "photo");
        assert_eq!(out["caption"], "Cover");
        assert_eq!(out["shots"].as_object().unwrap().len(), 5);
        assert!(out["photo"].as_str().unwrap().contains("/1440x810/"));
        assert!(out["shots"]["3:2"]["lo-res"].as_str().unwrap().contains("/48x32/"));
    }

    #[test]
    fn test_inline_photo_renders_three_aspects() {
        let out = render(&resolved(Placement::Inline, big(1920)));
        let aspects: Vec<&String> = out["shots"].as_object().unwrap().keys().collect();
        assert_eq!(aspects.len(), 3);
    }

    #[test]
    fn test_zero_area_clipping_gives_empty_shots_and_photo() {
        let out = render(&resolved(Placement::Opening, big(0)));
        assert_eq!(out["shots"], json!({}));
        assert_eq!(out["photo"], "");
    }

    #[test]
    fn test_non_photo_multimedia_is_a_wiring_error() {
        let transformer = PhotoTransformer::new(Arc::new(fixtures::settings()));
        let unknown = ResolvedMultimedia { multimedia: Multimedia::Unknown, resource: None, placement: Placement::Opening };
        let err = transformer
            .transform(&unknown, &ResolveData::new(), &MediaRegistry::new("multimedia"))
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "No multimedia transformer registered for type 'unknown'");
    }
}
