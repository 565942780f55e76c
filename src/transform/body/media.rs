use std::sync::Arc;

use crate::app::resolve_data::ResolveData;
use crate::constants::orientation_aspect;
use crate::domain::body::{Crop, Video};
use crate::domain::{BodyElement, BodyElementKind};
use crate::error::Result;
use crate::response::{BodyFragment, BodyPayload, PicturePayload, Shots, VideoPayload};
use crate::transform::registry::Transformer;
use crate::transform::shots::{aspect_sizes, BODY_PICTURE_SIZES};
use crate::transform::RenderSettings;

use super::BodyRegistry;

/// Shots for an inline photo in the orientation's aspect ratio; `None` when the photo was not resolved.
fn picture_shots(
    settings: &RenderSettings,
    data: &ResolveData,
    photo_id: &str,
    orientation: &str,
    crop: Crop,
) -> Option<Shots> {
    let photo = data.photo_by_id.get(photo_id)?;
    let sizes = aspect_sizes(BODY_PICTURE_SIZES, orientation_aspect(orientation))?;
    let shots = settings.shots.shots(&photo.file, Some(crop), sizes);
    (!shots.is_empty()).then_some(shots)
}

pub struct PictureTransformer {
    settings: Arc<RenderSettings>,
}

impl PictureTransformer {
    pub fn new(settings: Arc<RenderSettings>) -> Self {
        Self { settings }
    }
}

impl Transformer<BodyElement, BodyFragment> for PictureTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::Picture]
    }

    fn transform(&self, element: &BodyElement, data: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::Picture(picture) = element else {
            return Err(registry.mismatch(element));
        };
        let payload = match picture_shots(&self.settings, data, &picture.id, &picture.orientation, picture.crop) {
            Some(shots) => {
                let caption = if picture.caption.is_empty() { &picture.alternate } else { &picture.caption };
                PicturePayload {
                    url: shots.first().cloned(),
                    shots: Some(shots),
                    caption: Some(caption.clone()),
                    alternate: Some(picture.alternate.clone()),
                    orientation: Some(picture.orientation.clone()),
                }
            }
            None => PicturePayload::default(),
        };
        Ok(Some(BodyFragment { kind: BodyElementKind::Picture, payload: BodyPayload::Picture(payload) }))
    }
}

pub struct PictureMembershipTransformer {
    settings: Arc<RenderSettings>,
}

impl PictureMembershipTransformer {
    pub fn new(settings: Arc<RenderSettings>) -> Self {
        Self { settings }
    }
}

impl Transformer<BodyElement, BodyFragment> for PictureMembershipTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::PictureMembership]
    }

    fn transform(&self, element: &BodyElement, data: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let BodyElement::PictureMembership(picture) = element else {
            return Err(registry.mismatch(element));
        };
        let payload = match picture_shots(&self.settings, data, &picture.id, &picture.orientation, picture.crop) {
            Some(shots) => PicturePayload {
                url: shots.first().cloned(),
                shots: Some(shots),
                orientation: Some(picture.orientation.clone()),
                ..PicturePayload::default()
            },
            None => PicturePayload::default(),
        };
        Ok(Some(BodyFragment { kind: BodyElementKind::PictureMembership, payload: BodyPayload::Picture(payload) }))
    }
}

/// Player embeds for native and YouTube videos.
pub struct VideoTransformer {
    settings: Arc<RenderSettings>,
}

impl VideoTransformer {
    pub fn new(settings: Arc<RenderSettings>) -> Self {
        Self { settings }
    }

    fn payload(&self, video: &Video, start: Option<u32>) -> VideoPayload {
        let mut player = format!(
            "{}/embed/video/{}/{}/{}/",
            self.settings.player_host, video.id, video.width, video.height
        );
        if let Some(start) = start {
            player.push_str(&format!("{}/", start));
        }
        VideoPayload {
            id: video.id.clone(),
            width: video.width,
            height: video.height,
            caption: video.caption.clone(),
            video: player,
            start,
        }
    }
}

impl Transformer<BodyElement, BodyFragment> for VideoTransformer {
    fn supports(&self) -> Vec<BodyElementKind> {
        vec![BodyElementKind::Video, BodyElementKind::VideoYoutube]
    }

    fn transform(&self, element: &BodyElement, _: &ResolveData, registry: &BodyRegistry) -> Result<Option<BodyFragment>> {
        let payload = match element {
            BodyElement::Video(video) => self.payload(video, None),
            BodyElement::VideoYoutube(video) => self.payload(video, Some(video.start)),
            _ => return Err(registry.mismatch(element)),
        };
        Ok(Some(BodyFragment { kind: element.kind(), payload: BodyPayload::Video(payload) }))
    }
}
