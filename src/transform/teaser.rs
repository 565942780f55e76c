use crate::app::resolve_data::{EditorialBundle, ResolveData};
use crate::constants::CLIPPING_ARTICLE_4_3;
use crate::response::{EditorialCard, Shots};

use super::shots::THUMBNAIL_SIZES;
use super::RenderSettings;

pub const RECOMMENDED_EDITORIAL_TYPE: &str = "recommendededitorial";

/// 4:3 thumbnail shots of a bundle's photo; empty when it has none.
fn thumbnail(bundle: &EditorialBundle, data: &ResolveData, settings: &RenderSettings) -> Shots {
    let Some(resolved) = data.bundle_multimedia(bundle) else {
        return Shots::new();
    };
    match resolved.photo() {
        Some(photo) => settings.shots.shots(
            &photo.file,
            resolved.multimedia.clipping(CLIPPING_ARTICLE_4_3),
            THUMBNAIL_SIZES,
        ),
        None => Shots::new(),
    }
}

pub fn editorial_card(
    bundle: &EditorialBundle,
    data: &ResolveData,
    settings: &RenderSettings,
    kind: Option<&'static str>,
) -> EditorialCard {
    let shots = thumbnail(bundle, data, settings);
    let photo = shots.first().cloned().unwrap_or_default();
    EditorialCard {
        kind,
        editorial_id: bundle.editorial.id.clone(),
        title: bundle.editorial.titles.title.clone(),
        signatures: bundle.signatures.clone(),
        editorial: settings.urls.editorial_url(&bundle.editorial, &bundle.section),
        shots,
        photo,
    }
}

/// Recommended editorials that resolved, in list order.
pub fn recommended_cards(data: &ResolveData, settings: &RenderSettings) -> Vec<EditorialCard> {
    data.recommended()
        .map(|bundle| editorial_card(bundle, data, settings, Some(RECOMMENDED_EDITORIAL_TYPE)))
        .collect()
}
