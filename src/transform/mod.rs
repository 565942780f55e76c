//! Pure transformation of resolved entities into response fragments. No I/O happens here.

pub mod body;
pub mod editorial;
pub mod media;
pub mod registry;
pub mod shots;
pub mod signature;
pub mod teaser;
pub mod thumbor;
pub mod url;

use crate::config::Config;

use self::shots::ShotGenerator;
use self::thumbor::Thumbor;
use self::url::UrlGenerator;

/// Site-level rendering settings shared by every transformer.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub urls: UrlGenerator,
    pub shots: ShotGenerator,
    pub player_host: String,
}

impl RenderSettings {
    pub fn new(urls: UrlGenerator, thumbor: Thumbor, player_host: impl Into<String>) -> Self {
        Self {
            urls,
            shots: ShotGenerator::new(thumbor),
            player_host: player_host.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            UrlGenerator::new(config.site.extension.clone()),
            Thumbor::new(
                config.thumbor.server_url.clone(),
                config.thumbor.secret.clone(),
                config.thumbor.bucket.clone(),
            ),
            config.site.player_host.clone(),
        )
    }

    pub fn thumbor(&self) -> &Thumbor {
        self.shots.thumbor()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::Section;

    pub fn settings() -> RenderSettings {
        RenderSettings::new(
            UrlGenerator::new("com"),
            Thumbor::new("https://images.local", "", "bucket"),
            "https://player.local",
        )
    }

    pub fn section() -> Section {
        Section {
            id: "s1".into(),
            name: "España".into(),
            site_id: "1".into(),
            path: "espana".into(),
            encode_name: "espana".into(),
            is_subdomain_blog: false,
            parent: None,
        }
    }
}
