use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use regex::Regex;
use sha1::Sha1;

use crate::domain::Crop;

const DEFAULT_EXTENSION: &str = "jpg";

static FILE_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*\.(?P<extension>[^.]+)$").expect("valid regex"));

/// Builds signed image-transform URLs for files stored in the image bucket.
#[derive(Debug, Clone)]
pub struct Thumbor {
    server_url: String,
    secret: String,
    bucket: String,
}

impl Thumbor {
    pub fn new(server_url: impl Into<String>, secret: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            secret: secret.into(),
            bucket: bucket.into(),
        }
    }

    /// Untransformed journalist portrait.
    pub fn journalist_image(&self, file: &str) -> String {
        self.url(&self.storage_path(file, "journalist"))
    }

    /// Crop `crop` out of the original, resize to `width`x`height`, pad with white.
    pub fn crop(&self, file: &str, width: u32, height: u32, crop: Crop) -> String {
        let extension = FILE_EXTENSION
            .captures(file)
            .and_then(|c| c.name("extension"))
            .map(|m| m.as_str())
            .unwrap_or(DEFAULT_EXTENSION);

        let operations = format!(
            "{}x{}:{}x{}/{}x{}/filters:fill(white):format({})/{}",
            crop.top_x,
            crop.top_y,
            crop.bottom_x,
            crop.bottom_y,
            width,
            height,
            extension,
            self.storage_path(file, "original"),
        );
        self.url(&operations)
    }

    /// `{bucket}/{directory}/abc/def/ghi/{file}` from the first nine characters of the file name.
    fn storage_path(&self, file: &str, directory: &str) -> String {
        let shard = |from: usize| file.chars().skip(from).take(3).collect::<String>();
        format!("{}/{}/{}/{}/{}/{}", self.bucket, directory, shard(0), shard(3), shard(6), file)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.server_url, self.signature(path), path)
    }

    /// Thumbor URL signature: HMAC-SHA1 of the path keyed by the secret, URL-safe base64.
    fn signature(&self, path: &str) -> String {
        if self.secret.is_empty() {
            return "unsafe".to_string();
        }
        let Ok(mut mac) = Hmac::<Sha1>::new_from_slice(self.secret.as_bytes()) else {
            return "unsafe".to_string();
        };
        mac.update(path.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}
