/// Site, editorial-type and image-clipping constants shared across the crate

// Site ids as stored on sections
pub const SITE_ELCONFIDENCIAL: &str = "1";
pub const SITE_VANITATIS: &str = "2";
pub const SITE_ALIMENTE: &str = "5";

/// Hostname (without subdomain or extension) for a site id.
pub fn site_hostname(site_id: &str) -> &'static str {
    match site_id {
        SITE_VANITATIS => "vanitatis.elconfidencial",
        SITE_ALIMENTE => "alimente.elconfidencial",
        _ => "elconfidencial",
    }
}

/// Site encoding sent to the membership rewriter.
pub fn site_encoding(site_id: &str) -> &'static str {
    match site_id {
        SITE_VANITATIS => "vanitatis",
        SITE_ALIMENTE => "alimente",
        _ => "el-confidencial",
    }
}

/// Closing-mode name for a closing-mode id; unknown ids map to "".
pub fn closing_mode_name(id: &str) -> &'static str {
    match id {
        "1" => "registry",
        "2" => "payment",
        "3" => "apppayment",
        _ => "",
    }
}

// Clipping names stored on photo multimedia
pub const CLIPPING_MULTIMEDIA_BIG: &str = "size_multimedia_big";
pub const CLIPPING_ARTICLE_4_3: &str = "size_article_4_3";

// Aspect ratio keys used in shot maps
pub const ASPECT_16_9: &str = "16:9";
pub const ASPECT_4_3: &str = "4:3";
pub const ASPECT_3_4: &str = "3:4";
pub const ASPECT_1_1: &str = "1:1";
pub const ASPECT_3_2: &str = "3:2";
pub const ASPECT_2_3: &str = "2:3";

// Body image orientations
pub const ORIENTATION_LANDSCAPE: &str = "landscape";
pub const ORIENTATION_PORTRAIT: &str = "portrait";
pub const ORIENTATION_SQUARE: &str = "square";
pub const ORIENTATION_LANDSCAPE_3_2: &str = "landscape_3_2";
pub const ORIENTATION_PORTRAIT_2_3: &str = "portrait_2_3";

/// Aspect ratio key for a picture orientation; unknown orientations render as 16:9.
pub fn orientation_aspect(orientation: &str) -> &'static str {
    match orientation {
        ORIENTATION_LANDSCAPE => ASPECT_4_3,
        ORIENTATION_PORTRAIT => ASPECT_3_4,
        ORIENTATION_SQUARE => ASPECT_1_1,
        ORIENTATION_LANDSCAPE_3_2 => ASPECT_3_2,
        ORIENTATION_PORTRAIT_2_3 => ASPECT_2_3,
        _ => ASPECT_16_9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_site_defaults_to_elconfidencial() {
        assert_eq!(site_hostname("99"), "elconfidencial");
        assert_eq!(site_encoding("99"), "el-confidencial");
        assert_eq!(site_hostname(SITE_VANITATIS), "vanitatis.elconfidencial");
        assert_eq!(site_encoding(SITE_ALIMENTE), "alimente");
    }

    #[test]
    fn test_closing_modes() {
        assert_eq!(closing_mode_name("2"), "payment");
        assert_eq!(closing_mode_name("7"), "");
    }

    #[test]
    fn test_orientation_aspect() {
        assert_eq!(orientation_aspect("portrait"), ASPECT_3_4);
        assert_eq!(orientation_aspect("whatever"), ASPECT_16_9);
    }
}
