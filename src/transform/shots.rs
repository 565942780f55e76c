use crate::constants::{ASPECT_16_9, ASPECT_1_1, ASPECT_2_3, ASPECT_3_2, ASPECT_3_4, ASPECT_4_3};
use crate::domain::Crop;
use crate::response::{OrderedMap, Shots};

use super::thumbor::Thumbor;

/// One rendition: breakpoint label and target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(label: &'static str, width: u32, height: u32) -> Self {
        Self { label, width, height }
    }
}

/// Renditions of one aspect ratio, in output order.
#[derive(Debug, Clone, Copy)]
pub struct AspectSizes {
    pub aspect: &'static str,
    pub sizes: &'static [Size],
}

const BODY_16_9: &[Size] = &[
    Size::new("1440w", 1440, 810),
    Size::new("1200w", 1200, 675),
    Size::new("996w", 996, 560),
    Size::new("640w", 640, 360),
    Size::new("390w", 390, 219),
    Size::new("568w", 568, 320),
    Size::new("382w", 382, 215),
    Size::new("328w", 328, 185),
];

const BODY_3_4: &[Size] = &[
    Size::new("1440w", 1440, 1920),
    Size::new("1200w", 1200, 1600),
    Size::new("996w", 996, 1328),
    Size::new("560w", 560, 747),
    Size::new("390w", 390, 520),
    Size::new("568w", 568, 757),
    Size::new("382w", 382, 509),
    Size::new("328w", 328, 437),
];

const BODY_1_1: &[Size] = &[
    Size::new("1440w", 1440, 1440),
    Size::new("1200w", 1200, 1200),
    Size::new("996w", 996, 996),
    Size::new("560w", 560, 560),
    Size::new("390w", 390, 390),
    Size::new("568w", 568, 568),
    Size::new("382w", 382, 382),
    Size::new("328w", 328, 328),
];

const BODY_4_3: &[Size] = &[
    Size::new("1440w", 1440, 1080),
    Size::new("1200w", 1200, 900),
    Size::new("996w", 996, 747),
    Size::new("560w", 560, 420),
    Size::new("390w", 390, 292),
    Size::new("568w", 568, 426),
    Size::new("382w", 382, 286),
    Size::new("328w", 328, 246),
];

const BODY_3_2: &[Size] = &[
    Size::new("1440w", 1440, 960),
    Size::new("1200w", 1200, 800),
    Size::new("996w", 996, 664),
    Size::new("640w", 640, 427),
    Size::new("390w", 390, 260),
    Size::new("568w", 568, 379),
    Size::new("382w", 382, 254),
    Size::new("328w", 328, 219),
];

const BODY_2_3: &[Size] = &[
    Size::new("1440w", 1440, 2160),
    Size::new("1200w", 1200, 1800),
    Size::new("996w", 996, 1494),
    Size::new("560w", 560, 840),
    Size::new("390w", 390, 585),
    Size::new("568w", 568, 852),
    Size::new("382w", 382, 573),
    Size::new("328w", 328, 492),
];

/// Inline body pictures; the picture orientation selects one entry.
pub const BODY_PICTURE_SIZES: &[AspectSizes] = &[
    AspectSizes { aspect: ASPECT_16_9, sizes: BODY_16_9 },
    AspectSizes { aspect: ASPECT_3_4, sizes: BODY_3_4 },
    AspectSizes { aspect: ASPECT_1_1, sizes: BODY_1_1 },
    AspectSizes { aspect: ASPECT_4_3, sizes: BODY_4_3 },
    AspectSizes { aspect: ASPECT_3_2, sizes: BODY_3_2 },
    AspectSizes { aspect: ASPECT_2_3, sizes: BODY_2_3 },
];

const OPENING_4_3: &[Size] = &[
    Size::new("1440w", 1440, 1080),
    Size::new("1200w", 1200, 900),
    Size::new("996w", 996, 747),
    Size::new("557w", 557, 418),
    Size::new("381w", 381, 286),
    Size::new("600w", 600, 450),
    Size::new("414w", 414, 311),
    Size::new("375w", 375, 281),
    Size::new("360w", 360, 270),
    Size::new("767w", 767, 575),
];

const OPENING_16_9: &[Size] = &[
    Size::new("1440w", 1440, 810),
    Size::new("1200w", 1200, 675),
    Size::new("972w", 972, 547),
    Size::new("720w", 720, 405),
    Size::new("600w", 600, 338),
    Size::new("414w", 414, 233),
    Size::new("375w", 375, 211),
    Size::new("360w", 360, 203),
];

const OPENING_3_4: &[Size] = &[
    Size::new("1440w", 1440, 1920),
    Size::new("1200w", 1200, 1600),
    Size::new("996w", 996, 1328),
    Size::new("391w", 391, 521),
    Size::new("300w", 300, 400),
    Size::new("600w", 600, 800),
    Size::new("414w", 414, 552),
    Size::new("375w", 375, 500),
    Size::new("360w", 360, 480),
];

const OPENING_3_2: &[Size] = &[
    Size::new("1440w", 1440, 960),
    Size::new("1200w", 1200, 800),
    Size::new("996w", 996, 664),
    Size::new("557w", 557, 371),
    Size::new("381w", 381, 254),
    Size::new("600w", 600, 400),
    Size::new("414w", 414, 276),
    Size::new("375w", 375, 250),
    Size::new("360w", 360, 240),
    Size::new("767w", 767, 511),
    Size::new("lo-res", 48, 32),
];

const OPENING_2_3: &[Size] = &[
    Size::new("1440w", 1440, 2160),
    Size::new("1200w", 1200, 1800),
    Size::new("996w", 996, 1494),
    Size::new("557w", 557, 835),
    Size::new("381w", 381, 571),
    Size::new("600w", 600, 900),
    Size::new("414w", 414, 621),
    Size::new("375w", 375, 562),
    Size::new("360w", 360, 540),
    Size::new("767w", 767, 1150),
    Size::new("lo-res", 48, 72),
];

/// Opening photos render every aspect ratio.
pub const OPENING_SIZES: &[AspectSizes] = &[
    AspectSizes { aspect: ASPECT_4_3, sizes: OPENING_4_3 },
    AspectSizes { aspect: ASPECT_16_9, sizes: OPENING_16_9 },
    AspectSizes { aspect: ASPECT_3_4, sizes: OPENING_3_4 },
    AspectSizes { aspect: ASPECT_3_2, sizes: OPENING_3_2 },
    AspectSizes { aspect: ASPECT_2_3, sizes: OPENING_2_3 },
];

/// Inline editorial photos render the three main aspect ratios only.
pub const INLINE_SIZES: &[AspectSizes] = &[
    AspectSizes { aspect: ASPECT_4_3, sizes: OPENING_4_3 },
    AspectSizes { aspect: ASPECT_16_9, sizes: OPENING_16_9 },
    AspectSizes { aspect: ASPECT_3_4, sizes: OPENING_3_4 },
];

/// Teaser thumbnails of inserted news and recommended editorials.
pub const THUMBNAIL_SIZES: AspectSizes = AspectSizes {
    aspect: ASPECT_4_3,
    sizes: &[
        Size::new("202w", 202, 152),
        Size::new("144w", 144, 108),
        Size::new("128w", 128, 96),
    ],
};

pub fn aspect_sizes(table: &[AspectSizes], aspect: &str) -> Option<AspectSizes> {
    table.iter().find(|a| a.aspect == aspect).copied()
}

/// Shot maps for one file and crop rectangle.
#[derive(Debug, Clone)]
pub struct ShotGenerator {
    thumbor: Thumbor,
}

impl ShotGenerator {
    pub fn new(thumbor: Thumbor) -> Self {
        Self { thumbor }
    }

    pub fn thumbor(&self) -> &Thumbor {
        &self.thumbor
    }

    /// Label -> URL for one aspect ratio; empty when the crop is missing or has no area.
    pub fn shots(&self, file: &str, crop: Option<Crop>, sizes: AspectSizes) -> Shots {
        let mut shots = OrderedMap::new();
        let crop = match crop {
            Some(crop) if !crop.is_empty() => crop,
            _ => return shots,
        };
        for size in sizes.sizes {
            shots.insert(size.label, self.thumbor.crop(file, size.width, size.height, crop));
        }
        shots
    }

    /// Aspect ratio -> shots for every entry of `table`; empty when the crop is unusable.
    pub fn shot_set(&self, file: &str, crop: Option<Crop>, table: &[AspectSizes]) -> OrderedMap<Shots> {
        let mut set = OrderedMap::new();
        if !crop.map(|c| !c.is_empty()).unwrap_or(false) {
            return set;
        }
        for sizes in table {
            set.insert(sizes.aspect, self.shots(file, crop, *sizes));
        }
        set
    }

    /// First URL of the given aspect ratio, or "" when absent.
    pub fn canonical(set: &OrderedMap<Shots>, aspect: &str) -> String {
        set.get(aspect).and_then(|shots| shots.first()).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> ShotGenerator {
        ShotGenerator::new(Thumbor::new("https://images.local", "", "bucket"))
    }

    fn crop() -> Crop {
        Crop { top_x: 0, top_y: 0, bottom_x: 1600, bottom_y: 900 }
    }

    #[test]
    fn test_tables_have_expected_aspects() {
        let aspects: Vec<&str> = OPENING_SIZES.iter().map(|a| a.aspect).collect();
        assert_eq!(aspects, vec!["4:3", "16:9", "3:4", "3:2", "2:3"]);
        assert_eq!(BODY_PICTURE_SIZES.len(), 6);
        assert_eq!(aspect_sizes(OPENING_SIZES, "3:2").unwrap().sizes.last().unwrap().label, "lo-res");
    }

    #[test]
    fn test_shot_set_and_canonical_photo() {
        let set = generator().shot_set("abcdefghij.jpg", Some(crop()), INLINE_SIZES);
        assert_eq!(set.len(), 3);
        let canonical = ShotGenerator::canonical(&set, ASPECT_16_9);
        assert!(canonical.contains("/1440x810/"));
        assert_eq!(set.get(ASPECT_4_3).unwrap().len(), 10);
    }

    #[test]
    fn test_zero_area_crop_yields_empty_shots() {
        let flat = Crop { top_x: 10, top_y: 10, bottom_x: 10, bottom_y: 900 };
        let set = generator().shot_set("abcdefghij.jpg", Some(flat), OPENING_SIZES);
        assert!(set.is_empty());
        assert_eq!(ShotGenerator::canonical(&set, ASPECT_16_9), "");

        let shots = generator().shots("abcdefghij.jpg", None, THUMBNAIL_SIZES);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_thumbnail_labels() {
        let shots = generator().shots("abcdefghij.jpg", Some(crop()), THUMBNAIL_SIZES);
        let labels: Vec<&str> = shots.keys().collect();
        assert_eq!(labels, vec!["202w", "144w", "128w"]);
    }
}
