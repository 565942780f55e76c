//! Entities as the backend services return them. Read-only for the aggregator.

pub mod body;
pub mod editorial;
pub mod journalist;
pub mod multimedia;
pub mod section;
pub mod tag;

pub use body::{Body, BodyElement, BodyElementKind, Crop};
pub use editorial::{Editorial, EditorialKind, MultimediaRef, Titles};
pub use journalist::{Alias, Department, Journalist};
pub use multimedia::{Clipping, Multimedia, Photo, Widget};
pub use section::Section;
pub use tag::Tag;
