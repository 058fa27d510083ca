//! Domain entities - Objects with identity

mod guide;

pub use guide::{GuideDomain, GuideKind, GuideProfile};
