//! Shared types for the MTG cataloguer
//!
//! Card reference records, the identity-keyed reference index and the
//! "freshness line + JSON" file format produced by the reference refresh.

pub mod card;
pub mod de;
pub mod error;
pub mod reference;

pub use card::{CardKey, CardRecord, Language, FACE_SEPARATOR};
pub use error::{Error, Result};
pub use reference::{ReferenceIndex, SharedReferenceIndex};
