//! Printable "full member card" adhesion forms.
//!
//! Port of the host application's fullcard plugin: given the association
//! preferences and, optionally, one member profile, it renders a single
//! fixed-layout A4 page combining a membership declaration with checkboxes,
//! a pre-fillable personal-information form, an agreement sentence and a
//! signature block. Without a profile the same page prints as a blank
//! template.
//!
//! Rendering is deterministic: the same inputs always produce the same
//! bytes.

pub mod canvas;
pub mod card;
pub mod error;
pub mod i18n;
pub mod manifest;
pub mod member;
mod metrics;
pub mod preferences;

pub use canvas::{Align, Canvas, FontStyle, PdfSurface, Surface};
pub use card::FullCard;
pub use error::CardError;
pub use i18n::Catalog;
pub use manifest::{PluginManifest, MANIFEST};
pub use member::{Member, Title, STATUS_ACTIVE_MEMBER, STATUS_BENEFACTOR_MEMBER};
pub use preferences::Preferences;
