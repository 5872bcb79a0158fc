//! Flattening and rendering engine
//!
//! Turns a tag set into a bounded list of colored chips, either one chip per
//! tag ([`RenderMode::Grouped`]) or one per scalar value
//! ([`RenderMode::Exploded`]). Pure and infallible.

mod chip;
mod flatten;

pub use chip::{Chip, ChipKind, ChipLimit, ChipSummary, RenderMode, RenderOptions};
pub use flatten::{detail, render, sort_tags};
