//! Battlefield terrain.
//!
//! Each side fights on its own terrain for the whole match. The terrain
//! scales the ATK and DEF of that side's monsters by a percentage keyed on
//! the monster's attribute; the opponent's monsters are untouched.

pub mod modifier;

pub use modifier::{apply_percent, Terrain, TerrainModifier};
