//! Resource records for the animal API and their mapping onto stored documents.
//!
//! `Cat` and `Dog` share an [`animal::AnimalBase`] payload and live in one
//! collection; each stored document carries a `kind` tag so the two shapes
//! never bleed into each other's listings.

pub mod animal;
pub mod document;
pub mod errors;

pub use animal::{Animal, AnimalBase, AnimalKind, AnimalRecord, Cat, Dog};
