//! Service layer between the HTTP handlers and the document store.
//! - `store` abstracts the collection (MongoDB or in-process).
//! - `animal_service` maps typed animal records onto stored documents.

pub mod animal_service;
pub mod errors;
pub mod store;
#[cfg(test)]
pub mod test_support;

pub use animal_service::AnimalService;
