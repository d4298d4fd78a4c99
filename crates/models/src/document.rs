//! Mapping between animal records and stored documents.
//!
//! Stored layout: `{ _id: ObjectId, kind: "cat" | "dog", name, <variant fields> }`.
//! The record-level `id` string is never written; it is derived from `_id` on read.

use bson::{oid::ObjectId, Document};

use crate::animal::{AnimalKind, AnimalRecord};
use crate::errors::ModelError;

pub const ID_FIELD: &str = "_id";
pub const KIND_FIELD: &str = "kind";
const RECORD_ID_FIELD: &str = "id";

/// Parse an API-level identifier into the store's native ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(id).map_err(|_| ModelError::InvalidIdentifier(id.to_string()))
}

pub fn kind_of(doc: &Document) -> Result<AnimalKind, ModelError> {
    let kind = doc
        .get_str(KIND_FIELD)
        .map_err(|_| ModelError::MissingField(KIND_FIELD))?;
    AnimalKind::parse(kind)
}

pub fn to_document<T: AnimalRecord>(record: &T) -> Result<Document, ModelError> {
    let mut doc = bson::to_document(record).map_err(|e| ModelError::Encode(e.to_string()))?;
    doc.remove(RECORD_ID_FIELD);
    if let Some(id) = record.id() {
        doc.insert(ID_FIELD, parse_object_id(id)?);
    }
    doc.insert(KIND_FIELD, T::KIND.as_str());
    Ok(doc)
}

pub fn from_document<T: AnimalRecord>(mut doc: Document) -> Result<T, ModelError> {
    let kind = kind_of(&doc)?;
    if kind != T::KIND {
        return Err(ModelError::KindMismatch {
            expected: T::KIND.as_str(),
            found: kind.to_string(),
        });
    }
    let id = doc
        .get_object_id(ID_FIELD)
        .map_err(|_| ModelError::MissingField(ID_FIELD))?;
    doc.remove(ID_FIELD);
    doc.remove(KIND_FIELD);
    doc.insert(RECORD_ID_FIELD, id.to_hex());
    bson::from_document(doc).map_err(|e| ModelError::Decode(e.to_string()))
}
