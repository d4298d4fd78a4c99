use std::fmt;

use bson::Document;
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Deserializer, Serialize,
};

use crate::{document, errors::ModelError};

/// Discriminator stored on every document in the shared collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Cat,
    Dog,
}

impl AnimalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnimalKind::Cat => "cat",
            AnimalKind::Dog => "dog",
        }
    }

    /// Collection path segment used in routes and `Location` headers.
    pub fn plural(self) -> &'static str {
        match self {
            AnimalKind::Cat => "cats",
            AnimalKind::Dog => "dogs",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s {
            "cat" => Ok(AnimalKind::Cat),
            "dog" => Ok(AnimalKind::Dog),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every animal carries. `id` stays `None` until the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalBase {
    #[serde(default, deserialize_with = "string_id_or_none", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Non-string ids (numbers, objects) are dropped rather than rejected; the
/// store assigns ids anyway.
fn string_id_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(id)) => Some(id),
        Some(RawId::Other(_)) | None => None,
    })
}

impl AnimalBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    #[serde(flatten)]
    pub base: AnimalBase,
    #[serde(default)]
    pub hisses: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    #[serde(flatten)]
    pub base: AnimalBase,
    #[serde(default)]
    pub barks: bool,
    #[serde(default)]
    pub potty_trained: bool,
}

impl Cat {
    pub fn new(name: impl Into<String>, hisses: bool) -> Self {
        Self { base: AnimalBase::named(name), hisses }
    }
}

impl Dog {
    pub fn new(name: impl Into<String>, barks: bool, potty_trained: bool) -> Self {
        Self { base: AnimalBase::named(name), barks, potty_trained }
    }
}

/// A concrete animal shape that can be stored in and read back from the
/// shared collection.
pub trait AnimalRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: AnimalKind;

    fn base(&self) -> &AnimalBase;
    fn base_mut(&mut self) -> &mut AnimalBase;

    fn id(&self) -> Option<&str> {
        self.base().id.as_deref()
    }

    /// Route of the single-resource endpoint, once an id has been assigned.
    fn location(&self) -> Option<String> {
        self.id().map(|id| format!("/{}/{}", Self::KIND.plural(), id))
    }
}

impl AnimalRecord for Cat {
    const KIND: AnimalKind = AnimalKind::Cat;

    fn base(&self) -> &AnimalBase { &self.base }
    fn base_mut(&mut self) -> &mut AnimalBase { &mut self.base }
}

impl AnimalRecord for Dog {
    const KIND: AnimalKind = AnimalKind::Dog;

    fn base(&self) -> &AnimalBase { &self.base }
    fn base_mut(&mut self) -> &mut AnimalBase { &mut self.base }
}

/// Any animal, used where shapes are mixed (batch inserts, untyped reads).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animal {
    Cat(Cat),
    Dog(Dog),
}

impl Animal {
    pub fn base(&self) -> &AnimalBase {
        match self {
            Animal::Cat(c) => &c.base,
            Animal::Dog(d) => &d.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut AnimalBase {
        match self {
            Animal::Cat(c) => &mut c.base,
            Animal::Dog(d) => &mut d.base,
        }
    }

    pub fn to_document(&self) -> Result<Document, ModelError> {
        match self {
            Animal::Cat(c) => document::to_document(c),
            Animal::Dog(d) => document::to_document(d),
        }
    }
}

impl From<Cat> for Animal {
    fn from(c: Cat) -> Self { Animal::Cat(c) }
}

impl From<Dog> for Animal {
    fn from(d: Dog) -> Self { Animal::Dog(d) }
}
