#![cfg(test)]
use std::sync::Arc;

use models::{Animal, Cat, Dog};

use crate::{store::MemoryStore, AnimalService};

pub fn memory_service() -> (AnimalService, MemoryStore) {
    let store = MemoryStore::new();
    (AnimalService::new(Arc::new(store.clone())), store)
}

pub fn cats() -> Vec<Cat> {
    vec![
        Cat::new("Loki", true),
        Cat::new("Felix", false),
        Cat::new("Mario", true),
        Cat::new("Esper", true),
    ]
}

pub fn dogs() -> Vec<Dog> {
    vec![Dog::new("Thor", false, false), Dog::new("Vadem", false, false), Dog::new("Vork", false, false)]
}

pub fn mixed_pile() -> Vec<Animal> {
    cats()
        .into_iter()
        .map(Animal::from)
        .chain(dogs().into_iter().map(Animal::from))
        .collect()
}
