mod catalog;
mod character;
mod ficha;

pub use catalog::{Catalog, CatalogEntry};
pub use character::{DetailRecord, DetailShapeError, resource_name};
pub use ficha::{CharacterSnapshot, SavedFicha, ficha_schema};
