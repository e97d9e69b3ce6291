//! MongoDB-protocol backend for the document store traits.
//!
//! Works against MongoDB itself and against services speaking its wire
//! protocol (for example Cosmos DB's API for MongoDB). Documents are
//! upserted with `replace_one(..).upsert(true)` filtered on
//! `{ id, partitionKey }`.

mod convert;
mod error;
mod store;

pub use convert::{document_filter, to_bson_document};
pub use error::classify;
pub use store::{MongoContainer, MongoCredential, MongoDocumentStore};
