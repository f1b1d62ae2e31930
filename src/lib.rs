// ============================================================================
// SchemaBridge Library
// ============================================================================

//! Keeps a validation/serialization model and a relational persistence model
//! synchronized for the same instance.
//!
//! A model is defined once: a [`FieldRegistry`] of validated fields, a
//! [`TableDescriptor`] of persisted columns, and a [`NamingRule`] (or
//! explicit aliases) that [`ModelSchema::bind`] resolves into a frozen link
//! table. Every [`Entity`] of that model then owns two stores; writes to a
//! linked field mirror into the column store, and loading a stored row
//! pushes column values back through the field setters.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use schemabridge::{
//!     ColumnDef, DataType, Entity, FieldDef, FieldRegistry, ModelSchema,
//!     NamingRule, TableDescriptor, Value,
//! };
//!
//! # fn main() -> schemabridge::Result<()> {
//! let schema = ModelSchema::bind(
//!     "Company",
//!     FieldRegistry::new(vec![
//!         FieldDef::new("id", DataType::Integer).with_default(1),
//!         FieldDef::new("name", DataType::Text),
//!     ]),
//!     TableDescriptor::new(
//!         "company",
//!         vec![
//!             ColumnDef::new("_id", DataType::Integer).primary_key(),
//!             ColumnDef::new("_name", DataType::Text),
//!         ],
//!     )?,
//!     NamingRule::Prefix("_".into()),
//!     BTreeMap::new(),
//! )?;
//!
//! let mut company = Entity::new(schema)?;
//! company.set("name", "nKey")?;
//! assert_eq!(company.column("_name"), Some(&Value::Text("nKey".into())));
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod core;
pub mod entity;
pub mod schema;
pub mod storage;

// Re-export main types for convenience
pub use binding::{Link, LinkTable, ModelSchema, NamingRule};
pub use core::{BridgeError, DataType, Result, Value};
pub use entity::Entity;
pub use schema::{ColumnDef, FieldDef, FieldRegistry, TableDescriptor};
pub use storage::MemoryStore;
