//! Per-instance state: the validated-field store, the persisted-column
//! store, and the write-time mirror that keeps them equal for every
//! linked field.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::binding::ModelSchema;
use crate::core::{BridgeError, Result, Value};

/// One model instance. Owns its raw-value store (validated side) and its
/// column store (persisted side); for every linked field the two hold the
/// same value at every observable point: after construction, after any
/// `set`, and after a load completes.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: Arc<ModelSchema>,
    fields: BTreeMap<String, Value>,
    columns: BTreeMap<String, Value>,
}

impl Entity {
    /// Construct with defaults only.
    pub fn new(schema: Arc<ModelSchema>) -> Result<Self> {
        Self::with_values(schema, BTreeMap::new())
    }

    /// Construct from partial input: provided values go through the normal
    /// setter, declared defaults fill the gaps, and every linked field is
    /// pushed into the column store once so the instance is immediately
    /// ready to persist.
    pub fn with_values(schema: Arc<ModelSchema>, values: BTreeMap<String, Value>) -> Result<Self> {
        let mut entity = Self {
            schema,
            fields: BTreeMap::new(),
            columns: BTreeMap::new(),
        };

        for (name, value) in values {
            entity.set(&name, value)?;
        }
        entity.apply_defaults()?;
        entity.push_fields_to_columns();
        Ok(entity)
    }

    /// The load hook: reconstruct an instance directly from a stored row,
    /// bypassing normal construction.
    ///
    /// Adopts the stored column map, then pushes every linked column's
    /// value back through the normal setter so coercion runs and both
    /// stores agree. Defaults are applied only for fields still missing
    /// afterward; stored values are never overwritten by default logic.
    /// A stored value failing coercion surfaces as [`BridgeError::LoadSync`].
    pub fn from_stored(
        schema: Arc<ModelSchema>,
        stored: BTreeMap<String, Value>,
    ) -> Result<Self> {
        let mut entity = Self {
            schema,
            fields: BTreeMap::new(),
            columns: stored,
        };

        let links: Vec<(String, String)> = entity
            .schema
            .links()
            .iter()
            .map(|l| (l.field.clone(), l.column.clone()))
            .collect();
        for (field, column) in links {
            let value = entity.columns.get(&column).cloned().unwrap_or(Value::Null);
            entity.set(&field, value).map_err(|e| BridgeError::LoadSync {
                field: field.clone(),
                source: Box::new(e),
            })?;
        }

        entity.apply_defaults()?;
        Ok(entity)
    }

    /// The field mirror. Validates and coerces first (a failure propagates
    /// before either store mutates), writes the field store, then writes
    /// the same value into the linked column slot. Unlinked fields are a
    /// pure pass-through.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let coerced = self.schema.field(field)?.check(value.into())?;
        if let Some(column) = self.schema.column_for(field) {
            self.columns.insert(column.to_string(), coerced.clone());
        }
        self.fields.insert(field.to_string(), coerced);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Read a slot of the persisted store directly.
    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    /// Snapshot of the persisted store, as read by a store at save time.
    pub fn columns(&self) -> &BTreeMap<String, Value> {
        &self.columns
    }

    /// Whether a field has a persisted counterpart. Unlinked fields are
    /// valid, they simply are not persisted.
    pub fn is_linked(&self, field: &str) -> bool {
        self.schema.is_linked(field)
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Check that every required field holds a non-null value. Types are
    /// already guaranteed by the setter.
    pub fn validate(&self) -> Result<()> {
        for def in self.schema.fields().fields() {
            if !def.required {
                continue;
            }
            match self.fields.get(&def.name) {
                Some(v) if !v.is_null() => {}
                _ => {
                    return Err(BridgeError::Validation(format!(
                        "field '{}' is required and cannot be NULL",
                        def.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Plain field-name to value mapping; unset fields serialize as `Null`.
    pub fn serialize(&self) -> BTreeMap<String, Value> {
        self.schema
            .fields()
            .names()
            .map(|name| {
                let value = self.fields.get(name).cloned().unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.serialize())
            .map_err(|e| BridgeError::Validation(format!("serialization failed: {}", e)))
    }

    /// Build an instance from a serialized mapping. Every value passes
    /// through the normal setter, so this is `with_values` by another name.
    pub fn deserialize(
        schema: Arc<ModelSchema>,
        values: BTreeMap<String, Value>,
    ) -> Result<Self> {
        Self::with_values(schema, values)
    }

    /// Point a foreign-key field at another entity: resolves the target's
    /// primary-key field and assigns it through the normal setter, so the
    /// FK column mirrors without the caller touching the field directly.
    pub fn set_reference(&mut self, fk_field: &str, target: &Entity) -> Result<()> {
        let pk_field = target.schema.primary_key_field().ok_or_else(|| {
            BridgeError::Validation(format!(
                "model '{}' has no linked primary-key field to reference",
                target.schema.name()
            ))
        })?;
        let value = target.get(pk_field).cloned().unwrap_or(Value::Null);
        self.set(fk_field, value)
    }

    fn apply_defaults(&mut self) -> Result<()> {
        let defaults: Vec<(String, Value)> = self
            .schema
            .fields()
            .fields()
            .iter()
            .filter(|def| !self.fields.contains_key(&def.name))
            .filter_map(|def| def.default.clone().map(|v| (def.name.clone(), v)))
            .collect();
        for (name, value) in defaults {
            self.set(&name, value)?;
        }
        Ok(())
    }

    fn push_fields_to_columns(&mut self) {
        let links: Vec<(String, String)> = self
            .schema
            .links()
            .iter()
            .map(|l| (l.field.clone(), l.column.clone()))
            .collect();
        for (field, column) in links {
            let value = self.fields.get(&field).cloned().unwrap_or(Value::Null);
            self.columns.insert(column, value);
        }
    }
}
