use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::debug;

use crate::binding::ModelSchema;
use crate::core::{BridgeError, Result, Value};
use crate::entity::Entity;

#[derive(Debug, Default)]
struct StoredTable {
    rows: BTreeMap<u64, BTreeMap<String, Value>>,
    next_row_id: u64,
}

/// Synchronous in-memory row store. It reads an entity's column store only
/// at save time and hands stored rows back through the load hook, so it is
/// the minimal persistence collaborator the sync layer needs: column writes
/// between saves go unobserved, reconstruction is distinct from normal
/// construction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, StoredTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the entity's persisted column values into a new row and
    /// return its id. The table is created on first save.
    pub fn save(&mut self, entity: &Entity) -> u64 {
        let table_name = entity.schema().table().name().to_string();
        let table = self.tables.entry(table_name.clone()).or_default();

        let id = table.next_row_id;
        table.next_row_id += 1;
        table.rows.insert(id, entity.columns().clone());
        debug!("saved row {} into table '{}'", id, table_name);
        id
    }

    /// Reconstruct an entity from a stored row via the load hook.
    pub fn load(&self, schema: Arc<ModelSchema>, row_id: u64) -> Result<Entity> {
        let table_name = schema.table().name();
        let table = self
            .tables
            .get(table_name)
            .ok_or_else(|| BridgeError::TableNotFound(table_name.to_string()))?;
        let stored = table
            .rows
            .get(&row_id)
            .ok_or_else(|| BridgeError::RowNotFound(row_id, table_name.to_string()))?;
        debug!("loading row {} from table '{}'", row_id, table_name);
        Entity::from_stored(schema, stored.clone())
    }

    /// Reconstruct every stored row of a model, in row-id order.
    pub fn load_all(&self, schema: Arc<ModelSchema>) -> Result<Vec<Entity>> {
        let table_name = schema.table().name();
        let table = self
            .tables
            .get(table_name)
            .ok_or_else(|| BridgeError::TableNotFound(table_name.to_string()))?;
        table
            .rows
            .values()
            .map(|stored| Entity::from_stored(schema.clone(), stored.clone()))
            .collect()
    }

    pub fn row_count(&self, table_name: &str) -> usize {
        self.tables.get(table_name).map_or(0, |t| t.rows.len())
    }
}
