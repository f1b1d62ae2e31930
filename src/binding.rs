//! Field-to-column binding.
//!
//! Runs once per model definition: resolves every validated field against the
//! persisted column registry under the model's naming rule, freezes the
//! resulting link table, and rejects ambiguous configurations loudly instead
//! of picking a winner.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::core::{BridgeError, Result};
use crate::schema::{FieldDef, FieldRegistry, TableDescriptor};

/// How a field name is matched to a column name when no explicit alias is
/// declared for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NamingRule {
    /// Fields and columns are independent; nothing is mirrored.
    #[default]
    Independent,
    /// Field `name` maps to column `<prefix>name` (e.g. prefix `_` maps
    /// field `id` to column `_id`).
    Prefix(String),
}

/// One frozen field-to-column correspondence.
#[derive(Debug, Clone)]
pub struct Link {
    pub field: String,
    pub column: String,
    /// True when the link came from an explicit alias rather than the
    /// naming rule.
    pub aliased: bool,
}

/// The frozen, class-level link table. Each field maps to at most one
/// column and each column is claimed by at most one field.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: BTreeMap<String, Link>,
}

impl LinkTable {
    pub fn get(&self, field: &str) -> Option<&Link> {
        self.links.get(field)
    }

    pub fn is_linked(&self, field: &str) -> bool {
        self.links.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Bound model metadata: the field registry, the column registry and the
/// link table between them. Built once at definition time, then shared
/// read-only (via `Arc`) by every entity of the model.
#[derive(Debug)]
pub struct ModelSchema {
    name: String,
    fields: FieldRegistry,
    table: TableDescriptor,
    links: LinkTable,
}

impl ModelSchema {
    /// Resolve and freeze the link table for a model definition.
    ///
    /// Explicit aliases take precedence over the naming rule and must name
    /// an existing column. A field with neither an alias nor a rule match
    /// stays unlinked, which is valid: the field simply is not persisted.
    /// Two fields resolving to the same column fail with
    /// [`BridgeError::BindingAmbiguity`].
    pub fn bind(
        name: impl Into<String>,
        fields: FieldRegistry,
        table: TableDescriptor,
        rule: NamingRule,
        aliases: BTreeMap<String, String>,
    ) -> Result<Arc<Self>> {
        let name = name.into();

        for field in aliases.keys() {
            if fields.get(field).is_none() {
                return Err(BridgeError::UnknownField(field.clone(), name));
            }
        }

        let mut links = BTreeMap::new();
        let mut claimed: BTreeMap<String, String> = BTreeMap::new();

        for field in fields.fields() {
            let link = match aliases.get(&field.name) {
                Some(column) => {
                    if !table.contains(column) {
                        return Err(BridgeError::UnknownColumn(
                            column.clone(),
                            table.name().to_string(),
                        ));
                    }
                    Some(Link {
                        field: field.name.clone(),
                        column: column.clone(),
                        aliased: true,
                    })
                }
                None => match &rule {
                    NamingRule::Independent => None,
                    NamingRule::Prefix(prefix) => {
                        let candidate = format!("{}{}", prefix, field.name);
                        table.contains(&candidate).then(|| Link {
                            field: field.name.clone(),
                            column: candidate,
                            aliased: false,
                        })
                    }
                },
            };

            let Some(link) = link else {
                debug!("model '{}': field '{}' has no column, left unlinked", name, field.name);
                continue;
            };

            if let Some(other) = claimed.get(&link.column) {
                return Err(BridgeError::BindingAmbiguity(format!(
                    "model '{}': fields '{}' and '{}' both resolve to column '{}'",
                    name, other, link.field, link.column
                )));
            }

            debug!(
                "model '{}': linked field '{}' to column '{}'{}",
                name,
                link.field,
                link.column,
                if link.aliased { " (alias)" } else { "" }
            );
            claimed.insert(link.column.clone(), link.field.clone());
            links.insert(link.field.clone(), link);
        }

        Ok(Arc::new(Self {
            name,
            fields,
            table,
            links: LinkTable { links },
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    pub fn field(&self, name: &str) -> Result<&FieldDef> {
        self.fields
            .get(name)
            .ok_or_else(|| BridgeError::UnknownField(name.to_string(), self.name.clone()))
    }

    pub fn is_linked(&self, field: &str) -> bool {
        self.links.is_linked(field)
    }

    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.links.get(field).map(|l| l.column.as_str())
    }

    /// The field linked to the table's primary-key column, if both exist.
    pub fn primary_key_field(&self) -> Option<&str> {
        let pk = self.table.primary_key()?;
        self.links
            .iter()
            .find(|l| l.column == pk.name)
            .map(|l| l.field.as_str())
    }
}
