use crate::core::{BridgeError, DataType, Result, Value};

/// A validated field declaration: name, declared type, required flag and an
/// optional default applied at construction time.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate a candidate value and return the coerced value to store.
    /// Required fields reject `Null`; everything else defers to the type.
    pub fn check(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            if self.required {
                return Err(BridgeError::Validation(format!(
                    "field '{}' is required and cannot be NULL",
                    self.name
                )));
            }
            return Ok(Value::Null);
        }

        self.data_type.coerce(value).map_err(|e| match e {
            BridgeError::Validation(msg) => {
                BridgeError::Validation(format!("field '{}': {}", self.name, msg))
            }
            other => other,
        })
    }
}

/// Class-level registry of validated fields, in declaration order.
/// Populated by explicit registration at model-definition time.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_rejects_null() {
        let field = FieldDef::new("name", DataType::Text).required();
        assert!(field.check(Value::Null).unwrap_err().is_validation());
    }

    #[test]
    fn test_optional_field_accepts_null() {
        let field = FieldDef::new("name", DataType::Text);
        assert_eq!(field.check(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_check_reports_field_name() {
        let field = FieldDef::new("age", DataType::Integer);
        let err = field.check(Value::Text("x".into())).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = FieldRegistry::new(vec![
            FieldDef::new("id", DataType::Integer).with_default(1),
            FieldDef::new("name", DataType::Text),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("id").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["id", "name"]);
    }
}
