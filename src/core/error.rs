use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Binding ambiguity: {0}")]
    BindingAmbiguity(String),

    #[error("Field '{0}' not declared on model '{1}'")]
    UnknownField(String, String),

    #[error("Column '{0}' not found in table '{1}'")]
    UnknownColumn(String, String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Row {0} not found in table '{1}'")]
    RowNotFound(u64, String),

    #[error("Load sync failed for field '{field}': {source}")]
    LoadSync {
        field: String,
        #[source]
        source: Box<BridgeError>,
    },
}

impl BridgeError {
    /// True for failures caused by a value violating a field's declared
    /// constraints, whether raised at write time or during load sync.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::LoadSync { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
