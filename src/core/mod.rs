pub mod error;
pub mod value;

pub use error::{BridgeError, Result};
pub use value::{DataType, Value};
