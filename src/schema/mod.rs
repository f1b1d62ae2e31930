pub mod column;
pub mod field;

pub use column::{ColumnDef, TableDescriptor};
pub use field::{FieldDef, FieldRegistry};
