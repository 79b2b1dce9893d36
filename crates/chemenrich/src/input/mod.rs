//! Table input/output.

mod parser;
mod source;

pub use parser::Parser;
pub use source::DataTable;
