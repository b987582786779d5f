use ombu_types::TypeTable;

use crate::code::CodeTable;

/// The metadata a running program provides to rebuild values: its declared
/// records and variants, and its native code entries.
#[derive(Debug, Default)]
pub struct Program {
    pub types: TypeTable,
    pub code: CodeTable,
}

impl Program {
    pub fn new(types: TypeTable, code: CodeTable) -> Self {
        Self { types, code }
    }
}
