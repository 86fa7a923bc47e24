//! Top level database tying the salsa layers together, plus the query
//! drivers use to obtain a file's diagnostics.

pub use lgc_errors::Diagnostic;
pub use lgc_inputs::File;
pub use lgc_parse::FileParse;
use salsa::Database;

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl Database for RootDatabase {}

/// Syntax diagnostics of `file`, in source order. Memoized per text
/// revision; checking an unchanged file costs a lookup.
#[salsa::tracked(returns(ref), no_eq)]
pub fn check_file(db: &dyn Database, file: File) -> Vec<Diagnostic> {
    file.parse(db).diagnostics().to_owned()
}
