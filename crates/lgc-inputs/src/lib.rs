//! Salsa inputs shared by every layer: a file is a path plus the current
//! text. Setting a new text revision invalidates the queries derived from
//! it; nothing else about a file ever changes in place.

pub use line_index::LineIndex;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}
