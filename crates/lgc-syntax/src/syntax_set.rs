use crate::SyntaxKind;

/// Compact set of `SyntaxKind`s, usable in `const` recovery tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: u64,
}

const _: () = assert!((SyntaxKind::TOMBSTONE as u16) < u64::BITS as u16);

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: 0 };

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut bits = 0;

        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u16;
            i += 1;
        }

        Self { bits }
    }

    pub const fn union(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.bits & (1 << kind as u16) != 0
    }
}
