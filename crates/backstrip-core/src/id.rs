//! Strongly-typed identifiers.

use std::fmt;

/// Position of a vertical column in the surface grid.
///
/// Columns are reconstructed independently; the id only travels with
/// inputs and results so callers can map them back onto their grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnId {
    /// Grid row.
    pub i: u32,
    /// Grid column.
    pub j: u32,
}

impl ColumnId {
    /// Create a column id from grid indices.
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// Row-major flat index for a grid with `cols` columns.
    pub fn flat(self, cols: u32) -> usize {
        self.i as usize * cols as usize + self.j as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

impl From<(u32, u32)> for ColumnId {
    fn from((i, j): (u32, u32)) -> Self {
        Self { i, j }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_is_row_major() {
        assert_eq!(ColumnId::new(0, 0).flat(5), 0);
        assert_eq!(ColumnId::new(0, 4).flat(5), 4);
        assert_eq!(ColumnId::new(2, 3).flat(5), 13);
    }

    #[test]
    fn display_and_from_tuple() {
        let id: ColumnId = (3, 9).into();
        assert_eq!(id, ColumnId::new(3, 9));
        assert_eq!(id.to_string(), "(3, 9)");
    }
}
