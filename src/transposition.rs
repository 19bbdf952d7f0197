//! TranspositionBox: keyed columnar transposition under uneven geometry.
//!
//! A message of `total` symbols is laid row-major into a grid of
//! `columns` columns. The last row may be partial, so the first
//! `total % columns` columns ("long columns") hold one row more than the
//! others. Encryption permutes the columns by the key order and reads the
//! grid out column by column; decryption refills the columns in read-out
//! order and reads the grid back row by row.
//!
//! ```text
//! total = 17, columns = 5, height = 4, long_columns = 2
//!
//!   c0 c1 c2 c3 c4
//!   x  x  x  x  x
//!   x  x  x  x  x
//!   x  x  x  x  x
//!   x  x  .  .  .      <- only the long columns reach the last row
//! ```

/// Shape of one transposition box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGeometry {
    total: usize,
    columns: usize,
    height: usize,
    long_columns: usize,
}

impl BoxGeometry {
    /// Computes the geometry for `total` symbols over `columns` columns.
    ///
    /// # Panics
    /// Panics if `columns` is zero. Key orders always hold at least one column.
    pub fn new(total: usize, columns: usize) -> Self {
        assert!(columns > 0, "transposition box needs at least one column");
        BoxGeometry {
            total,
            columns,
            height: total.div_ceil(columns),
            long_columns: total % columns,
        }
    }

    /// Number of symbols in the box.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows of the tallest column: `ceil(total / columns)`.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns that reach the last row; zero for a uniform grid.
    pub fn long_columns(&self) -> usize {
        self.long_columns
    }

    /// Number of symbols held by original column `column`.
    pub fn column_len(&self, column: usize) -> usize {
        if self.long_columns == 0 || column < self.long_columns {
            self.height
        } else {
            self.height - 1
        }
    }

    fn cells(&self) -> usize {
        self.height * self.columns
    }
}

/// Panics unless `perm` holds each of `0..perm.len()` exactly once.
fn assert_permutation(perm: &[usize]) {
    let mut seen = vec![false; perm.len()];
    for &p in perm {
        assert!(
            p < perm.len() && !seen[p],
            "column order {:?} is not a permutation of 0..{}",
            perm,
            perm.len()
        );
        seen[p] = true;
    }
}

/// Forward box: row-major fill, column permutation, column-major read-out.
///
/// `order[c]` is the destination of original column `c`. The output has
/// exactly `input.len()` symbols, ordered by destination column and then
/// by row.
///
/// # Panics
/// Panics if `order` is empty or not a permutation of `0..order.len()`.
///
/// # Examples
///
/// ```
/// use granit::transposition::forward;
///
/// // columns swapped: (a b c | d e) -> column 1 first
/// let out = forward(&[1, 0], &['a', 'b', 'c', 'd', 'e']);
/// assert_eq!(out, vec!['b', 'd', 'a', 'c', 'e']);
/// ```
pub fn forward<T: Copy>(order: &[usize], input: &[T]) -> Vec<T> {
    assert_permutation(order);
    let geometry = BoxGeometry::new(input.len(), order.len());
    let columns = geometry.columns();
    let height = geometry.height();

    // Permute columns; the partial last row leaves holes in the grid.
    let mut permuted: Vec<Option<T>> = vec![None; geometry.cells()];
    for (i, &symbol) in input.iter().enumerate() {
        let row = i / columns;
        let new_col = order[i % columns];
        permuted[row * columns + new_col] = Some(symbol);
    }

    // Column-major read-out.
    let mut transposed: Vec<Option<T>> = vec![None; geometry.cells()];
    for (i, cell) in permuted.into_iter().enumerate() {
        let row = i / columns;
        let col = i % columns;
        transposed[col * height + row] = cell;
    }

    let output: Vec<T> = transposed.into_iter().flatten().collect();
    debug_assert_eq!(output.len(), geometry.total());
    output
}

/// Inverse box for a key order given as `order` (destination per column).
///
/// # Panics
/// Panics if `order` is empty or not a permutation of `0..order.len()`.
pub fn inverse<T: Copy>(order: &[usize], input: &[T]) -> Vec<T> {
    assert_permutation(order);
    let mut lookup = vec![0usize; order.len()];
    for (i, &o) in order.iter().enumerate() {
        lookup[o] = i;
    }
    inverse_with_lookup(&lookup, input)
}

/// Inverse box using the precomputed inverse permutation.
///
/// `lookup[d]` is the original column that forward placed at destination
/// `d`. Destination columns are refilled in read-out order, each taking as
/// many symbols as its original column held, and the grid is read back
/// row-major.
///
/// # Panics
/// Panics if `lookup` is empty or not a permutation of `0..lookup.len()`.
pub fn inverse_with_lookup<T: Copy>(lookup: &[usize], input: &[T]) -> Vec<T> {
    assert_permutation(lookup);
    let geometry = BoxGeometry::new(input.len(), lookup.len());
    let columns = geometry.columns();

    let mut grid: Vec<Option<T>> = vec![None; geometry.total()];
    let mut symbols = input.iter();
    for &to_col in lookup {
        for row in 0..geometry.column_len(to_col) {
            if let Some(&symbol) = symbols.next() {
                grid[row * columns + to_col] = Some(symbol);
            }
        }
    }

    let output: Vec<T> = grid.into_iter().flatten().collect();
    debug_assert_eq!(output.len(), geometry.total());
    output
}
