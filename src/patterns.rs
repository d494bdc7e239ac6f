/// Seed patterns for Life-style automata over `u8` cells.
///
/// Cell offsets are 0-based (row, col) within the pattern's bounding box;
/// `buffer` and `stamp` produce plain row buffers ready for
/// `Automaton::new`.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, GLIDER, R_PENTOMINO];

impl Pattern {
    /// Bounding box of the pattern, (height, width).
    pub fn size(&self) -> (usize, usize) {
        let height = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let width = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (height, width)
    }

    /// The smallest row buffer containing the pattern.
    pub fn buffer(&self) -> Vec<Vec<u8>> {
        let (height, width) = self.size();
        let mut rows = vec![vec![0u8; width]; height];
        self.stamp(&mut rows, 0, 0);
        rows
    }

    /// Stamps the pattern into an existing row buffer with its origin at
    /// (row, col). Cells falling outside the buffer are skipped.
    pub fn stamp(&self, rows: &mut [Vec<u8>], row: usize, col: usize) {
        for &(dr, dc) in self.cells {
            if let Some(cell) = rows.get_mut(row + dr).and_then(|r| r.get_mut(col + dc)) {
                *cell = 1;
            }
        }
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// A deterministic random soup: each cell is live with probability
/// `density`. Same seed, same soup.
pub fn random_soup(height: usize, width: usize, density: f32, seed: u64) -> Vec<Vec<u8>> {
    let mut state = seed;
    (0..height)
        .map(|_| {
            (0..width)
                .map(|_| {
                    state = splitmix64(state);
                    let unit = (state as u32 >> 8) as f32 / 16_777_216.0;
                    (unit < density) as u8
                })
                .collect()
        })
        .collect()
}
