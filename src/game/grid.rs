#![allow(dead_code)]
//! Word-search board generation
//!
//! Words are committed to the board by bounded random retry: shuffled word
//! order, shuffled direction order, and up to `size*size*4` (direction,
//! start cell) samples per word. A word that exhausts its budget is dropped
//! from the match rather than reported as an error. Unclaimed cells are
//! filled with uniform random letters in a final pass.

use rand::prelude::*;

/// The eight placement directions as (row, col) unit steps.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
];

const FILL_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A filled letter board. Every cell holds exactly one letter A-Z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Generate a board for the given word list.
    ///
    /// Returns the board plus the words that actually fit, in placement
    /// order. Placement is best-effort; see the module docs.
    pub fn generate(words: &[String], size: usize) -> (Self, Vec<String>) {
        Self::generate_with_rng(words, size, &mut rand::rng())
    }

    /// Generate a board using a specific RNG (for testing/seeding).
    pub fn generate_with_rng<R: Rng>(
        words: &[String],
        size: usize,
        rng: &mut R,
    ) -> (Self, Vec<String>) {
        let mut cells: Vec<Option<char>> = vec![None; size * size];

        // Shuffle the attempt order so early words get no systematic
        // advantage over late ones.
        let mut order: Vec<&String> = words.iter().collect();
        order.shuffle(rng);

        let mut placed = Vec::new();
        for word in order {
            if try_place(&mut cells, size, word, rng) {
                placed.push(word.clone());
            }
        }

        let filled = cells
            .into_iter()
            .map(|cell| match cell {
                Some(c) => c,
                None => FILL_LETTERS[rng.random_range(0..FILL_LETTERS.len())] as char,
            })
            .collect();

        (Self { size, cells: filled }, placed)
    }

    /// Board dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at (row, col). Panics if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row * self.size + col]
    }

    /// One row of the board.
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Read the letters along a cell path, in traversal order.
    pub fn read_path(&self, path: &[(usize, usize)]) -> String {
        path.iter().map(|&(r, c)| self.get(r, c)).collect()
    }

    /// Locate a word on the board, scanning every start cell and direction.
    ///
    /// Returns the covered cells in word order, or None if the word does
    /// not appear. Used for highlighting revealed words.
    pub fn find_path(&self, word: &str) -> Option<Vec<(usize, usize)>> {
        let letters: Vec<char> = word.chars().collect();
        for row in 0..self.size {
            for col in 0..self.size {
                for &(dr, dc) in &DIRECTIONS {
                    if let Some(path) = self.path_matches(&letters, row, col, dr, dc) {
                        return Some(path);
                    }
                }
            }
        }
        None
    }

    fn path_matches(
        &self,
        letters: &[char],
        row: usize,
        col: usize,
        dr: i32,
        dc: i32,
    ) -> Option<Vec<(usize, usize)>> {
        let mut path = Vec::with_capacity(letters.len());
        for (i, &ch) in letters.iter().enumerate() {
            let r = row as i32 + dr * i as i32;
            let c = col as i32 + dc * i as i32;
            if r < 0 || r >= self.size as i32 || c < 0 || c >= self.size as i32 {
                return None;
            }
            if self.get(r as usize, c as usize) != ch {
                return None;
            }
            path.push((r as usize, c as usize));
        }
        Some(path)
    }

    /// Serialize as newline-separated rows (for the persisted record).
    pub fn to_text(&self) -> String {
        (0..self.size)
            .map(|r| self.row(r).iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse the persisted form. Returns None unless the text is a square
    /// board of uppercase letters.
    pub fn from_text(text: &str) -> Option<Self> {
        let rows: Vec<&str> = text.lines().collect();
        let size = rows.len();
        if size == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let letters: Vec<char> = row.chars().collect();
            if letters.len() != size || !letters.iter().all(|c| c.is_ascii_uppercase()) {
                return None;
            }
            cells.extend(letters);
        }
        Some(Self { size, cells })
    }
}

fn try_place<R: Rng>(cells: &mut [Option<char>], size: usize, word: &str, rng: &mut R) -> bool {
    let letters: Vec<char> = word.chars().collect();
    let budget = size * size * 4;

    let mut directions = DIRECTIONS;
    directions.shuffle(rng);

    for attempt in 0..budget {
        let (dr, dc) = directions[attempt % directions.len()];
        let row = rng.random_range(0..size) as i32;
        let col = rng.random_range(0..size) as i32;
        if can_place(cells, size, &letters, row, col, dr, dc) {
            for (i, &ch) in letters.iter().enumerate() {
                let r = (row + dr * i as i32) as usize;
                let c = (col + dc * i as i32) as usize;
                cells[r * size + c] = Some(ch);
            }
            return true;
        }
    }
    false
}

// A cell is usable when it is in bounds and either unset or already holding
// the required letter, so crossing words may share letters.
fn can_place(
    cells: &[Option<char>],
    size: usize,
    letters: &[char],
    row: i32,
    col: i32,
    dr: i32,
    dc: i32,
) -> bool {
    for (i, &ch) in letters.iter().enumerate() {
        let r = row + dr * i as i32;
        let c = col + dc * i as i32;
        if r < 0 || r >= size as i32 || c < 0 || c >= size as i32 {
            return false;
        }
        if let Some(existing) = cells[r as usize * size + c as usize] {
            if existing != ch {
                return false;
            }
        }
    }
    true
}
