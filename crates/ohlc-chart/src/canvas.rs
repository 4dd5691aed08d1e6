use colored::Color;

/// Semantic colour of a cell; mapped to an ANSI code only at serialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorClass {
    #[default]
    None,
    Bullish,
    Bearish,
    Neutral,
    High,
    Low,
    Close,
    Gray,
}

impl ColorClass {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::None => None,
            Self::Bullish => Some(Color::BrightGreen),
            Self::Bearish => Some(Color::BrightRed),
            Self::Neutral => Some(Color::White),
            Self::High => Some(Color::BrightCyan),
            Self::Low => Some(Color::BrightYellow),
            Self::Close => Some(Color::BrightWhite),
            Self::Gray => Some(Color::BrightBlack),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: ColorClass,
}

impl Cell {
    pub fn new(glyph: char, color: ColorClass) -> Self {
        Self { glyph, color }
    }

    pub fn is_blank(&self) -> bool {
        self.glyph == ' ' && self.color == ColorClass::None
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', ColorClass::None)
    }
}

/// A single cell write. Renderers emit these in paint order; the last write
/// to a position wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintOp {
    pub row: usize,
    pub col: usize,
    pub cell: Cell,
}

impl PaintOp {
    pub fn new(row: usize, col: usize, glyph: char, color: ColorClass) -> Self {
        Self {
            row,
            col,
            cell: Cell::new(glyph, color),
        }
    }
}

/// Fixed `rows x cols` grid, blank on creation. Writes outside the grid are
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn put(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    pub fn apply(&mut self, ops: &[PaintOp]) {
        for op in ops {
            self.put(op.row, op.col, op.cell);
        }
    }

    /// Write `text` left to right from `col`, one char per cell, stopping at
    /// `end` (exclusive) or the canvas edge.
    pub fn write_text(&mut self, row: usize, col: usize, end: usize, text: &str, color: ColorClass) {
        let end = end.min(self.cols);
        for (offset, glyph) in text.chars().enumerate() {
            let col = col + offset;
            if col >= end {
                break;
            }
            self.put(row, col, Cell::new(glyph, color));
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// `(row, col, cell)` for every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (i / self.cols, i % self.cols, cell))
    }

    pub fn count(&self, color: ColorClass) -> usize {
        self.cells.iter().filter(|cell| cell.color == color).count()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}
