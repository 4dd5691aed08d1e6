use crate::{Cell, Dimensions, RenderError};

/// Columns holding the Y-axis price labels.
pub const PRICE_LABEL_WIDTH: usize = 10;
/// Price labels plus the left frame edge.
pub const LEFT_MARGIN: usize = PRICE_LABEL_WIDTH + 1;
/// Right frame edge plus a gutter for the trailing timestamp label.
pub const RIGHT_MARGIN: usize = 10;
/// Legend, capability banner, top frame edge.
pub const TOP_MARGIN: usize = 3;
/// Bottom frame edge, timestamp labels.
pub const BOTTOM_MARGIN: usize = 2;

/// Rectangle of the frame reserved for bars, in absolute canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotArea {
    pub col_offset: usize,
    pub row_offset: usize,
    pub cols: usize,
    pub rows: usize,
}

impl PlotArea {
    /// First column past the plot area.
    pub fn right(&self) -> usize {
        self.col_offset + self.cols
    }

    /// First row past the plot area.
    pub fn bottom(&self) -> usize {
        self.row_offset + self.rows
    }

    pub fn contains_col(&self, col: usize) -> bool {
        (self.col_offset..self.right()).contains(&col)
    }

    pub fn contains_row(&self, row: usize) -> bool {
        (self.row_offset..self.bottom()).contains(&row)
    }
}

/// Subtract the fixed margins from `dimensions`. Margins are never shrunk to
/// make room; a frame that cannot keep a 1x1 plot is rejected, and so is one
/// whose cell grid cannot be allocated.
pub fn compose(dimensions: Dimensions) -> Result<PlotArea, RenderError> {
    let bytes = dimensions
        .width
        .checked_mul(dimensions.height)
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<Cell>()));
    if !bytes.is_some_and(|bytes| isize::try_from(bytes).is_ok()) {
        return Err(RenderError::LayoutTooLarge {
            width: dimensions.width,
            height: dimensions.height,
        });
    }

    let horizontal = LEFT_MARGIN + RIGHT_MARGIN;
    let vertical = TOP_MARGIN + BOTTOM_MARGIN;

    let cols = dimensions.width.saturating_sub(horizontal);
    let rows = dimensions.height.saturating_sub(vertical);
    if cols == 0 || rows == 0 {
        return Err(RenderError::LayoutTooSmall {
            width: dimensions.width,
            height: dimensions.height,
            min_width: horizontal + 1,
            min_height: vertical + 1,
        });
    }

    Ok(PlotArea {
        col_offset: LEFT_MARGIN,
        row_offset: TOP_MARGIN,
        cols,
        rows,
    })
}
