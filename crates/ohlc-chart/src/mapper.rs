use crate::{PlotArea, PriceDomain};

/// Maps bar indices to columns and prices to rows inside one plot area.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    area: PlotArea,
    domain: PriceDomain,
}

impl CoordinateMapper {
    pub fn new(area: PlotArea, domain: PriceDomain) -> Self {
        Self { area, domain }
    }

    pub fn area(&self) -> PlotArea {
        self.area
    }

    pub fn domain(&self) -> PriceDomain {
        self.domain
    }

    /// Each bar gets a slot of `cols / total_bars` columns and is drawn in
    /// its middle. With more bars than columns several indices share a
    /// column; the later one is painted last.
    pub fn column_for_index(&self, index: usize, total_bars: usize) -> usize {
        let cols = self.area.cols;
        let total = total_bars.max(1);
        let slot = (cols / total).max(1);
        let x = (index * cols / total + slot / 2).min(cols - 1);
        self.area.col_offset + x
    }

    /// Higher prices land on smaller rows. Always inside the plot area.
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn row_for_price(&self, price: f64) -> usize {
        let last = (self.area.rows - 1) as f64;
        let ratio = (self.domain.max() - price) / self.domain.span();
        let offset = (ratio * last).round().clamp(0.0, last);
        self.area.row_offset + offset as usize
    }

    /// Price at the centre of `row`; used for the axis labels.
    #[allow(clippy::cast_precision_loss)]
    pub fn price_for_row(&self, row: usize) -> f64 {
        if self.area.rows == 1 {
            return (self.domain.min() + self.domain.max()) / 2.0;
        }
        let last = self.area.rows - 1;
        let offset = row.saturating_sub(self.area.row_offset).min(last);
        self.domain.max() - self.domain.span() * offset as f64 / last as f64
    }
}
