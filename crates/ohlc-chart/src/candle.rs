use crate::{
    bar::Trend, painter::Painter, Bar, Canvas, ColorClass, CoordinateMapper, GlyphSet, PaintOp,
};

pub struct CandleRenderer {
    glyphs: &'static GlyphSet,
}

impl CandleRenderer {
    pub fn new(glyphs: &'static GlyphSet) -> Self {
        Self { glyphs }
    }

    /// Wick from high to low, then the body from open to close on top of it.
    pub fn bar_ops(&self, bar: &Bar, col: usize, mapper: &CoordinateMapper) -> Vec<PaintOp> {
        let (wick_top, wick_bottom) = ordered(
            mapper.row_for_price(bar.high),
            mapper.row_for_price(bar.low),
        );
        let (body_top, body_bottom) = ordered(
            mapper.row_for_price(bar.open),
            mapper.row_for_price(bar.close),
        );
        let body_color = match bar.trend() {
            Trend::Bullish => ColorClass::Bullish,
            Trend::Bearish => ColorClass::Bearish,
            Trend::Neutral => ColorClass::Neutral,
        };

        let wick = (wick_top..=wick_bottom)
            .map(|row| PaintOp::new(row, col, self.glyphs.wick, ColorClass::Gray));
        let body = (body_top..=body_bottom)
            .map(|row| PaintOp::new(row, col, self.glyphs.body, body_color));
        wick.chain(body).collect()
    }
}

impl Painter for CandleRenderer {
    fn paint(&self, series: &[Bar], mapper: &CoordinateMapper, canvas: &mut Canvas) {
        let area = mapper.area();
        for (index, bar) in series.iter().enumerate() {
            let col = mapper.column_for_index(index, series.len());
            if !area.contains_col(col) {
                tracing::trace!(index, col, "candle column outside plot area, skipped");
                continue;
            }
            canvas.apply(&self.bar_ops(bar, col, mapper));
        }
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::CandleRenderer;
    use crate::{
        glyphs, painter::Painter, Bar, Canvas, ColorClass, CoordinateMapper, PlotArea, PriceDomain,
    };
    use time::OffsetDateTime;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(OffsetDateTime::UNIX_EPOCH, open, high, low, close)
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            PlotArea {
                col_offset: 0,
                row_offset: 0,
                cols: 3,
                rows: 11,
            },
            PriceDomain::new(90.0, 110.0).expect("domain"),
        )
    }

    fn column(canvas: &Canvas, col: usize) -> String {
        (0..canvas.rows())
            .map(|row| canvas.get(row, col).map_or(' ', |c| c.glyph))
            .collect()
    }

    #[test]
    fn body_overwrites_wick() {
        let renderer = CandleRenderer::new(&glyphs::ASCII);
        let mut canvas = Canvas::new(11, 3);
        renderer.paint(&[bar(96.0, 108.0, 92.0, 104.0)], &mapper(), &mut canvas);
        // rows: 108 -> 1, 104 -> 3, 96 -> 7, 92 -> 9
        assert_eq!(column(&canvas, 1), " ||#####|| ");
        assert_eq!(canvas.count(ColorClass::Bullish), 5);
        assert_eq!(canvas.count(ColorClass::Gray), 4);
    }

    #[test]
    fn body_color_follows_trend() {
        let renderer = CandleRenderer::new(&glyphs::UNICODE);
        let mut canvas = Canvas::new(11, 3);
        let series = [
            bar(100.0, 108.0, 92.0, 104.0),
            bar(104.0, 108.0, 92.0, 100.0),
            bar(100.0, 108.0, 92.0, 100.0),
        ];
        renderer.paint(&series, &mapper(), &mut canvas);
        assert_eq!(canvas.get(4, 0).map(|c| c.color), Some(ColorClass::Bullish));
        assert_eq!(canvas.get(4, 1).map(|c| c.color), Some(ColorClass::Bearish));
        assert_eq!(canvas.get(5, 2).map(|c| c.color), Some(ColorClass::Neutral));
        assert_eq!(canvas.get(5, 2).map(|c| c.glyph), Some('█'));
    }

    #[test]
    fn doji_collapses_to_one_row() {
        let renderer = CandleRenderer::new(&glyphs::ASCII);
        let ops = renderer.bar_ops(&bar(100.0, 100.0, 100.0, 100.0), 1, &mapper());
        assert_eq!(ops.len(), 2);
        assert_eq!(ops.last().map(|op| op.cell.color), Some(ColorClass::Neutral));
        assert_eq!(ops[0].row, ops[1].row);
    }
}
