use crate::{
    painter::Painter, Bar, Canvas, ColorClass, CoordinateMapper, DotValues, GlyphSet, PaintOp,
};

/// Price marker drawn by the dot format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    High,
    Low,
    Close,
}

impl Marker {
    /// Paint order; a later marker on the same cell replaces an earlier one.
    pub const ORDER: [Self; 3] = [Self::High, Self::Low, Self::Close];

    fn price(self, bar: &Bar) -> f64 {
        match self {
            Self::High => bar.high,
            Self::Low => bar.low,
            Self::Close => bar.close,
        }
    }

    fn glyph(self, glyphs: &GlyphSet) -> char {
        match self {
            Self::High => glyphs.high,
            Self::Low => glyphs.low,
            Self::Close => glyphs.close,
        }
    }

    fn color(self) -> ColorClass {
        match self {
            Self::High => ColorClass::High,
            Self::Low => ColorClass::Low,
            Self::Close => ColorClass::Close,
        }
    }
}

pub struct DotRenderer {
    glyphs: &'static GlyphSet,
    values: DotValues,
}

impl DotRenderer {
    pub fn new(glyphs: &'static GlyphSet, values: DotValues) -> Self {
        Self { glyphs, values }
    }

    pub fn bar_ops(&self, bar: &Bar, col: usize, mapper: &CoordinateMapper) -> Vec<PaintOp> {
        Marker::ORDER
            .into_iter()
            .filter(|marker| self.values.includes(*marker))
            .map(|marker| {
                PaintOp::new(
                    mapper.row_for_price(marker.price(bar)),
                    col,
                    marker.glyph(self.glyphs),
                    marker.color(),
                )
            })
            .collect()
    }
}

impl Painter for DotRenderer {
    fn paint(&self, series: &[Bar], mapper: &CoordinateMapper, canvas: &mut Canvas) {
        let area = mapper.area();
        for (index, bar) in series.iter().enumerate() {
            let col = mapper.column_for_index(index, series.len());
            if !area.contains_col(col) {
                tracing::trace!(index, col, "dot column outside plot area, skipped");
                continue;
            }
            canvas.apply(&self.bar_ops(bar, col, mapper));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DotRenderer;
    use crate::{
        glyphs, painter::Painter, Bar, Canvas, ColorClass, CoordinateMapper, DotValues, PlotArea,
        PriceDomain,
    };
    use time::OffsetDateTime;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(OffsetDateTime::UNIX_EPOCH, open, high, low, close)
    }

    fn mapper(rows: usize) -> CoordinateMapper {
        CoordinateMapper::new(
            PlotArea {
                col_offset: 0,
                row_offset: 0,
                cols: 2,
                rows,
            },
            PriceDomain::new(90.0, 110.0).expect("domain"),
        )
    }

    #[test]
    fn draws_all_three_markers() {
        let renderer = DotRenderer::new(&glyphs::UNICODE, DotValues::All);
        let mut canvas = Canvas::new(11, 2);
        renderer.paint(&[bar(96.0, 108.0, 92.0, 104.0)], &mapper(11), &mut canvas);
        assert_eq!(canvas.get(1, 1).map(|c| c.glyph), Some('▲'));
        assert_eq!(canvas.get(9, 1).map(|c| c.glyph), Some('▼'));
        assert_eq!(canvas.get(3, 1).map(|c| c.glyph), Some('●'));
        assert_eq!(canvas.count(ColorClass::None), 22 - 3);
    }

    #[test]
    fn selector_limits_markers() {
        let renderer = DotRenderer::new(&glyphs::ASCII, DotValues::High);
        let mut canvas = Canvas::new(11, 2);
        let series = [bar(96.0, 108.0, 92.0, 104.0), bar(100.0, 102.0, 98.0, 99.0)];
        renderer.paint(&series, &mapper(11), &mut canvas);
        assert_eq!(canvas.count(ColorClass::High), 2);
        assert_eq!(canvas.count(ColorClass::Low), 0);
        assert_eq!(canvas.count(ColorClass::Close), 0);
        assert_eq!(canvas.get(1, 0).map(|c| c.glyph), Some('^'));
    }

    #[test]
    fn close_wins_when_markers_collide() {
        let renderer = DotRenderer::new(&glyphs::ASCII, DotValues::All);
        let mut canvas = Canvas::new(1, 2);
        renderer.paint(&[bar(96.0, 108.0, 92.0, 104.0)], &mapper(1), &mut canvas);
        assert_eq!(canvas.get(0, 1).map(|c| c.glyph), Some('o'));
        assert_eq!(canvas.count(ColorClass::Close), 1);
        assert_eq!(canvas.count(ColorClass::High), 0);
    }
}
