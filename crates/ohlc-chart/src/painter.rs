use crate::{
    candle::CandleRenderer, dot::DotRenderer, Bar, Canvas, ChartFormat, CoordinateMapper,
    DotValues, GlyphSet,
};

/// Paints one chart format onto a canvas.
pub trait Painter {
    fn paint(&self, series: &[Bar], mapper: &CoordinateMapper, canvas: &mut Canvas);
}

pub fn for_format(
    format: ChartFormat,
    dot_values: DotValues,
    glyphs: &'static GlyphSet,
) -> Box<dyn Painter> {
    match format {
        ChartFormat::Candle => Box::new(CandleRenderer::new(glyphs)),
        ChartFormat::Dot => Box::new(DotRenderer::new(glyphs, dot_values)),
    }
}
