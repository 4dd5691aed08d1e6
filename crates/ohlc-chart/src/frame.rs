use crate::{
    domain::raw_range,
    format::{fit, format_axis_time, format_legend_time, format_price, printable},
    layout::PRICE_LABEL_WIDTH,
    Bar, Canvas, Cell, ChartFormat, ChartOptions, ColorClass, CoordinateMapper, GlyphSet,
    RenderError,
};

const LEGEND_ROW: usize = 0;
const BANNER_ROW: usize = 1;
const RESET: &str = "\x1b[0m";

/// Adds frame, axis labels, legend and banner around the painted bars.
/// Only cells outside the plot area are written.
pub struct FrameAssembler<'a> {
    options: &'a ChartOptions,
    mapper: &'a CoordinateMapper,
    glyphs: &'static GlyphSet,
}

impl<'a> FrameAssembler<'a> {
    pub fn new(
        options: &'a ChartOptions,
        mapper: &'a CoordinateMapper,
        glyphs: &'static GlyphSet,
    ) -> Self {
        Self {
            options,
            mapper,
            glyphs,
        }
    }

    pub fn decorate(&self, canvas: &mut Canvas, series: &[Bar]) -> Result<(), RenderError> {
        self.draw_border(canvas);
        self.draw_price_labels(canvas);
        self.draw_time_labels(canvas, series)?;
        self.draw_legend(canvas, series)?;
        Ok(())
    }

    fn draw_border(&self, canvas: &mut Canvas) {
        let area = self.mapper.area();
        let (top, bottom) = (area.row_offset.saturating_sub(1), area.bottom());
        let (left, right) = (area.col_offset.saturating_sub(1), area.right());
        let horizontal = Cell::new(self.glyphs.horizontal, ColorClass::None);
        let vertical = Cell::new(self.glyphs.vertical, ColorClass::None);
        let corner = Cell::new(self.glyphs.corner, ColorClass::None);

        for col in area.col_offset..area.right() {
            canvas.put(top, col, horizontal);
            canvas.put(bottom, col, horizontal);
        }
        for row in area.row_offset..area.bottom() {
            canvas.put(row, left, vertical);
            canvas.put(row, right, vertical);
        }
        for (row, col) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
            canvas.put(row, col, corner);
        }
    }

    /// Prices of the top, middle and bottom plot rows, left-justified.
    fn draw_price_labels(&self, canvas: &mut Canvas) {
        let area = self.mapper.area();
        let mut rows = vec![
            area.row_offset,
            area.row_offset + (area.rows - 1) / 2,
            area.bottom() - 1,
        ];
        rows.dedup();

        for row in rows {
            let label = fit(&format_price(self.mapper.price_for_row(row)), PRICE_LABEL_WIDTH);
            canvas.write_text(row, 0, PRICE_LABEL_WIDTH, &label, ColorClass::None);
        }
    }

    /// Timestamps of the first, middle and last bars, centred under their
    /// columns. A label that would pass the plot's right edge is pulled left
    /// to end on it and is clipped only when wider than the plot. One that
    /// would then run into its left neighbour is dropped.
    fn draw_time_labels(&self, canvas: &mut Canvas, series: &[Bar]) -> Result<(), RenderError> {
        let area = self.mapper.area();
        let row = area.bottom() + 1;
        let total = series.len();
        let mut indices = vec![0, total / 2, total - 1];
        indices.dedup();

        let mut next_free = area.col_offset;
        for index in indices {
            let timestamp = series[index].timestamp;
            let label = printable(&format_axis_time(timestamp, self.options.interval)?);
            let width = label.chars().count();
            let col = self.mapper.column_for_index(index, total);
            let mut start = col.saturating_sub(width / 2).max(area.col_offset);
            if start + width > area.right() {
                start = area.right().saturating_sub(width).max(area.col_offset);
            }
            if start < next_free {
                tracing::debug!(index, label, "timestamp label has no room, skipped");
                continue;
            }
            canvas.write_text(row, start, area.right(), &label, ColorClass::None);
            next_free = start + width + 1;
        }
        Ok(())
    }

    fn draw_legend(&self, canvas: &mut Canvas, series: &[Bar]) -> Result<(), RenderError> {
        let width = canvas.cols();
        let legend = legend_text(self.options, series)?;
        canvas.write_text(LEGEND_ROW, 0, width, &fit(&legend, width), ColorClass::None);
        let banner = banner_text(self.options);
        canvas.write_text(BANNER_ROW, 0, width, &fit(&banner, width), ColorClass::None);
        Ok(())
    }
}

/// `BTC/USDT - 1d - candle - 30 periods - range 95.00..110.00 (first to last)`
pub fn legend_text(options: &ChartOptions, series: &[Bar]) -> Result<String, RenderError> {
    let (Some(first), Some(last), Some((low, high))) =
        (series.first(), series.last(), raw_range(series))
    else {
        return Err(RenderError::InvalidInput("price series is empty".to_string()));
    };

    Ok(format!(
        "{} - {} - {} - {} periods - range {}..{} ({} to {})",
        options.pair,
        options.interval,
        options.format,
        series.len(),
        format_price(low),
        format_price(high),
        format_legend_time(first.timestamp)?,
        format_legend_time(last.timestamp)?,
    ))
}

/// `Format: dot (showing: low) | Unicode: on | Color: off`
pub fn banner_text(options: &ChartOptions) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let mut banner = format!("Format: {}", options.format);
    if options.format == ChartFormat::Dot {
        banner.push_str(&format!(" (showing: {})", options.dot_values));
    }
    banner.push_str(&format!(
        " | Unicode: {} | Color: {}",
        on_off(options.capabilities.use_unicode),
        on_off(options.capabilities.use_color)
    ));
    banner
}

/// One line per canvas row, trailing blanks trimmed. With `use_color` every
/// run of same-class cells is wrapped in its ANSI colour and a reset.
pub fn serialize(canvas: &Canvas, use_color: bool) -> Vec<String> {
    (0..canvas.rows())
        .map(|row| serialize_row(canvas.row(row), use_color))
        .collect()
}

fn serialize_row(cells: &[Cell], use_color: bool) -> String {
    let used = cells
        .iter()
        .rposition(|cell| !cell.is_blank())
        .map_or(0, |last| last + 1);

    let mut line = String::with_capacity(used);
    let mut open = ColorClass::None;
    for cell in &cells[..used] {
        let class = if use_color { cell.color } else { ColorClass::None };
        if class != open {
            if open.color().is_some() {
                line.push_str(RESET);
            }
            if let Some(color) = class.color() {
                line.push_str(&format!("\x1b[{}m", color.to_fg_str()));
            }
            open = class;
        }
        line.push(cell.glyph);
    }
    if open.color().is_some() {
        line.push_str(RESET);
    }
    line
}
