//! Widget showing a committed frame with half-block cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use dreamground_core::PixelCanvas;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Draws a [`PixelCanvas`] two pixel rows per terminal row, then overlays
/// its text labels.
#[derive(Debug)]
pub struct FrameView<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> FrameView<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for FrameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as u32;
                let top = self.canvas.pixel(x, row as u32 * 2);
                let bottom = self.canvas.pixel(x, row as u32 * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.map_or(Color::Reset, Color::from))
                        .set_bg(bottom.map_or(Color::Reset, Color::from));
                }
            }
        }

        for label in self.canvas.labels() {
            if label.x < 0.0 || label.y < 0.0 {
                continue;
            }
            let col = label.x.round() as u16;
            let row = (label.y / 2.0).round() as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            let max_width = (area.width - col) as usize;
            buf.set_stringn(
                area.x + col,
                area.y + row,
                &label.text,
                max_width,
                Style::new().fg(label.color.into()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamground_core::{Argb, DrawSurface};

    #[test]
    fn test_two_pixel_rows_per_cell() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.clear(Argb::BLACK);
        canvas.fill_polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)], Argb::RED);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        FrameView::new(&canvas).render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_labels_are_overlaid_and_clipped() {
        let mut canvas = PixelCanvas::new(6, 4);
        canvas.clear(Argb::BLACK);
        canvas.draw_text("12:34", 3.0, 2.0, Argb::WHITE);

        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        FrameView::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(3, 1)].symbol(), "1");
        assert_eq!(buf[(5, 1)].symbol(), ":");
        assert_eq!(buf[(5, 1)].fg, Color::Rgb(255, 255, 255));
        // Background of the pixel row underneath is kept.
        assert_eq!(buf[(5, 1)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_missing_pixels_reset() {
        let canvas = PixelCanvas::new(1, 1);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        FrameView::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].fg, Color::Reset);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }
}
