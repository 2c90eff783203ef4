use ratatui::{
    style::Color,
    widgets::canvas::{Painter, Shape},
};

/// Solid rectangle in canvas coordinates (`y` grows upward, `x`/`y` is the
/// bottom-left corner). The caller keeps it inside the canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let right = self.x + self.width;
        let top = self.y + self.height;

        let (Some((x0, y0)), Some((x1, y1))) = (painter.get_point(self.x, top), painter.get_point(right, self.y))
        else {
            return;
        };

        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{
        buffer::Buffer,
        layout::Rect,
        symbols::Marker,
        widgets::{canvas::Canvas, Widget},
    };

    use super::*;

    fn render(rect: FilledRect) -> Buffer {
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        Canvas::default()
            .marker(Marker::Block)
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 100.0])
            .paint(|ctx| ctx.draw(&rect))
            .render(area, &mut buf);
        buf
    }

    fn painted(buf: &Buffer) -> usize {
        buf.content().iter().filter(|cell| cell.fg == Color::Red).count()
    }

    #[test]
    fn test_fills_whole_canvas() {
        let buf = render(FilledRect { x: 0.0, y: 0.0, width: 100.0, height: 100.0, color: Color::Red });
        assert_eq!(painted(&buf), 100);
    }

    #[test]
    fn test_fills_bottom_left_quarter() {
        let buf = render(FilledRect { x: 0.0, y: 0.0, width: 50.0, height: 50.0, color: Color::Red });
        assert!(painted(&buf) > 0);
        // Top row stays empty, bottom-left corner is painted.
        assert_ne!(buf[(0, 0)].fg, Color::Red);
        assert_eq!(buf[(0, 9)].fg, Color::Red);
    }

    #[test]
    fn test_empty_rect_paints_nothing() {
        let buf = render(FilledRect { x: 10.0, y: 10.0, width: 0.0, height: 20.0, color: Color::Red });
        assert_eq!(painted(&buf), 0);
    }
}
