//! Drawing surfaces for generated marks.
//!
//! The pipeline never draws; it hands a finished `Vec<VisualMark>` to
//! [`render_marks`], which calls the surface once per mark in order.

pub mod raster;
pub mod svg;

use anyhow::Result;

use crate::color::Color;
use crate::pipeline::VisualMark;

pub use raster::PngRenderer;
pub use svg::SvgRenderer;

/// A surface that can paint filled circles.
pub trait Renderer {
    /// Paint a circle whose bounding box starts at `(x, y)`.
    fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, color: Color) -> Result<()>;
}

/// Draw every mark, in generation order.
pub fn render_marks<R: Renderer + ?Sized>(renderer: &mut R, marks: &[VisualMark]) -> Result<()> {
    for mark in marks {
        renderer.draw_circle(mark.x, mark.y, mark.diameter, mark.color)?;
    }
    log::debug!("Rendered {} marks", marks.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(f64, f64, f64)>,
    }

    impl Renderer for Recorder {
        fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, _color: Color) -> Result<()> {
            self.calls.push((x, y, diameter));
            Ok(())
        }
    }

    fn mark(index: usize, diameter: f64) -> VisualMark {
        VisualMark {
            index,
            row: 0,
            col: index,
            x: index as f64 * 10.0,
            y: 5.0,
            diameter,
            hue: 0.0,
            color: Color::new(0.0, 0.0, 0.0),
        }
    }

    #[test]
    fn draws_once_per_mark_in_order() {
        let marks = vec![mark(0, 3.0), mark(1, 4.0), mark(2, 5.0)];
        let mut recorder = Recorder::default();
        render_marks(&mut recorder, &marks).unwrap();
        assert_eq!(
            recorder.calls,
            vec![(0.0, 5.0, 3.0), (10.0, 5.0, 4.0), (20.0, 5.0, 5.0)]
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let mut recorder = Recorder::default();
        {
            let surface: &mut dyn Renderer = &mut recorder;
            render_marks(surface, &[mark(0, 1.0)]).unwrap();
        }
        assert_eq!(recorder.calls.len(), 1);
    }
}
