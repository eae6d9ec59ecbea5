use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::Renderer;
use crate::color::Color;

/// Builds a standalone SVG document, one `<circle>` per mark.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    width: f64,
    height: f64,
    body: String,
    circles: usize,
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        SvgRenderer {
            width,
            height,
            body: String::new(),
            circles: 0,
        }
    }

    pub fn circle_count(&self) -> usize {
        self.circles
    }

    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n\
             {body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.finish())
            .with_context(|| format!("writing SVG to {}", path.display()))
    }
}

impl Renderer for SvgRenderer {
    fn draw_circle(&mut self, x: f64, y: f64, diameter: f64, color: Color) -> Result<()> {
        let r = diameter / 2.0;
        writeln!(
            self.body,
            "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" fill=\"{}\"/>",
            x + r,
            y + r,
            r,
            color.to_hex()
        )?;
        self.circles += 1;
        Ok(())
    }
}
