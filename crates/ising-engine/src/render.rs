//! Stock [`Renderer`] implementations.
//!
//! - [`NullRenderer`]: discards every frame (headless runs, benches).
//! - [`AsciiRenderer`]: one character per cell, one line per row.
//! - [`PixelRenderer`]: an RGBA8 buffer, ready to blit to a canvas.

use ising_core::{LatticeView, Renderer, Spin, TickId};

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _tick: TickId, _view: &dyn LatticeView) {}
}

/// Renders the lattice as text.
#[derive(Clone, Debug)]
pub struct AsciiRenderer {
    up: char,
    down: char,
    frame: String,
    last_tick: Option<TickId>,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new('#', '.')
    }
}

impl AsciiRenderer {
    /// Use `up` for `+1` cells and `down` for `-1` cells.
    pub fn new(up: char, down: char) -> Self {
        Self {
            up,
            down,
            frame: String::new(),
            last_tick: None,
        }
    }

    /// The most recent frame; empty before the first render.
    ///
    /// Rows are separated by `\n`, with no trailing newline.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Tick of the most recent frame.
    pub fn last_tick(&self) -> Option<TickId> {
        self.last_tick
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, tick: TickId, view: &dyn LatticeView) {
        let (up, down) = (self.up, self.down);
        self.frame.clear();
        for (row_idx, row) in view.spins().chunks(view.width().max(1)).enumerate() {
            if row_idx > 0 {
                self.frame.push('\n');
            }
            self.frame.extend(row.iter().map(|&s| match s {
                Spin::Up => up,
                Spin::Down => down,
            }));
        }
        self.last_tick = Some(tick);
    }
}

/// Renders the lattice into an RGBA8 pixel buffer.
///
/// Each cell becomes a `scale x scale` block. The buffer is
/// `width * scale` pixels wide and is reallocated only when the lattice
/// shape changes.
#[derive(Clone, Debug)]
pub struct PixelRenderer {
    up: [u8; 4],
    down: [u8; 4],
    scale: usize,
    pixels: Vec<u8>,
    width_px: usize,
    height_px: usize,
}

impl Default for PixelRenderer {
    fn default() -> Self {
        Self::new([255, 255, 255, 255], [0, 0, 0, 255], 1)
    }
}

impl PixelRenderer {
    /// Paint up spins in `up`, down spins in `down`, each cell as a
    /// `scale`-pixel square. A `scale` of 0 is treated as 1.
    pub fn new(up: [u8; 4], down: [u8; 4], scale: usize) -> Self {
        Self {
            up,
            down,
            scale: scale.max(1),
            pixels: Vec::new(),
            width_px: 0,
            height_px: 0,
        }
    }

    /// Pixels per cell edge.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Buffer width in pixels.
    pub fn width_px(&self) -> usize {
        self.width_px
    }

    /// Buffer height in pixels.
    pub fn height_px(&self) -> usize {
        self.height_px
    }

    /// Row-major RGBA8 bytes, 4 per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The colour at pixel `(px, py)`, if inside the buffer.
    pub fn pixel(&self, px: usize, py: usize) -> Option<[u8; 4]> {
        if px >= self.width_px || py >= self.height_px {
            return None;
        }
        let i = (py * self.width_px + px) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[i..i + 4]);
        Some(rgba)
    }
}

impl Renderer for PixelRenderer {
    fn render(&mut self, _tick: TickId, view: &dyn LatticeView) {
        let (w, h) = (view.width(), view.height());
        self.width_px = w * self.scale;
        self.height_px = h * self.scale;
        self.pixels.resize(self.width_px * self.height_px * 4, 0);

        let row_bytes = self.width_px * 4;
        for (y, row) in view.spins().chunks(w.max(1)).enumerate() {
            let top = y * self.scale * row_bytes;
            // Paint the first pixel row of this cell row, then copy it down.
            for (x, &spin) in row.iter().enumerate() {
                let colour = match spin {
                    Spin::Up => self.up,
                    Spin::Down => self.down,
                };
                let start = top + x * self.scale * 4;
                for px in self.pixels[start..start + self.scale * 4].chunks_exact_mut(4) {
                    px.copy_from_slice(&colour);
                }
            }
            for dy in 1..self.scale {
                let dst = top + dy * row_bytes;
                self.pixels.copy_within(top..top + row_bytes, dst);
            }
        }
    }
}
