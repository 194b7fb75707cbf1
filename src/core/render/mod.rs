//=========================================================================
// Render
//
// Backend-free drawing for the game: the simulation records DrawCommands
// into a DrawList, and a Canvas rasterizes that list into a 32-bit pixel
// buffer owned by whoever presents it.
//
// Responsibilities:
// - Describe a frame as a flat list of primitive shapes
// - Rasterize circles (filled / outlined), outlined triangles and
//   bitmap text
// - Clip everything to the buffer; off-canvas shapes are ignored
//
// Flow:
// ```text
// GameDriver::tick ──► DrawList ──(CoreEvent::Present)──► Platform
//                                                            │
//                                         Canvas::execute ◄──┘
// ```
//
// Pixels are packed `0x00RRGGBB`, row-major, `width * height` long.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod font;

//=== External Dependencies ===============================================

use std::ops::Range;

//=== Internal Dependencies ===============================================

use crate::core::game::math::Vector2;

//=== Color ===============================================================

/// Packed `0x00RRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x00_00_00);
    pub const WHITE: Self = Self(0xFF_FF_FF);
    pub const GRAY: Self = Self(0x80_80_80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

//=== DrawCommand =========================================================

/// One primitive to draw. Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas.
    Clear(Color),

    FillCircle {
        center: Vector2,
        radius: f32,
        color: Color,
    },

    StrokeCircle {
        center: Vector2,
        radius: f32,
        width: f32,
        color: Color,
    },

    /// Closed triangle outline.
    StrokeTriangle {
        points: [Vector2; 3],
        width: f32,
        color: Color,
    },

    /// One line of bitmap text; `origin` is the top-left corner and each
    /// glyph cell is `scale` pixels square.
    Text {
        origin: Vector2,
        scale: f32,
        text: String,
        color: Color,
    },
}

//=== DrawList ============================================================

/// Ordered commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all recorded commands, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    //--- Recording helpers ------------------------------------------------

    pub fn clear(&mut self, color: Color) {
        self.push(DrawCommand::Clear(color));
    }

    pub fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn stroke_circle(&mut self, center: Vector2, radius: f32, width: f32, color: Color) {
        self.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    pub fn stroke_triangle(&mut self, points: [Vector2; 3], width: f32, color: Color) {
        self.push(DrawCommand::StrokeTriangle {
            points,
            width,
            color,
        });
    }

    pub fn text(&mut self, origin: Vector2, scale: f32, text: impl Into<String>, color: Color) {
        self.push(DrawCommand::Text {
            origin,
            scale,
            text: text.into(),
            color,
        });
    }

    /// Records `text` centered on `center`.
    pub fn text_centered(&mut self, center: Vector2, scale: f32, text: &str, color: Color) {
        let origin = Vector2::new(
            center.x - font::text_width(text, scale) / 2.0,
            center.y - font::text_height(scale) / 2.0,
        );
        self.text(origin, scale, text, color);
    }

    //--- Access -----------------------------------------------------------

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

//=== Canvas ==============================================================

/// Software rasterizer over a borrowed pixel buffer.
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps `pixels` as a `width × height` canvas.
    ///
    /// Returns `None` if the buffer is smaller than `width * height`.
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Option<Self> {
        if pixels.len() < width.saturating_mul(height) {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reads one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    /// Runs every command in order.
    pub fn execute(&mut self, list: &DrawList) {
        for command in list.commands() {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(*center, *radius, *color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => self.stroke_circle(*center, *radius, *width, *color),
                DrawCommand::StrokeTriangle {
                    points,
                    width,
                    color,
                } => self.stroke_triangle(*points, *width, *color),
                DrawCommand::Text {
                    origin,
                    scale,
                    text,
                    color,
                } => self.text(*origin, *scale, text, *color),
            }
        }
    }

    //=====================================================================
    // Primitives
    //=====================================================================

    pub fn clear(&mut self, color: Color) {
        let len = self.width * self.height;
        self.pixels[..len].fill(color.0);
    }

    /// Fills every pixel whose center lies inside the circle.
    ///
    /// Circles smaller than a pixel still light the pixel under their
    /// center, so sub-pixel stars stay visible.
    pub fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        if radius < 0.5 {
            self.plot(center.x, center.y, color);
            return;
        }

        let r2 = radius * radius;
        self.scan(center, radius, color, |p| {
            let d = p - center;
            d.x * d.x + d.y * d.y <= r2
        });
    }

    /// Paints the ring `|distance - radius| <= width / 2`.
    pub fn stroke_circle(&mut self, center: Vector2, radius: f32, width: f32, color: Color) {
        let half = (width / 2.0).max(0.5);
        self.scan(center, radius + half, color, |p| {
            (p.distance(center) - radius).abs() <= half
        });
    }

    /// Strokes the three edges `a→b→c→a`.
    pub fn stroke_triangle(&mut self, points: [Vector2; 3], width: f32, color: Color) {
        let half = (width / 2.0).max(0.5);
        for i in 0..3 {
            self.stroke_segment(points[i], points[(i + 1) % 3], half, color);
        }
    }

    /// Draws `text` with the 5×7 bitmap font, one `scale`-sized square per
    /// lit glyph cell.
    pub fn text(&mut self, origin: Vector2, scale: f32, text: &str, color: Color) {
        if scale <= 0.0 {
            return;
        }
        for (index, c) in text.chars().enumerate() {
            let Some(rows) = font::glyph(c) else {
                continue;
            };
            let left = origin.x + (index * font::ADVANCE) as f32 * scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        let min = Vector2::new(
                            left + col as f32 * scale,
                            origin.y + row as f32 * scale,
                        );
                        self.fill_rect(min, min + Vector2::new(scale, scale), color);
                    }
                }
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Paints pixels whose center lies in `[min, max)`.
    fn fill_rect(&mut self, min: Vector2, max: Vector2, color: Color) {
        let xs = pixel_span(min.x, max.x, self.width);
        let ys = pixel_span(min.y, max.y, self.height);

        for y in ys {
            for x in xs.clone() {
                let p = pixel_center(x, y);
                if p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y {
                    self.pixels[y * self.width + x] = color.0;
                }
            }
        }
    }

    fn stroke_segment(&mut self, a: Vector2, b: Vector2, half: f32, color: Color) {
        let xs = pixel_span(a.x.min(b.x) - half, a.x.max(b.x) + half, self.width);
        let ys = pixel_span(a.y.min(b.y) - half, a.y.max(b.y) + half, self.height);

        for y in ys {
            for x in xs.clone() {
                let p = pixel_center(x, y);
                if distance_to_segment(p, a, b) <= half {
                    self.pixels[y * self.width + x] = color.0;
                }
            }
        }
    }

    /// Visits the clipped square around `center` and paints pixels whose
    /// center satisfies `inside`.
    fn scan(&mut self, center: Vector2, extent: f32, color: Color, inside: impl Fn(Vector2) -> bool) {
        let xs = pixel_span(center.x - extent, center.x + extent, self.width);
        let ys = pixel_span(center.y - extent, center.y + extent, self.height);

        for y in ys {
            for x in xs.clone() {
                if inside(pixel_center(x, y)) {
                    self.pixels[y * self.width + x] = color.0;
                }
            }
        }
    }

    fn plot(&mut self, x: f32, y: f32, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color.0;
        }
    }
}

//=== Geometry Helpers ====================================================

fn pixel_center(x: usize, y: usize) -> Vector2 {
    Vector2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Pixel indices covering `[lo, hi]`, clipped to `0..limit`.
fn pixel_span(lo: f32, hi: f32, limit: usize) -> Range<usize> {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(limit);
    start..end.max(start)
}

fn distance_to_segment(p: Vector2, a: Vector2, b: Vector2) -> f32 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

//=========================================================================
// Unit Tests
//=========================================================================
