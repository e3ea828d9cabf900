use glam::Vec2;
use image::{Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use super::{RenderBackend, RenderError, RenderState, Vertex};
use crate::config::Color;

/// A [`RenderBackend`] that draws the overlay on the CPU into a [`Pixmap`].
///
/// Triangles are flat shaded with the color of their first vertex and drawn without
/// anti-aliasing. Consecutive primitives of the same color are drawn as a single path, so the
/// two triangles of a quad never blend their shared edge twice. Lines are one pixel wide and run
/// through pixel centers.
///
/// There is no depth buffer, the depth flags of the [`RenderState`] are only recorded.
#[derive(Clone, Debug)]
pub struct ImageBackend {
    target: Pixmap,
    state: RenderState,
}

impl ImageBackend {
    /// Creates a new backend with a transparent `width`x`height` target.
    ///
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self::from_pixmap(Pixmap::new(width, height)?))
    }

    /// Creates a new backend that draws on top of a copy of `image`.
    ///
    /// Returns `None` if the image is empty.
    pub fn from_image(image: &RgbaImage) -> Option<Self> {
        let mut target = Pixmap::new(image.width(), image.height())?;

        for (dst, src) in target.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Some(Self::from_pixmap(target))
    }

    fn from_pixmap(target: Pixmap) -> Self {
        Self {
            target,
            state: RenderState {
                blend: false,
                depth_test: true,
                depth_write: true,
            },
        }
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.target
    }

    /// Returns the color of the pixel at `x`, `y`, or `None` if it is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.target.pixel(x, y).map(|color| {
            let color = color.demultiply();
            Rgba([color.red(), color.green(), color.blue(), color.alpha()])
        })
    }

    /// Copies the target into a non-premultiplied [`RgbaImage`].
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.target.width(), self.target.height());

        for (dst, src) in image.pixels_mut().zip(self.target.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }

        image
    }

    pub fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.target.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Converts normalized device coordinates to pixel coordinates.
    fn to_pixels(&self, position: [f32; 2]) -> Vec2 {
        let size = Vec2::new(self.target.width() as f32, self.target.height() as f32);
        Vec2::new(
            (position[0] + 1.0) / 2.0 * size.x,
            (1.0 - position[1]) / 2.0 * size.y,
        )
    }

    fn paint(&self, color: [f32; 4]) -> Paint<'static> {
        let [r, g, b, a] = Color(color).to_rgba8();

        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = false;
        paint.blend_mode = if self.state.blend {
            BlendMode::SourceOver
        } else {
            BlendMode::Source
        };
        paint
    }

    fn push_triangle(&self, builder: &mut PathBuilder, triangle: &[Vertex]) {
        let a = self.to_pixels(triangle[0].position);
        let mut b = self.to_pixels(triangle[1].position);
        let mut c = self.to_pixels(triangle[2].position);

        // Triangles of opposite winding would cancel out under the nonzero fill rule.
        if (b - a).perp_dot(c - a) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }

        builder.move_to(a.x, a.y);
        builder.line_to(b.x, b.y);
        builder.line_to(c.x, c.y);
        builder.close();
    }
}

impl RenderBackend for ImageBackend {
    type Resources = ();

    fn create_resources(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn destroy_resources(&mut self, _resources: ()) {}

    fn render_state(&self) -> RenderState {
        self.state
    }

    fn set_render_state(&mut self, state: RenderState) {
        self.state = state;
    }

    fn draw_triangles(&mut self, _resources: &mut (), vertices: &[Vertex]) {
        let mut triangles = vertices.chunks_exact(3).peekable();

        while let Some(first) = triangles.next() {
            let color = first[0].color;

            let mut builder = PathBuilder::new();
            self.push_triangle(&mut builder, first);
            while let Some(triangle) = triangles.next_if(|t| t[0].color == color) {
                self.push_triangle(&mut builder, triangle);
            }

            let Some(path) = builder.finish() else {
                continue;
            };

            let paint = self.paint(color);
            self.target.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_lines(&mut self, _resources: &mut (), vertices: &[Vertex]) {
        let stroke = Stroke {
            width: 1.0,
            line_cap: LineCap::Square,
            ..Default::default()
        };

        let mut lines = vertices.chunks_exact(2).peekable();

        while let Some(first) = lines.next() {
            let color = first[0].color;

            let mut builder = PathBuilder::new();
            let mut contour_start = None;
            let mut contour_end = None;

            for line in std::iter::once(first).chain(std::iter::from_fn(|| {
                lines.next_if(|l| l[0].color == color)
            })) {
                let offset = Vec2::splat(0.5);
                let start = self.to_pixels(line[0].position) + offset;
                let end = self.to_pixels(line[1].position) + offset;

                // Connected segments form a single contour so that corners are joined instead
                // of capped twice.
                if contour_end != Some(start) {
                    builder.move_to(start.x, start.y);
                    contour_start = Some(start);
                }

                if contour_start == Some(end) {
                    builder.close();
                    contour_end = None;
                } else {
                    builder.line_to(end.x, end.y);
                    contour_end = Some(end);
                }
            }

            let Some(path) = builder.finish() else {
                continue;
            };

            let paint = self.paint(color);
            self.target
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::ImageBackend;
    use crate::config::Color;
    use crate::render::{RenderBackend, RenderState, Vertex};

    fn quad(min: [f32; 2], max: [f32; 2], color: [f32; 4]) -> Vec<Vertex> {
        let tl = [min[0], max[1]];
        let tr = max;
        let br = [max[0], min[1]];
        let bl = min;

        [tl, tr, br, tl, br, bl]
            .into_iter()
            .map(|position| Vertex { position, color })
            .collect()
    }

    #[test]
    fn new_zero_sized() {
        assert!(ImageBackend::new(0, 600).is_none());
        assert!(ImageBackend::from_image(&RgbaImage::new(800, 0)).is_none());
    }

    #[test]
    fn fill_quad_without_blend() {
        let mut backend = ImageBackend::new(4, 4).unwrap();

        // Left half of the target.
        backend.draw_triangles(&mut (), &quad([-1.0, -1.0], [0.0, 1.0], [1.0, 0.0, 0.0, 0.5]));

        for y in 0..4 {
            for x in 0..2 {
                let pixel = backend.pixel(x, y).unwrap();
                assert_eq!(pixel[3], 128);
                assert!(pixel[0] >= 250);
                assert_eq!(pixel[1], 0);
            }

            assert_eq!(backend.pixel(2, y).unwrap(), Rgba([0, 0, 0, 0]));
            assert_eq!(backend.pixel(3, y).unwrap(), Rgba([0, 0, 0, 0]));
        }
    }

    #[test]
    fn shared_diagonal_blends_once() {
        let mut backend = ImageBackend::new(8, 8).unwrap();
        backend.clear(Color::BLACK);
        backend.set_render_state(RenderState::OVERLAY);

        backend.draw_triangles(&mut (), &quad([-1.0, -1.0], [1.0, 1.0], [1.0, 1.0, 1.0, 0.5]));

        let image = backend.to_image();
        let first = *image.get_pixel(0, 0);
        assert_ne!(first, Rgba([0, 0, 0, 255]));
        assert!(image.pixels().all(|pixel| *pixel == first));
    }

    #[test]
    fn draw_line_stays_in_bounds() {
        let mut backend = ImageBackend::new(4, 4).unwrap();
        let color = [1.0, 1.0, 1.0, 1.0];

        backend.draw_lines(
            &mut (),
            &[
                Vertex {
                    position: [-1.0, 1.0],
                    color,
                },
                Vertex {
                    position: [1.0, 1.0],
                    color,
                },
            ],
        );

        for x in 0..4 {
            assert_eq!(backend.pixel(x, 0).unwrap(), Rgba([255, 255, 255, 255]));
            assert_eq!(backend.pixel(x, 1).unwrap(), Rgba([0, 0, 0, 0]));
        }
        assert!(backend.pixel(4, 0).is_none());
    }

    #[test]
    fn from_image_keeps_pixels() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        image.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

        let backend = ImageBackend::from_image(&image).unwrap();
        assert_eq!(backend.pixel(0, 0).unwrap(), Rgba([0, 0, 255, 255]));
        assert_eq!(backend.pixel(1, 1).unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(backend.to_image(), image);
    }
}
