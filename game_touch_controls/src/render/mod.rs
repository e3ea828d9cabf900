//! Drawing of the overlay buttons.
//!
//! The [`OverlayRenderer`] converts the buttons of a [`TouchControls`] into colored vertices and
//! hands them to a [`RenderBackend`]. Backend resources are created lazily on the first frame
//! that has something to draw.

mod raster;

pub use raster::ImageBackend;

use bytemuck::{Pod, Zeroable};
use game_tracing::trace_span;
use glam::{UVec2, Vec2};
use thiserror::Error;

use crate::button::Button;
use crate::config::{Color, Style};
use crate::controls::TouchControls;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("failed to create render resources: {0}")]
    ResourceCreation(String),
}

/// The global pipeline state that the overlay changes while drawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub blend: bool,
    pub depth_test: bool,
    pub depth_write: bool,
}

impl RenderState {
    /// The state the overlay is drawn with: alpha blending on top of everything.
    pub const OVERLAY: Self = Self {
        blend: true,
        depth_test: false,
        depth_write: false,
    };
}

/// A vertex in normalized device coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// A graphics API the overlay can be drawn with.
pub trait RenderBackend {
    /// GPU objects (programs, buffers) that live from the first frame until shutdown.
    type Resources;

    fn create_resources(&mut self) -> Result<Self::Resources, RenderError>;

    fn destroy_resources(&mut self, resources: Self::Resources);

    fn render_state(&self) -> RenderState;

    fn set_render_state(&mut self, state: RenderState);

    /// Draws a triangle list.
    fn draw_triangles(&mut self, resources: &mut Self::Resources, vertices: &[Vertex]);

    /// Draws a line list.
    fn draw_lines(&mut self, resources: &mut Self::Resources, vertices: &[Vertex]);
}

#[derive(Debug)]
enum Resources<R> {
    Uninit,
    Ready(R),
    /// Resource creation failed, rendering is disabled until shutdown.
    Failed,
}

/// Draws the buttons of a [`TouchControls`] overlay.
pub struct OverlayRenderer<B>
where
    B: RenderBackend,
{
    backend: B,
    resources: Resources<B::Resources>,
    triangles: Vec<Vertex>,
    lines: Vec<Vertex>,
}

impl<B> OverlayRenderer<B>
where
    B: RenderBackend,
{
    /// Creates a new `OverlayRenderer`. No backend resources are created until the first call to
    /// [`render`](Self::render).
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            resources: Resources::Uninit,
            triangles: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns `true` if the backend resources exist.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(self.resources, Resources::Ready(_))
    }

    /// Draws all buttons of `controls`.
    ///
    /// Rendering never fails. If the backend resources cannot be created the error is logged and
    /// nothing is drawn until the renderer is [`shutdown`](Self::shutdown).
    pub fn render(&mut self, controls: &TouchControls) {
        let _span = trace_span!("OverlayRenderer::render").entered();

        let window_size = controls.window_size();
        if controls.buttons().is_empty() || window_size.x == 0 || window_size.y == 0 {
            return;
        }

        if let Resources::Uninit = self.resources {
            self.resources = match self.backend.create_resources() {
                Ok(resources) => Resources::Ready(resources),
                Err(err) => {
                    tracing::error!("disabling touch overlay rendering: {}", err);
                    Resources::Failed
                }
            };
        }

        let Resources::Ready(resources) = &mut self.resources else {
            return;
        };

        let style = &controls.config().style;

        self.triangles.clear();
        self.lines.clear();
        for button in controls.buttons() {
            push_quad(&mut self.triangles, button, window_size, style);

            if style.outline {
                push_outline(&mut self.lines, button, window_size, style.outline_color);
            }
        }

        let prev_state = self.backend.render_state();
        self.backend.set_render_state(RenderState::OVERLAY);

        self.backend.draw_triangles(resources, &self.triangles);
        if !self.lines.is_empty() {
            self.backend.draw_lines(resources, &self.lines);
        }

        self.backend.set_render_state(prev_state);
    }

    /// Releases the backend resources. The next call to [`render`](Self::render) creates them
    /// again.
    ///
    /// This is safe to call if nothing was ever rendered.
    pub fn shutdown(&mut self) {
        let resources = std::mem::replace(&mut self.resources, Resources::Uninit);
        if let Resources::Ready(resources) = resources {
            tracing::debug!("releasing touch overlay render resources");
            self.backend.destroy_resources(resources);
        }
    }
}

/// The corners of the button in normalized device coordinates, in the order
/// top-left, top-right, bottom-right, bottom-left.
fn corners(button: &Button, window_size: UVec2) -> [Vec2; 4] {
    let rect = button.pixel_rect(window_size);
    let size = window_size.as_vec2();

    let to_ndc = |p: UVec2| {
        let p = p.as_vec2();
        Vec2::new(2.0 * p.x / size.x - 1.0, 1.0 - 2.0 * p.y / size.y)
    };

    let min = to_ndc(rect.min);
    let max = to_ndc(rect.max);

    [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
}

fn push_quad(vertices: &mut Vec<Vertex>, button: &Button, window_size: UVec2, style: &Style) {
    let color = style.fill(button.is_pressed()).as_rgba();
    let [tl, tr, br, bl] = corners(button, window_size);

    for position in [tl, tr, br, tl, br, bl] {
        vertices.push(Vertex {
            position: position.to_array(),
            color,
        });
    }
}

fn push_outline(vertices: &mut Vec<Vertex>, button: &Button, window_size: UVec2, color: Color) {
    let color = color.as_rgba();
    let [tl, tr, br, bl] = corners(button, window_size);

    for (start, end) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        vertices.push(Vertex {
            position: start.to_array(),
            color,
        });
        vertices.push(Vertex {
            position: end.to_array(),
            color,
        });
    }
}
