//! Rendering
//!
//! The game only ever hands renderers a `RenderSnapshot`. There are no image
//! assets: everything is drawn with the flat fallback colors.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::SceneStyle;

use crate::sim::RenderSnapshot;

/// Something that can present a frame
pub trait Renderer {
    type Error;

    /// Draw one frame. Must not keep references into the snapshot.
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error>;

    /// The output surface changed size (physical pixels)
    fn resize(&mut self, width: u32, height: u32);
}

/// Builds scene geometry without a GPU; used by the native runner
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub style: SceneStyle,
    pub frames: u64,
    pub last_vertex_count: usize,
    pub size: (u32, u32),
}

impl Renderer for HeadlessRenderer {
    type Error = std::convert::Infallible;

    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error> {
        self.last_vertex_count = shapes::scene(snapshot, self.style).len();
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
