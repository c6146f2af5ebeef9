use tidal_math::ScreenRect;
use tidal_view::TileRenderer;

/// Renderer that draws nothing and keeps tallies, for headless runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingRenderer {
    /// Quads submitted since creation.
    pub fills: u64,
    /// Total pixel area of those quads.
    pub pixels: u64,
}

impl TileRenderer for CountingRenderer {
    fn fill(&mut self, rect: ScreenRect, _color: [u8; 3]) {
        self.fills += 1;
        self.pixels += rect.area();
    }
}
