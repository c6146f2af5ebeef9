use tidal_math::ScreenRect;
use tidal_world::Grid;

use crate::camera::Camera;

/// Sink for solid-colour tile quads. Implemented by whatever backend draws pixels.
pub trait TileRenderer {
    fn fill(&mut self, rect: ScreenRect, color: [u8; 3]);
}

/// Draw every tile that overlaps the camera's view and return how many were
/// drawn. Below the camera's cull threshold nothing is drawn.
pub fn draw_visible<R: TileRenderer + ?Sized>(
    camera: &Camera,
    grid: &Grid,
    renderer: &mut R,
) -> usize {
    if camera.culls_everything() {
        return 0;
    }

    let mut drawn = 0;
    for ((x, y), tile) in grid.visible_tiles(camera.visible_world_rect()) {
        renderer.fill(camera.apply(grid.tile_rect(x, y)), tile.color());
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use glam::Vec2;
    use tidal_world::TileState;

    #[derive(Default)]
    struct Recorder {
        fills: Vec<(ScreenRect, [u8; 3])>,
    }

    impl TileRenderer for Recorder {
        fn fill(&mut self, rect: ScreenRect, color: [u8; 3]) {
            self.fills.push((rect, color));
        }
    }

    fn grid(width: u32, height: u32) -> Grid {
        Grid::filled(width, height, 16.0, TileState::default()).unwrap()
    }

    #[test]
    fn test_draws_only_visible_subset() {
        let grid = grid(100, 100);
        let camera = Camera::new(Vec2::new(160.0, 80.0), CameraSettings::default());
        let mut recorder = Recorder::default();

        let drawn = draw_visible(&camera, &grid, &mut recorder);
        assert_eq!(drawn, 10 * 5, "expected a 10x5 block, drew {drawn}");
        assert_eq!(recorder.fills.len(), drawn);
        assert_eq!(recorder.fills[0].0, ScreenRect::new(0, 0, 16, 16));
    }

    #[test]
    fn test_whole_small_grid_drawn_when_zoomed_out() {
        let grid = grid(10, 10);
        let mut camera = Camera::new(Vec2::new(1200.0, 720.0), CameraSettings::default());
        camera.update(Vec2::new(80.0, 80.0));
        let mut recorder = Recorder::default();
        assert_eq!(draw_visible(&camera, &grid, &mut recorder), 100);
    }

    #[test]
    fn test_nothing_drawn_off_grid() {
        let grid = grid(10, 10);
        let mut camera = Camera::new(Vec2::new(100.0, 100.0), CameraSettings::default());
        camera.update(Vec2::new(5000.0, 5000.0));
        let mut recorder = Recorder::default();
        assert_eq!(draw_visible(&camera, &grid, &mut recorder), 0);
        assert!(recorder.fills.is_empty());
    }

    #[test]
    fn test_cull_guard_skips_drawing() {
        let grid = grid(10, 10);
        let mut camera = Camera::new(
            Vec2::new(200.0, 200.0),
            CameraSettings {
                min_zoom: 0.1,
                ..CameraSettings::default()
            },
        );
        camera.zoom_by(0.2);
        for _ in 0..100 {
            camera.update(Vec2::new(80.0, 80.0));
        }
        assert!(camera.zoom() < 0.4, "zoom {} should be below cull threshold", camera.zoom());
        let mut recorder = Recorder::default();
        assert_eq!(draw_visible(&camera, &grid, &mut recorder), 0);
    }

    #[test]
    fn test_colors_come_from_tiles() {
        let grid = Grid::from_fn(2, 1, 16.0, |x, _| TileState {
            water: if x == 0 { 1.0 } else { 0.0 },
            ..TileState::default()
        })
        .unwrap();
        let camera = Camera::new(Vec2::new(32.0, 16.0), CameraSettings::default());
        let mut recorder = Recorder::default();
        draw_visible(&camera, &grid, &mut recorder);
        assert_eq!(recorder.fills[0].1, grid.tile_at(0, 0).unwrap().color());
        assert_eq!(recorder.fills[1].1, grid.tile_at(1, 0).unwrap().color());
        assert_ne!(recorder.fills[0].1, recorder.fills[1].1);
    }
}
