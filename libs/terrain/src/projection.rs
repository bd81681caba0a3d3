//! Wireframe projection of a height grid.
//!
//! Grid points live in a frame where `x` is the column, `y` is the row and
//! `z` is the raw integer height. Heights and grid units are mixed directly;
//! there is no vertical scale.

use glam::{Vec2, Vec3};

use crate::camera::CameraState;
use crate::grid::HeightGrid;

/// Perspective focal scale, also the camera's distance from the grid origin.
pub const FOCAL_SCALE: f32 = 200.0;

/// Smallest `|z + FOCAL_SCALE|` still divided by. Closer points are dropped.
pub const MIN_DEPTH: f32 = 1e-3;

/// Drawable area in pixels. Projection is centred on its half-dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Screen-space segment, origin top-left, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wireframe {
    /// Cell edges in grid-scan order, four per cell.
    pub segments: Vec<LineSegment>,
    /// Edges dropped because an endpoint could not be projected.
    pub skipped: usize,
}

/// Yaw about the vertical screen axis, then pitch about the horizontal one.
struct Rotation {
    cos_x: f32,
    sin_x: f32,
    cos_y: f32,
    sin_y: f32,
}

impl Rotation {
    fn new(camera: &CameraState) -> Self {
        let (sin_x, cos_x) = camera.angle_x.sin_cos();
        let (sin_y, cos_y) = camera.angle_y.sin_cos();
        Self {
            cos_x,
            sin_x,
            cos_y,
            sin_y,
        }
    }

    fn apply(&self, p: Vec3) -> Vec3 {
        let x = p.x * self.cos_y - p.z * self.sin_y;
        let z = p.x * self.sin_y + p.z * self.cos_y;

        let y = p.y * self.cos_x - z * self.sin_x;
        let z = p.y * self.sin_x + z * self.cos_x;

        Vec3::new(x, y, z)
    }
}

struct Projector {
    rotation: Rotation,
    zoom_factor: f32,
    center: Vec2,
}

impl Projector {
    fn new(camera: &CameraState, viewport: Viewport) -> Self {
        Self {
            rotation: Rotation::new(camera),
            zoom_factor: 1.0 / camera.zoom,
            center: viewport.center(),
        }
    }

    fn project(&self, point: Vec3) -> Option<Vec2> {
        let rotated = self.rotation.apply(point);
        let depth = rotated.z + FOCAL_SCALE;
        if depth.abs() < MIN_DEPTH {
            return None;
        }

        let screen = Vec2::new(rotated.x, rotated.y) / depth * FOCAL_SCALE * self.zoom_factor
            + self.center;
        screen.is_finite().then_some(screen)
    }
}

/// Projects one grid-frame point. `None` when it sits on (or numerically
/// next to) the camera plane.
pub fn project_point(point: Vec3, camera: &CameraState, viewport: Viewport) -> Option<Vec2> {
    Projector::new(camera, viewport).project(point)
}

/// Builds the wireframe for every cell of `grid`.
///
/// Each cell contributes `c1 -> c2 -> c3 -> c4 -> c1` where `c1 = (j, i)`,
/// `c2 = (j + 1, i)`, `c3 = (j + 1, i + 1)` and `c4 = (j, i + 1)`. Edges are
/// neither filled nor depth sorted.
pub fn project(grid: &HeightGrid, camera: &CameraState, viewport: Viewport) -> Wireframe {
    let n = grid.dimension();
    let projector = Projector::new(camera, viewport);

    // Shared corners are projected once.
    let mut vertices: Vec<Option<Vec2>> = Vec::with_capacity(n * n);
    for (i, row) in grid.rows().enumerate() {
        for (j, &height) in row.iter().enumerate() {
            vertices.push(projector.project(Vec3::new(j as f32, i as f32, height as f32)));
        }
    }

    let cells = (n - 1) * (n - 1);
    let mut wireframe = Wireframe {
        segments: Vec::with_capacity(cells * 4),
        skipped: 0,
    };

    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let c1 = vertices[i * n + j];
            let c2 = vertices[i * n + j + 1];
            let c3 = vertices[(i + 1) * n + j + 1];
            let c4 = vertices[(i + 1) * n + j];

            for (start, end) in [(c1, c2), (c2, c3), (c3, c4), (c4, c1)] {
                match (start, end) {
                    (Some(start), Some(end)) => {
                        wireframe.segments.push(LineSegment { start, end })
                    }
                    _ => wireframe.skipped += 1,
                }
            }
        }
    }

    wireframe
}

#[cfg(test)]
mod tests {
    use super::*;

    const VGA: Viewport = Viewport::new(640.0, 480.0);

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn unrotated_unit_point_lands_next_to_center() {
        let camera = CameraState::default();
        let p = project_point(Vec3::new(1.0, 0.0, 0.0), &camera, VGA).unwrap();
        assert!(approx(p, Vec2::new(321.0, 240.0)), "{p:?}");

        let origin = project_point(Vec3::ZERO, &camera, VGA).unwrap();
        assert!(approx(origin, Vec2::new(320.0, 240.0)));
    }

    #[test]
    fn center_follows_viewport() {
        let camera = CameraState::default();
        let p = project_point(Vec3::new(0.0, 2.0, 0.0), &camera, Viewport::new(800.0, 600.0))
            .unwrap();
        assert!(approx(p, Vec2::new(400.0, 302.0)));
    }

    #[test]
    fn zoom_scales_offsets_inversely() {
        let camera = CameraState {
            zoom: 2.0,
            ..CameraState::default()
        };
        let p = project_point(Vec3::new(1.0, 4.0, 0.0), &camera, VGA).unwrap();
        assert!(approx(p, Vec2::new(320.5, 242.0)));
    }

    #[test]
    fn height_pushes_points_away() {
        let camera = CameraState::default();
        let p = project_point(Vec3::new(1.0, 0.0, 200.0), &camera, VGA).unwrap();
        assert!(approx(p, Vec2::new(320.5, 240.0)));
    }

    #[test]
    fn quarter_yaw_swaps_x_into_depth() {
        let camera = CameraState {
            angle_y: std::f32::consts::FRAC_PI_2,
            ..CameraState::default()
        };
        // x' = -z = 0 and z' = x = 1, so the point collapses onto the centre column.
        let p = project_point(Vec3::new(1.0, 0.0, 0.0), &camera, VGA).unwrap();
        assert!(approx(p, Vec2::new(320.0, 240.0)), "{p:?}");
    }

    #[test]
    fn pitch_uses_yawed_depth() {
        let camera = CameraState {
            angle_x: std::f32::consts::FRAC_PI_2,
            ..CameraState::default()
        };
        // y' = -z = -10, z'' = y = 0.
        let p = project_point(Vec3::new(0.0, 0.0, 10.0), &camera, VGA).unwrap();
        assert!(approx(p, Vec2::new(320.0, 230.0)), "{p:?}");
    }

    #[test]
    fn camera_plane_is_unprojectable() {
        let camera = CameraState::default();
        assert_eq!(project_point(Vec3::new(3.0, 3.0, -200.0), &camera, VGA), None);
        assert_eq!(project_point(Vec3::new(3.0, 3.0, -199.9999), &camera, VGA), None);
        assert!(project_point(Vec3::new(3.0, 3.0, -199.0), &camera, VGA).is_some());
    }

    #[test]
    fn flat_grid_emits_four_edges_per_cell_in_scan_order() {
        let grid = HeightGrid::new(3, 0).unwrap();
        let wireframe = project(&grid, &CameraState::default(), VGA);

        assert_eq!(wireframe.segments.len(), 16);
        assert_eq!(wireframe.skipped, 0);

        let first = wireframe.segments[0];
        assert!(approx(first.start, Vec2::new(320.0, 240.0)));
        assert!(approx(first.end, Vec2::new(321.0, 240.0)));

        let second = wireframe.segments[1];
        assert!(approx(second.start, Vec2::new(321.0, 240.0)));
        assert!(approx(second.end, Vec2::new(321.0, 241.0)));

        // Cell (0, 1) starts at column 1.
        let fifth = wireframe.segments[4];
        assert!(approx(fifth.start, Vec2::new(321.0, 240.0)));
        assert!(approx(fifth.end, Vec2::new(322.0, 240.0)));

        // Closing edge of the last cell returns to (j=1, i=1).
        let last = wireframe.segments[15];
        assert!(approx(last.start, Vec2::new(321.0, 242.0)));
        assert!(approx(last.end, Vec2::new(321.0, 241.0)));
    }

    #[test]
    fn degenerate_corner_drops_only_its_edges() {
        let mut cells = vec![0; 9];
        cells[0] = -200;
        let grid = HeightGrid::from_cells(3, 0, cells).unwrap();

        let wireframe = project(&grid, &CameraState::default(), VGA);

        assert_eq!(wireframe.skipped, 2);
        assert_eq!(wireframe.segments.len(), 14);
        assert!(
            wireframe
                .segments
                .iter()
                .all(|s| s.start.is_finite() && s.end.is_finite())
        );
    }

    #[test]
    fn projection_leaves_grid_untouched() {
        let grid = HeightGrid::from_cells(3, 2, vec![1, -2, 0, 2, 2, -1, 0, 1, -2]).unwrap();
        let before = grid.clone();
        let camera = CameraState {
            zoom: 1.3,
            angle_x: 0.4,
            angle_y: -0.7,
        };
        let _ = project(&grid, &camera, VGA);
        assert_eq!(grid, before);
    }
}
