//! Wall + zig-zag spring + block diagram shared by the spring simulation and
//! the static Hooke's-law readout.

use crate::{Color, Scene, Shape, Vec2};

/// Screen x of the wall face.
pub const WALL_X: f64 = 120.0;
/// Unstretched spring length in pixels.
pub const REST_LENGTH_PX: f64 = 120.0;
/// Physical-to-screen scale for the extension.
pub const PIXELS_PER_METER: f64 = 220.0;
pub const BLOCK_WIDTH: f64 = 80.0;
pub const BLOCK_HEIGHT: f64 = 60.0;
const SEGMENTS: usize = 12;
const COIL_AMPLITUDE: f64 = 14.0;

/// Where the block ended up, for placing labels around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringLayout {
    pub block_center: Vec2,
}

impl SpringLayout {
    /// Left edge of the block, `dy` pixels below its center.
    pub fn label_anchor(&self, dy: f64) -> Vec2 {
        Vec2::new(
            self.block_center.x - BLOCK_WIDTH / 2.0,
            self.block_center.y + dy,
        )
    }

    pub fn above(&self) -> Vec2 {
        self.label_anchor(-BLOCK_HEIGHT / 2.0 - 12.0)
    }

    pub fn below(&self, row: usize) -> Vec2 {
        self.label_anchor(BLOCK_HEIGHT / 2.0 + 14.0 + 16.0 * row as f64)
    }
}

/// Draw the wall, spring and block for an extension `x` metres, vertically
/// centred in the scene.
pub fn draw_spring_assembly(scene: &mut Scene, extension_m: f64) -> SpringLayout {
    let base_y = scene.height / 2.0;
    let block_x = WALL_X + REST_LENGTH_PX + extension_m * PIXELS_PER_METER;

    scene.push(Shape::Rect {
        origin: Vec2::new(WALL_X - 20.0, base_y - 120.0),
        size: Vec2::new(20.0, 240.0),
        fill: Some(Color::gray(200)),
        stroke: None,
        corner_radius: 0.0,
    });

    let end_x = block_x - BLOCK_WIDTH / 2.0;
    let seg = (end_x - WALL_X) / SEGMENTS as f64;
    let mut points = Vec::with_capacity(SEGMENTS + 1);
    points.push(Vec2::new(WALL_X, base_y));
    for i in 1..SEGMENTS {
        let offset = if i % 2 == 0 { COIL_AMPLITUDE } else { -COIL_AMPLITUDE };
        points.push(Vec2::new(WALL_X + i as f64 * seg, base_y + offset));
    }
    points.push(Vec2::new(end_x, base_y));
    scene.push(Shape::Polyline {
        points,
        stroke: Color::gray(70),
        width: 3.0,
    });

    scene.push(Shape::Rect {
        origin: Vec2::new(block_x - BLOCK_WIDTH / 2.0, base_y - BLOCK_HEIGHT / 2.0),
        size: Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
        fill: Some(Color::rgb(80, 120, 240)),
        stroke: Some(Color::rgb(40, 70, 160)),
        corner_radius: 8.0,
    });

    SpringLayout {
        block_center: Vec2::new(block_x, base_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameContext;
    use approx::assert_relative_eq;

    #[test]
    fn test_block_scaled_by_pixels_per_meter() {
        let mut scene = FrameContext::at(0.0).blank_scene(Color::gray(245));
        let layout = draw_spring_assembly(&mut scene, 0.5);
        assert_relative_eq!(layout.block_center.x, 120.0 + 120.0 + 110.0);
        assert_relative_eq!(layout.block_center.y, 175.0);
        assert_eq!(scene.shapes.len(), 3);
    }

    #[test]
    fn test_spring_ends_at_block_face() {
        let mut scene = FrameContext::at(0.0).blank_scene(Color::gray(245));
        let layout = draw_spring_assembly(&mut scene, 0.2);
        let Shape::Polyline { points, .. } = &scene.shapes[1] else {
            panic!("expected spring polyline");
        };
        assert_eq!(points.len(), SEGMENTS + 1);
        assert_relative_eq!(points[0].x, WALL_X);
        assert_relative_eq!(
            points.last().unwrap().x,
            layout.block_center.x - BLOCK_WIDTH / 2.0
        );
    }
}
