//! Initial ball placement: break ball plus a 15-ball triangular rack.

use glam::Vec3;

/// Number of balls in a fresh rack, cue ball included.
pub const RACK_SIZE: usize = 16;

/// Rows in the triangle.
const RACK_ROWS: usize = 5;

/// One ball placement. `id` 0 is the break (cue) ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: u8,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Placement {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Depth between two adjacent rack rows: the row offset of a close-packed
/// triangular lattice of spheres with the given radius.
pub fn row_spacing(ball_radius: f32) -> f32 {
    ball_radius * 2.0 * 0.75_f32.sqrt()
}

/// Lay out the break ball and the rack for a table of the given length.
///
/// Standard layout (viewed from above, break ball toward +Z):
/// ```text
///        1          <- apex, z = -length/4
///      2   3
///    4   5   6
///  7   8   9  10
/// 11 12  13  14 15  <- back row
/// ```
/// Balls within a row are `2·radius` apart, centered on x = 0. Every ball
/// rests on the floor (`y = radius`). Pure: same inputs, same output.
pub fn rack_layout(table_length: f32, ball_radius: f32) -> [Placement; RACK_SIZE] {
    let break_spot = table_length / 4.0;
    let rack_spot = -table_length / 4.0;
    let back = row_spacing(ball_radius);

    let mut placements = [Placement {
        id: 0,
        x: 0.0,
        y: ball_radius,
        z: break_spot,
    }; RACK_SIZE];

    let mut id = 1;
    for row in 0..RACK_ROWS {
        let z = rack_spot - row as f32 * back;
        for col in 0..=row {
            // Offsets in units of radius: row 2 -> -2, 0, +2.
            let offset = (2 * col) as f32 - row as f32;
            placements[id] = Placement {
                id: id as u8,
                x: offset * ball_radius,
                y: ball_radius,
                z,
            };
            id += 1;
        }
    }

    placements
}
