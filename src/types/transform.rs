//! Coordinate and rotation conversions between Java and Bedrock space.
//!
//! Java model coordinates put (0,0,0) at a corner of the 16x16x16 block.
//! Bedrock geometry puts (0,0,0) at the center of the bottom face, so X and Z
//! shift by -8 while Y is unchanged. The two formats also wind rotations in
//! opposite directions.

use super::Axis;
use serde::{Deserialize, Serialize};

/// Half a block in model pixels.
const HALF_BLOCK: f32 = 8.0;

/// Element-level rotation from model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 Java coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Rotation pivot in Bedrock space.
    pub fn target_pivot(&self) -> [f32; 3] {
        to_target_space(self.origin)
    }

    /// Bedrock bone rotation: the inverted angle on the declared axis only.
    pub fn target_rotation(&self) -> [f32; 3] {
        let mut rotation = [0.0; 3];
        rotation[self.axis.index()] = invert_angle(self.angle);
        rotation
    }
}

/// Move a point from corner-origin Java space to center-bottom Bedrock space.
pub fn to_target_space(point: [f32; 3]) -> [f32; 3] {
    let mut out = point;
    for axis in Axis::ALL {
        if axis.is_horizontal() {
            out[axis.index()] -= HALF_BLOCK;
        }
    }
    out
}

/// `(360 - angle) mod 360`, always in `[0, 360)`.
pub fn invert_angle(angle: f32) -> f32 {
    (360.0 - angle).rem_euclid(360.0)
}

/// Integer variant of [`invert_angle`] for blockstate rotation offsets.
pub fn invert_offset(offset: i32) -> i32 {
    (360 - offset).rem_euclid(360)
}
