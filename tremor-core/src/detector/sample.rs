//! Acceleration sample type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One 3-axis acceleration sample in units of standard gravity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample {
    /// All axes at zero
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a sample from per-axis acceleration (g)
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise difference `self - previous`
    pub fn delta(&self, previous: &Sample) -> Sample {
        Sample {
            x: self.x - previous.x,
            y: self.y - previous.y,
            z: self.z - previous.z,
        }
    }

    /// Euclidean norm of the three axes
    pub fn norm(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

impl From<[f32; 3]> for Sample {
    fn from(axes: [f32; 3]) -> Self {
        Self::new(axes[0], axes[1], axes[2])
    }
}
