//! Hex grid geometry with axial coordinates
//!
//! Flat-top orientation. The pixel projection is rotated by [`MAP_ROTATION`]
//! to align the grid with the screen; the rotation affects pixel mapping
//! only, never logical adjacency.

use serde::{Deserialize, Serialize};

/// Screen-alignment rotation for the pixel projection, in radians
pub const MAP_ROTATION: f64 = std::f64::consts::FRAC_PI_6;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Axial manhattan distance (|dq| + |dr|), the city-spacing metric
    pub fn axial_distance(&self, other: Hex) -> i32 {
        (self.q - other.q).abs() + (self.r - other.r).abs()
    }

    /// Hex-grid distance between two hexes (cube metric)
    pub fn distance_to(&self, other: Hex) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors in the fixed direction order
    pub fn neighbors(&self) -> [Hex; 6] {
        let mut out = [*self; 6];
        for (i, hex) in out.iter_mut().enumerate() {
            *hex = self.neighbor(i as u8);
        }
        out
    }
}

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
/// Direction index i faces hex edge i; border logic relies on this order.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),   // E
    (1, -1),  // NE
    (0, -1),  // NW
    (-1, 0),  // W
    (-1, 1),  // SW
    (0, 1),   // SE
];

/// Convert axial coordinates to the pixel center of a hex
pub fn hex_to_pixel(q: i32, r: i32, size: f64) -> (f64, f64) {
    let x = size * 1.5 * f64::from(q);
    let y = size * SQRT_3 * (f64::from(r) + f64::from(q) * 0.5);
    rotate(x, y, MAP_ROTATION)
}

/// Convert a pixel position back to the containing hex
pub fn pixel_to_hex(px: f64, py: f64, size: f64) -> Hex {
    let (x, y) = rotate(px, py, -MAP_ROTATION);
    let q = (2.0 / 3.0 * x) / size;
    let r = (-1.0 / 3.0 * x + SQRT_3 / 3.0 * y) / size;
    axial_round(q, r)
}

/// Round fractional axial coordinates to the nearest hex.
///
/// Rounds each cube component, then recomputes whichever took the largest
/// rounding error from the other two so q + r + s = 0 holds exactly.
pub fn axial_round(q: f64, r: f64) -> Hex {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    Hex::new(rq as i32, rr as i32)
}

/// The six corner points of a flat-top hexagon centered at (x, y),
/// at 0, 60, ..., 300 degrees offset by the map rotation
pub fn hex_corners(x: f64, y: f64, size: f64) -> [(f64, f64); 6] {
    let mut corners = [(0.0, 0.0); 6];
    for (i, corner) in corners.iter_mut().enumerate() {
        let angle = MAP_ROTATION + std::f64::consts::FRAC_PI_3 * i as f64;
        *corner = (x + size * angle.cos(), y + size * angle.sin());
    }
    corners
}

fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
