//! Drivetrain geometry used to keep the redundant fields consistent and to turn rotation
//! counts into distance and engine speed.
//!
//! The store never enforces that `rear_tire_circ` matches `rear_tire_diam`, or that
//! `final_drive_ratio` matches `final_drive_gears`. These helpers are what a consumer uses to
//! derive one from the other.

use crate::codec::GearTeeth;
use core::f64::consts::PI;

const MM_PER_KM: f64 = 1_000_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

pub fn circumference_from_diameter(diameter_mm: f64) -> f64 {
    diameter_mm * PI
}

pub fn diameter_from_circumference(circumference_mm: f64) -> f64 {
    circumference_mm / PI
}

impl GearTeeth {
    /// Overall input:output ratio of both stages, `None` if a driving gear has no teeth.
    pub fn ratio(self) -> Option<f64> {
        if self.primary_drive == 0 || self.secondary_drive == 0 {
            return None;
        }
        let primary = self.primary_driven as f64 / self.primary_drive as f64;
        let secondary = self.secondary_driven as f64 / self.secondary_drive as f64;
        Some(primary * secondary)
    }
}

/// Distance covered by the rear wheel for a number of clutch bell rotations.
///
/// Returns 0 for a non-positive ratio, which is what an unconfigured region holds.
pub fn wheel_distance_km(
    clutch_rotations: u32,
    final_drive_ratio: f64,
    circumference_mm: f64,
) -> f64 {
    if final_drive_ratio <= 0.0 {
        return 0.0;
    }
    clutch_rotations as f64 / final_drive_ratio * circumference_mm / MM_PER_KM
}

/// Crankshaft speed from flywheel pulses (one per revolution) counted over `window_ms`.
pub fn engine_rpm(flywheel_pulses: u32, window_ms: u32) -> Option<f64> {
    (window_ms != 0).then(|| flywheel_pulses as f64 * MS_PER_MINUTE / window_ms as f64)
}

/// Average speed over `window_ms`.
pub fn speed_kmh(distance_km: f64, window_ms: u32) -> Option<f64> {
    (window_ms != 0).then(|| distance_km * MS_PER_HOUR / window_ms as f64)
}
