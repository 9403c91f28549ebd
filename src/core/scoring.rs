/// Score units subtracted per kilometer of distance
pub const DISTANCE_PENALTY_PER_KM: f64 = 0.1;

/// Combine model suitability with the distance penalty
///
/// score = suitability - 0.1 * distance_km
///
/// The result is not clamped and can go negative for distant lockers.
#[inline]
pub fn combined_score(suitability: f64, distance_km: f64) -> f64 {
    suitability - DISTANCE_PENALTY_PER_KM * distance_km
}
