//! Jitter math for naturalistic schedule variance.
//
//  This module is deliberately pure: no clock, no global RNG. The engine
//  draws one offset per slot at registration time and applies it here.

use rand::Rng;

/// Daily post times vary by up to this many minutes in either direction.
pub const DEFAULT_JITTER_MINUTES: i32 = 30;

/// Uniform random offset in `[-bound_minutes, +bound_minutes]`.
pub fn draw_offset<R: Rng + ?Sized>(rng: &mut R, bound_minutes: i32) -> i32 {
    rng.gen_range(-bound_minutes..=bound_minutes)
}

/// Apply a minute offset to a time of day, wrapping across midnight.
///
/// Negative offsets must never produce negative minutes or a negative
/// hour rollover, hence the euclidean remainder on the day total.
pub fn apply_offset(hour: u32, minute: u32, offset_minutes: i32) -> (u32, u32) {
    let total = (hour as i32 * 60 + minute as i32 + offset_minutes).rem_euclid(24 * 60);
    ((total / 60) as u32, (total % 60) as u32)
}
