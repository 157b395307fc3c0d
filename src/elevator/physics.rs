//! Motion of the cabin. Pure functions of position and elapsed time, so the
//! integration step is deterministic and testable without a clock.

/// Lowest and highest reachable position for an elevator with `n_floors` floors.
pub fn travel_limits(n_floors: usize) -> (f64, f64) {
    (-0.5, n_floors as f64 - 0.5)
}

/// Clamps `value` into `[min, max]`. The flag is set when the value had to be moved.
pub fn clamp(min: f64, max: f64, value: f64) -> (f64, bool) {
    if value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

/**
 * Moves the cabin `elapsed` seconds along `direction` (-1, 0 or 1).
 *
 * Returns the new position, clamped to the travel limits, and whether the
 * clamp was hit. A negative `elapsed` moves the cabin backwards; callers
 * measure elapsed time with a monotonic clock.
 */
pub fn integrate(position: f64, speed: f64, direction: i8, elapsed: f64, n_floors: usize) -> (f64, bool) {
    let candidate = position + speed * f64::from(direction) * elapsed;
    let (min, max) = travel_limits(n_floors);
    clamp(min, max, candidate)
}

/// The floor whose sensor is triggered at `position`, if any.
pub fn floor_signal(position: f64, margin: f64, n_floors: usize) -> Option<usize> {
    let nearest = position.round();
    if (nearest - position).abs() >= margin {
        return None;
    }
    // Rounding the travel limits lands one floor outside the building.
    if nearest < 0.0 || nearest >= n_floors as f64 {
        return None;
    }
    Some(nearest as usize)
}
