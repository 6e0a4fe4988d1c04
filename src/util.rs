//! Integer helpers shared by drivers and sensors.

/// Linear integer remap of `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Truncates toward zero and does not clamp: inputs outside the source range
/// map outside the target range.  A degenerate source range maps everything
/// to `out_min`.  Intermediate math is widened, so no input overflows; a
/// result outside `i32` saturates.
pub const fn remap(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let scaled = (x as i128 - in_min as i128) * (out_max as i128 - out_min as i128)
        / (in_max as i128 - in_min as i128)
        + out_min as i128;
    if scaled > i32::MAX as i128 {
        i32::MAX
    } else if scaled < i32::MIN as i128 {
        i32::MIN
    } else {
        scaled as i32
    }
}

/// Percent (0–100) to an 8-bit compare value (0–255).
pub const fn percent_to_duty(percent: u8) -> u8 {
    let p = if percent > 100 { 100 } else { percent };
    remap(p as i32, 0, 100, 0, 255) as u8
}
