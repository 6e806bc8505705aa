/// Converts a real coordinate to an integer coordinate by truncating toward zero.
///
/// This is not a floor: `-3.9` becomes `-3`. Values outside the range of an `i32` saturate to
/// `i32::MIN` or `i32::MAX` and `NaN` becomes zero.
///
/// # Examples
///
/// ```
/// # use sponge_util::math::truncate_coord;
/// assert_eq!(truncate_coord(3.9), 3);
/// assert_eq!(truncate_coord(-3.9), -3);
/// assert_eq!(truncate_coord(-0.5), 0);
/// assert_eq!(truncate_coord(1e12), i32::MAX);
/// assert_eq!(truncate_coord(f64::NAN), 0);
/// ```
#[inline]
pub fn truncate_coord(value: f64) -> i32 {
    value as i32
}

/// Divides x by y rounding down to the nearest integer.
///
/// # Examples
///
/// ```
/// # use sponge_util::math::div_floor;
/// assert_eq!(div_floor(31, 16), 1);
/// assert_eq!(div_floor(-1, 16), -1);
/// assert_eq!(div_floor(-16, 16), -1);
/// assert_eq!(div_floor(-17, 16), -2);
/// assert_eq!(div_floor(-17, -16), 1);
/// ```
pub const fn div_floor(x: i32, y: i32) -> i32 {
    let mut r = x / y;

    if (x ^ y) < 0 && (r * y != x) {
        r -= 1;
    }

    r
}
