//! Saturating arithmetic on 8-bit weights.

/// Clamp some value into the range of an [i8].
pub fn saturate(x: i32) -> i8 {
    x.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Add some (possibly negative) increment to a weight without wrapping.
pub fn saturating_inc(w: i8, inc: i32) -> i8 {
    saturate(w as i32 + inc)
}
