//! Fixed-point coordinates
//!
//! `Int26_6` / `Point26_6` carry caret and baseline positions with
//! 1/64 pixel precision. `Fix32` is the 24.8 format of the measurement
//! context (256 subunits per pixel).

use crate::constants::{FIX32_ONE, FIXED_26_6_ONE};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 26.6 fixed-point scalar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int26_6(pub i32);

impl Int26_6 {
    pub const ZERO: Self = Self(0);

    /// Whole pixels to 26.6
    pub const fn from_int(i: i32) -> Self {
        Self(i << 6)
    }

    /// Nearest 26.6 value to a pixel quantity
    pub fn from_f32(v: f32) -> Self {
        Self((v * FIXED_26_6_ONE as f32).round() as i32)
    }

    /// Largest whole pixel <= self
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Nearest whole pixel (halves round up)
    pub const fn round(self) -> i32 {
        (self.0 + 32) >> 6
    }

    /// Smallest whole pixel >= self
    pub const fn ceil(self) -> i32 {
        (self.0 + 63) >> 6
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / FIXED_26_6_ONE as f32
    }
}

impl fmt::Display for Int26_6 {
    // "pixels:64ths", e.g. "12:05"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}:{:02}", sign, abs >> 6, abs & 0x3f)
    }
}

impl Add for Int26_6 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Int26_6 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Int26_6 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AddAssign for Int26_6 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Int26_6 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// 26.6 fixed-point point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point26_6 {
    pub x: Int26_6,
    pub y: Int26_6,
}

impl Point26_6 {
    pub const fn new(x: Int26_6, y: Int26_6) -> Self {
        Self { x, y }
    }

    /// Point at whole-pixel coordinates
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: Int26_6::from_int(x),
            y: Int26_6::from_int(y),
        }
    }
}

impl Add for Point26_6 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point26_6 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 24.8 fixed-point scalar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fix32(pub i32);

impl Fix32 {
    pub const ZERO: Self = Self(0);

    /// Nearest 24.8 value to a pixel quantity
    pub fn from_f32(v: f32) -> Self {
        Self((v * FIX32_ONE as f32).round() as i32)
    }

    /// Whole pixels, truncated toward zero
    pub const fn to_pixels(self) -> i32 {
        self.0 / FIX32_ONE
    }
}

impl Add for Fix32 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fix32 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
