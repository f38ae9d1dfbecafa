use crate::error::MathError;
use crate::math::{Vector3, Vector4};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Linear RGBA color with components nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(Serialize, Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color
    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels
    #[inline]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Parses `rrggbb` or `rrggbbaa`, with an optional leading `#`
    pub fn from_hex(hex: &str) -> crate::Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(MathError::InvalidHexColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| MathError::InvalidHexColor(hex.to_string()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_bytes(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Color from a 3-vector, with the given alpha
    #[inline]
    pub fn from_vector3(v: Vector3, a: f64) -> Self {
        Self::rgba(v.x, v.y, v.z, a)
    }

    #[inline]
    pub fn from_vector4(v: Vector4) -> Self {
        Self::rgba(v.x, v.y, v.z, v.w)
    }

    #[inline]
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.r, self.g, self.b)
    }

    #[inline]
    pub fn to_vector4(&self) -> Vector4 {
        Vector4::new(self.r, self.g, self.b, self.a)
    }

    /// Channelwise product
    #[inline]
    pub fn modulate(&self, other: &Self) -> Self {
        Self::rgba(self.r * other.r, self.g * other.g, self.b * other.b, self.a * other.a)
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::rgba(
            crate::math::lerp(self.r, other.r, t),
            crate::math::lerp(self.g, other.g, t),
            crate::math::lerp(self.b, other.b, t),
            crate::math::lerp(self.a, other.a, t),
        )
    }

    /// Clamps every channel to `[0, 1]`
    pub fn clamp(&self) -> Self {
        Self::rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Rounds each channel to 8 bits, saturating out-of-range values
    pub fn to_bytes(&self) -> [u8; 4] {
        // `as` saturates float-to-int casts, and NaN maps to 0.
        let byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    /// `#rrggbbaa`, lowercase
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_bytes();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 4]> for Color {
    #[inline]
    fn from(a: [f64; 4]) -> Self {
        Self::rgba(a[0], a[1], a[2], a[3])
    }
}

impl From<Color> for [f64; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl_approx_eq!(Color);

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::rgba(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::rgba(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::rgba(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Mul for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.modulate(&rhs)
    }
}

impl Index<usize> for Color {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            3 => &self.a,
            _ => panic!("Color index out of range: {}", index),
        }
    }
}

impl IndexMut<usize> for Color {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            3 => &mut self.a,
            _ => panic!("Color index out of range: {}", index),
        }
    }
}
