// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A packed `0xAARRGGBB` colour, as produced by the UI description layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Builds a colour from a signed 32-bit value, reinterpreting its bits.
    pub fn from_argb_i32(value: i32) -> Self {
        Self(u32::from_ne_bytes(value.to_ne_bytes()))
    }

    /// The alpha channel.
    pub fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// The red channel.
    pub fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// The green channel.
    pub fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// The blue channel.
    pub fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn channels() {
        let c = Color(0x80_11_22_33);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x11);
        assert_eq!(c.green(), 0x22);
        assert_eq!(c.blue(), 0x33);
        assert_eq!(Color::from_argb_i32(-1), Color(0xFFFF_FFFF));
        assert_eq!(Color::TRANSPARENT.alpha(), 0);
    }
}
