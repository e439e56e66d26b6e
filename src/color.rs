/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashsets.
 *
 * Flashsets is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashsets is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashsets.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::ops::Deref;

use ratatui::style::Color as RatColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

#[repr(transparent)]
pub(crate) struct Percent(f64);

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&value),
            "Value must be in the range [0, 1]"
        );
        Self(value)
    }
}

impl Deref for Percent {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Color {
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn blend_with(self, other: Color, pct_other: impl Into<Percent>) -> Self {
        let pct_other = *pct_other.into();
        let pct_self = 1.0 - pct_other;
        Self::new(
            ((self.r as f64 * pct_self) + (other.r as f64 * pct_other)) as u8,
            ((self.g as f64 * pct_self) + (other.g as f64 * pct_other)) as u8,
            ((self.b as f64 * pct_self) + (other.b as f64 * pct_other)) as u8,
        )
    }
}

impl From<Color> for RatColor {
    fn from(value: Color) -> Self {
        RatColor::Rgb(value.r, value.g, value.b)
    }
}

pub struct LinearGradient {
    colors: Vec<Color>,
}

const TRAFFIC_LIGHT: [Color; 3] = [Color::GREEN, Color::YELLOW, Color::RED];

impl LinearGradient {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let colors = colors.into_iter().collect::<Vec<_>>();
        debug_assert!(!colors.is_empty(), "Gradient needs at least one color");

        Self { colors }
    }

    ///Green through yellow to red, for countdowns and accuracy.
    pub fn traffic_light() -> Self {
        Self::new(TRAFFIC_LIGHT)
    }

    pub fn sample(&self, progress: f64) -> Color {
        let last = self.colors.len().saturating_sub(1);

        if progress >= 1.0 || last == 0 {
            return self.colors[last];
        }
        if progress <= 0.0 {
            return self.colors[0];
        }

        let scaled = last as f64 * progress;
        let floor = scaled.floor();

        let left = floor as usize;
        let right = left + 1;

        self.colors[left].blend_with(self.colors[right], scaled - floor)
    }
}
