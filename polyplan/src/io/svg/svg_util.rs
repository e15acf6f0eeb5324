use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::primitives::{Point, SPolygon};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgPlanTheme,
    ///Draw the individual blocks of every structure
    #[serde(default = "default_true")]
    pub blocks: bool,
    ///Draw the label of every structure at its center
    #[serde(default = "default_true")]
    pub labels: bool,
    ///Draw the outline of the buildable area (land minus setback)
    #[serde(default)]
    pub buildable_outline: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgPlanTheme::default(),
            blocks: true,
            labels: true,
            buildable_outline: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgPlanTheme {
    pub stroke_width_multiplier: f64,
    pub land_fill: Color,
    pub exclusion_fill: Color,
    pub block_stroke: Color,
    pub footprint_opacity: f64,
}

impl Default for SvgPlanTheme {
    fn default() -> Self {
        SvgPlanTheme::FIELD
    }
}

impl SvgPlanTheme {
    pub const FIELD: SvgPlanTheme = SvgPlanTheme {
        stroke_width_multiplier: 2.0,
        land_fill: Color(0xD8, 0xE8, 0xC0),
        exclusion_fill: Color(0xB0, 0x3A, 0x2E),
        block_stroke: Color(0x2D, 0x2D, 0x2D),
        footprint_opacity: 0.6,
    };

    pub const GRAY: SvgPlanTheme = SvgPlanTheme {
        stroke_width_multiplier: 2.5,
        land_fill: Color(0xD3, 0xD3, 0xD3),
        exclusion_fill: Color(0x63, 0x63, 0x63),
        block_stroke: Color(0x00, 0x00, 0x00),
        footprint_opacity: 0.8,
    };
}

pub fn change_brightness(color: Color, fraction: f64) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f64 * fraction) as u8;
    let g = (g as f64 * fraction) as u8;
    let b = (b as f64 * fraction) as u8;
    Color(r, g, b)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color code: {s}"
        );
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Color(r, g, b))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// SVG has its y-axis pointing down, the planar frame has north pointing up
pub fn svg_coords(Point(x, y): Point) -> (f32, f32) {
    (x as f32, -y as f32)
}

pub fn simple_polygon_data(s_poly: &SPolygon) -> Data {
    points_data(&s_poly.vertices)
}

pub fn points_data(points: &[Point]) -> Data {
    let mut data = Data::new();
    for (i, p) in points.iter().enumerate() {
        data = match i {
            0 => data.move_to(svg_coords(*p)),
            _ => data.line_to(svg_coords(*p)),
        };
    }
    data.close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_with_and_without_hash() {
        assert_eq!(Color::from_str("#4CAF50").unwrap(), Color(0x4C, 0xAF, 0x50));
        assert_eq!(Color::from_str("4caf50").unwrap(), Color(0x4C, 0xAF, 0x50));
        assert!(Color::from_str("#4CAF").is_err());
        assert_eq!(Color(0x4C, 0xAF, 0x50).to_string(), "#4CAF50");
    }
}
