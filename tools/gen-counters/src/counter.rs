//! Coin-style counter rendering

use image::{Rgba, RgbaImage};

use crate::error::CounterError;
use crate::glyph::{Mask, flame_mask, flask_mask, number_mask};
use crate::palette::{CounterKind, Palette, StatusIcon};

pub const DEFAULT_SIZE: u32 = 128;
pub const MIN_SIZE: u32 = 32;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// What is drawn on the coin's inner face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Value(u32),
    Icon(StatusIcon),
}

impl Face {
    pub fn for_kind(kind: CounterKind) -> Self {
        match (kind.damage(), kind.icon()) {
            (Some(value), _) => Face::Value(value),
            (None, Some(icon)) => Face::Icon(icon),
            (None, None) => Face::Value(0),
        }
    }
}

/// Coin geometry
#[derive(Debug, Clone, PartialEq)]
pub struct CounterStyle {
    /// Square image edge in pixels
    pub size: u32,
    /// Black ring between the outer edge and the outer fill
    pub border_width: u32,
    /// Inner face radius relative to the outer radius
    pub inner_ratio: f32,
    /// Black outline around digits and icons
    pub outline_width: u32,
}

impl Default for CounterStyle {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

impl CounterStyle {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            border_width: 4,
            inner_ratio: 0.67,
            outline_width: 3,
        }
    }

    pub fn center(&self) -> f32 {
        (self.size / 2) as f32
    }

    /// Radius of the black outer edge
    pub fn outer_radius(&self) -> f32 {
        (self.size / 2).saturating_sub(2) as f32
    }

    /// Radius of the black ring around the inner face
    pub fn inner_radius(&self) -> f32 {
        (self.outer_radius() * self.inner_ratio).floor()
    }

    /// Black ring around the inner face, half the outer border
    pub fn inner_border(&self) -> f32 {
        (self.border_width / 2) as f32
    }

    /// Pixel scale of one digit cell
    fn digit_scale(&self, value: u32) -> u32 {
        // Three-digit values use a smaller face to fit the inner circle
        let font_px = if value >= 100 { 40 } else { 50 };
        (font_px * self.size / DEFAULT_SIZE / 10).max(1)
    }

    fn icon_size(&self) -> u32 {
        (self.inner_radius() * 1.4) as u32
    }
}

/// Fill every pixel whose center lies within `radius` of the image center.
fn fill_disc(image: &mut RgbaImage, center: f32, radius: f32, color: Rgba<u8>) {
    let r2 = radius * radius;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if dx * dx + dy * dy <= r2 {
            *pixel = color;
        }
    }
}

/// Draw `mask` centered on the image: first dilated by `outline` in black,
/// then the mask itself in `fill`.
fn stamp_centered(image: &mut RgbaImage, mask: &Mask, fill: Rgba<u8>, outline: u32) {
    let left = (image.width() as i64 - mask.width() as i64) / 2;
    let top = (image.height() as i64 - mask.height() as i64) / 2;
    let reach = outline as i64;

    let mut put = |x: i64, y: i64, color: Rgba<u8>| {
        if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
            image.put_pixel(x as u32, y as u32, color);
        }
    };

    for (mx, my) in mask.pixels() {
        let x = left + mx as i64;
        let y = top + my as i64;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                put(x + dx, y + dy, BLACK);
            }
        }
    }
    for (mx, my) in mask.pixels() {
        put(left + mx as i64, top + my as i64, fill);
    }
}

/// Render one counter as an RGBA image with a transparent background.
pub fn render_counter(
    face: Face,
    palette: &Palette,
    style: &CounterStyle,
) -> Result<RgbaImage, CounterError> {
    if style.size < MIN_SIZE {
        return Err(CounterError::InvalidSize(style.size));
    }

    let mut image = RgbaImage::new(style.size, style.size);
    let center = style.center();
    let outer = style.outer_radius();
    let inner = style.inner_radius();

    fill_disc(&mut image, center, outer, BLACK);
    fill_disc(&mut image, center, outer - style.border_width as f32, palette.outer);
    fill_disc(&mut image, center, inner, BLACK);
    fill_disc(&mut image, center, inner - style.inner_border(), palette.inner);

    let mask = match face {
        Face::Value(value) => number_mask(value, style.digit_scale(value)),
        Face::Icon(StatusIcon::Flame) => flame_mask(style.icon_size()),
        Face::Icon(StatusIcon::Flask) => flask_mask(style.icon_size()),
    };
    stamp_centered(&mut image, &mask, WHITE, style.outline_width);

    Ok(image)
}

/// Render a built-in counter.
pub fn render_kind(kind: CounterKind, style: &CounterStyle) -> Result<RgbaImage, CounterError> {
    render_counter(Face::for_kind(kind), &kind.palette()?, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(style: &CounterStyle, x: u32, y: u32) -> f32 {
        let c = style.center();
        let dx = x as f32 + 0.5 - c;
        let dy = y as f32 + 0.5 - c;
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn test_default_geometry() {
        let style = CounterStyle::default();
        assert_eq!(style.outer_radius(), 62.0);
        assert_eq!(style.inner_radius(), 41.0);
        assert_eq!(style.icon_size(), 57);
        assert_eq!(style.digit_scale(10), 5);
        assert_eq!(style.digit_scale(100), 4);
    }

    #[test]
    fn test_rings() {
        let style = CounterStyle::default();
        let image = render_kind(CounterKind::Damage10, &style).unwrap();
        let palette = CounterKind::Damage10.palette().unwrap();

        assert_eq!(image.dimensions(), (128, 128));
        // Transparent outside the coin
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(127, 127)[3], 0);
        // Outer edge, outer fill, inner ring, inner face going down from the top
        assert_eq!(*image.get_pixel(64, 4), BLACK);
        assert_eq!(*image.get_pixel(64, 10), palette.outer);
        assert_eq!(*image.get_pixel(64, 24), BLACK);
        assert_eq!(*image.get_pixel(64, 100), palette.inner);
    }

    #[test]
    fn test_inner_ring_follows_border_width() {
        let style = CounterStyle {
            border_width: 12,
            ..CounterStyle::default()
        };
        assert_eq!(style.inner_border(), 6.0);

        let image = render_kind(CounterKind::Burn, &style).unwrap();
        let palette = CounterKind::Burn.palette().unwrap();
        // Inner ring spans radius 35..=41: pixels 39.5 and 36.5 from the center
        assert_eq!(*image.get_pixel(64, 24), BLACK);
        assert_eq!(*image.get_pixel(64, 27), BLACK);
        // Below the icon and 33.5 from the center
        assert_eq!(*image.get_pixel(64, 97), palette.inner);
        // Outer fill shrinks with the wider border: radius 50
        assert_eq!(*image.get_pixel(64, 12), BLACK);
        assert_eq!(*image.get_pixel(64, 16), palette.outer);
    }

    #[test]
    fn test_digits_stay_inside_inner_face() {
        let style = CounterStyle::default();
        for kind in [CounterKind::Damage10, CounterKind::Damage50, CounterKind::Damage100] {
            let image = render_kind(kind, &style).unwrap();
            let mut white = 0;
            for (x, y, pixel) in image.enumerate_pixels() {
                if *pixel == WHITE {
                    white += 1;
                    assert!(distance(&style, x, y) < style.inner_radius() - style.inner_border());
                }
            }
            assert!(white > 0, "{kind:?} has no digits");
        }
    }

    #[test]
    fn test_digits_are_outlined() {
        let style = CounterStyle::default();
        let image = render_kind(CounterKind::Damage50, &style).unwrap();
        let palette = CounterKind::Damage50.palette().unwrap();

        // No white pixel touches the inner fill directly
        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel != WHITE {
                continue;
            }
            for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                assert_ne!(*image.get_pixel(nx, ny), palette.inner);
            }
        }
    }

    #[test]
    fn test_icons_drawn() {
        let style = CounterStyle::default();
        for kind in [CounterKind::Burn, CounterKind::Poison] {
            let image = render_kind(kind, &style).unwrap();
            assert!(image.pixels().any(|p| *p == WHITE), "{kind:?} has no icon");
        }
    }

    #[test]
    fn test_faces_differ() {
        let style = CounterStyle::default();
        let burn = render_counter(
            Face::Icon(StatusIcon::Flame),
            &CounterKind::Burn.palette().unwrap(),
            &style,
        )
        .unwrap();
        let flask = render_counter(
            Face::Icon(StatusIcon::Flask),
            &CounterKind::Burn.palette().unwrap(),
            &style,
        )
        .unwrap();
        assert_ne!(burn, flask);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let style = CounterStyle::default();
        let a = render_kind(CounterKind::Poison, &style).unwrap();
        let b = render_kind(CounterKind::Poison, &style).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scaled_size() {
        let style = CounterStyle::with_size(256);
        assert_eq!(style.digit_scale(10), 10);
        let image = render_kind(CounterKind::Damage100, &style).unwrap();
        assert_eq!(image.dimensions(), (256, 256));
    }

    #[test]
    fn test_too_small_rejected() {
        let result = render_kind(CounterKind::Burn, &CounterStyle::with_size(8));
        assert!(matches!(result, Err(CounterError::InvalidSize(8))));
    }
}
