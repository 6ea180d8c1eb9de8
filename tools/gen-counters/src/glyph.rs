//! Monochrome glyph masks: block digits and procedural status icons

/// Boolean coverage grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = true;
        }
    }

    /// Number of covered pixels
    pub fn coverage(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Covered pixel coordinates
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| (i as u32 % self.width, i as u32 / self.width))
    }
}

pub const DIGIT_WIDTH: u32 = 5;
pub const DIGIT_HEIGHT: u32 = 7;

/// 5×7 block digits, one byte per row, low 5 bits used (MSB = left column)
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

/// Render a decimal number with each glyph cell scaled to `scale`×`scale`
/// pixels and one cell of spacing between digits.
pub fn number_mask(value: u32, scale: u32) -> Mask {
    let scale = scale.max(1);
    let digits: Vec<usize> = value
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();

    let count = digits.len() as u32;
    let width = (count * DIGIT_WIDTH + (count - 1)) * scale;
    let mut mask = Mask::new(width, DIGIT_HEIGHT * scale);

    for (i, &digit) in digits.iter().enumerate() {
        let origin = i as u32 * (DIGIT_WIDTH + 1) * scale;
        for (row, bits) in DIGITS[digit].iter().enumerate() {
            for col in 0..DIGIT_WIDTH {
                if bits & (1 << (DIGIT_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = origin + col * scale;
                let y0 = row as u32 * scale;
                for y in y0..y0 + scale {
                    for x in x0..x0 + scale {
                        mask.set(x, y);
                    }
                }
            }
        }
    }
    mask
}

/// Build a square mask from a predicate over normalized coordinates
/// (pixel centers, `0.0..1.0`).
fn shape_mask(size: u32, inside: impl Fn(f32, f32) -> bool) -> Mask {
    let mut mask = Mask::new(size, size);
    let s = size as f32;
    for y in 0..size {
        for x in 0..size {
            let u = (x as f32 + 0.5) / s;
            let v = (y as f32 + 0.5) / s;
            if inside(u, v) {
                mask.set(x, y);
            }
        }
    }
    mask
}

fn in_circle(u: f32, v: f32, cu: f32, cv: f32, r: f32) -> bool {
    let du = u - cu;
    let dv = v - cv;
    du * du + dv * dv <= r * r
}

/// Teardrop flame: round base tapering to a tip at the top, with a notch
/// cut from the base to suggest an inner flame.
pub fn flame_mask(size: u32) -> Mask {
    const BASE_V: f32 = 0.64;
    const BASE_R: f32 = 0.3;
    const TIP_V: f32 = 0.06;

    shape_mask(size, |u, v| {
        let body = if v <= BASE_V {
            v >= TIP_V && (u - 0.5).abs() <= BASE_R * (v - TIP_V) / (BASE_V - TIP_V)
        } else {
            in_circle(u, v, 0.5, BASE_V, BASE_R)
        };
        let inner = in_circle(u, v, 0.5, 0.74, 0.1) || {
            v > 0.5 && v <= 0.74 && (u - 0.5).abs() <= 0.1 * (v - 0.5) / 0.24
        };
        body && !inner
    })
}

/// Round-bottom flask: lipped neck over a bulb with a liquid line.
pub fn flask_mask(size: u32) -> Mask {
    shape_mask(size, |u, v| {
        let lip = (0.33..=0.67).contains(&u) && (0.05..=0.13).contains(&v);
        let neck = (0.41..=0.59).contains(&u) && (0.13..=0.45).contains(&v);
        let bulb = in_circle(u, v, 0.5, 0.68, 0.28);
        // Gap between the empty and filled parts of the bulb
        let meniscus = (0.58..=0.62).contains(&v) && (0.27..=0.73).contains(&u);
        (lip || neck || bulb) && !meniscus
    })
}
