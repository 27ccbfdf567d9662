/// A fill or text colour, expressed in one of the PDF device colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an opaque RGB colour that looks like `(r, g, b)` drawn with opacity `a`
    /// over a white page. PDF fills here are always opaque, so translucent palette
    /// entries are flattened up front.
    pub fn new_rgba_over_white(r: u8, g: u8, b: u8, a: u8) -> Colour {
        let alpha = a as f32 / 255.0;
        let white = (255.0 * (1.0 - alpha)) as u8;
        let flatten = |c: u8| (c as f32 * alpha) as u8 + white;
        Colour::new_rgb_bytes(flatten(r), flatten(g), flatten(b))
    }

    /// Create a new colour in the Gray space, g ranges from 0 to 255
    pub const fn new_grey_bytes(g: u8) -> Colour {
        Colour::Grey {
            g: g as f32 / 255.0,
        }
    }
}

/// Colours shared by the generated documents
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Body text
    pub const CHARCOAL: Colour = Colour::new_rgb_bytes(50, 50, 50);
    /// Captions and table headings
    pub const SLATE: Colour = Colour::new_rgb_bytes(100, 100, 100);
    /// Separator rules
    pub const SILVER: Colour = Colour::new_rgb_bytes(210, 210, 210);
    /// Invoice banners
    pub const PLUM: Colour = Colour::new_rgb_bytes(103, 60, 79);
    /// Certificate banners
    pub const PURPLE: Colour = Colour::new_rgb_bytes(121, 50, 168);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_colours_are_unchanged_when_flattened() {
        assert_eq!(
            Colour::new_rgba_over_white(121, 50, 168, 255),
            Colour::new_rgb_bytes(121, 50, 168)
        );
    }

    #[test]
    fn translucent_colours_are_lightened_towards_white() {
        let opaque = Colour::new_rgb_bytes(121, 50, 168);
        let faded = Colour::new_rgba_over_white(121, 50, 168, 220);
        match (opaque, faded) {
            (Colour::RGB { r, g, b }, Colour::RGB { r: fr, g: fg, b: fb }) => {
                assert!(fr > r && fg > g && fb > b);
                assert!(fr <= 1.0 && fg <= 1.0 && fb <= 1.0);
            }
            _ => panic!("expected RGB colours"),
        }
        assert_eq!(
            Colour::new_rgba_over_white(0, 0, 0, 0),
            Colour::new_rgb_bytes(255, 255, 255)
        );
    }
}
