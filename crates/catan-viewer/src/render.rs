//! Raster rendering of a laid-out board.
//!
//! Tiles are drawn as pointy-top hexes at their axial coordinates, coloured by
//! material and labelled with their id. Number tokens show the rolled number
//! above a row of production pips (one pip per way to roll it with two dice,
//! red for 6 and 8). Ports sit just off the tile side they dock on, showing
//! their trade ratio with the port id beside them.

use ab_glyph::{Font, FontRef, InvalidFont, PxScale, ScaleFont};
use catan_core::{Board, Harbor, HexCoord, Material};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut, draw_text_mut,
    text_size,
};
use imageproc::point::Point;
use imageproc::rect::Rect;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

const FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);
const TOKEN: Rgb<u8> = Rgb([250, 240, 210]);
const PIP: Rgb<u8> = Rgb([20, 20, 20]);
const HOT_PIP: Rgb<u8> = Rgb([200, 30, 30]);
const ROBBER: Rgb<u8> = Rgb([0, 0, 0]);
const ROBBER_RIM: Rgb<u8> = Rgb([255, 255, 255]);
const GENERIC_PORT: Rgb<u8> = Rgb([255, 165, 0]);
const LABEL: Rgb<u8> = Rgb([255, 255, 255]);

/// Fill colour for a material
pub fn material_color(material: Material) -> Rgb<u8> {
    match material {
        Material::Wood => Rgb([0x5E, 0x26, 0x05]),
        Material::Wool => Rgb([0x4C, 0xAF, 0x50]),
        Material::Cereal => Rgb([0xFF, 0xD7, 0x00]),
        Material::Clay => Rgb([0xB2, 0x22, 0x22]),
        Material::Mineral => Rgb([0x77, 0x88, 0x99]),
        Material::Desert => Rgb([0xF5, 0xDE, 0xB3]),
    }
}

fn port_color(harbor: Harbor) -> Rgb<u8> {
    match harbor {
        Harbor::Generic => GENERIC_PORT,
        Harbor::Specific(material) => material_color(material),
    }
}

/// Black or white, whichever reads better on `background`
fn ink(background: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = background.0;
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 140_000 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

/// Production pips for a number token
pub fn pips(number: u8) -> u32 {
    6u32.saturating_sub((7 - i32::from(number)).unsigned_abs())
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Hex radius in pixels
    pub tile_size: f64,
    /// Sea border around the board, in pixels
    pub margin: u32,
    pub background: Rgb<u8>,
    /// Draw the material legend on the right
    pub legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 80.0,
            margin: 60,
            background: Rgb([0x46, 0x82, 0xB4]),
            legend: true,
        }
    }
}

pub struct BoardRenderer {
    config: RenderConfig,
    font: FontRef<'static>,
}

/// Pixel frame for one board: where the origin hex lands in the image
struct Frame {
    origin: (f64, f64),
    width: u32,
    height: u32,
    legend_x: u32,
}

impl BoardRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, InvalidFont> {
        let font = FontRef::try_from_slice(FONT)?;
        Ok(Self { config, font })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn legend_width(&self) -> u32 {
        if self.config.legend {
            (self.config.tile_size * 2.2) as u32
        } else {
            0
        }
    }

    fn frame(&self, board: &Board) -> Frame {
        let size = self.config.tile_size;
        let margin = f64::from(self.config.margin);

        let centers: Vec<(f64, f64)> = board.tile_coords().map(|(_, c)| c.to_pixel(size)).collect();
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        for (x, y) in centers {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let board_width = (max_x - min_x + 2.0 * size + 2.0 * margin).ceil() as u32;
        let height = (max_y - min_y + 2.0 * size + 2.0 * margin).ceil() as u32;
        Frame {
            origin: (margin + size - min_x, margin + size - min_y),
            width: board_width + self.legend_width(),
            height,
            legend_x: board_width,
        }
    }

    fn center(frame: &Frame, coord: HexCoord, size: f64) -> (f64, f64) {
        let (x, y) = coord.to_pixel(size);
        (frame.origin.0 + x, frame.origin.1 + y)
    }

    /// Pixel position of a tile's centre in the rendered image
    pub fn tile_center(&self, board: &Board, coord: HexCoord) -> (i32, i32) {
        pixel(Self::center(&self.frame(board), coord, self.config.tile_size))
    }

    /// Draw the placed tiles, ports and robber
    pub fn render(&self, board: &Board) -> RgbImage {
        let size = self.config.tile_size;
        let frame = self.frame(board);
        let mut image = RgbImage::from_pixel(frame.width, frame.height, self.config.background);

        for (tile, coord) in board.tile_coords() {
            let center = Self::center(&frame, coord, size);
            let fill = material_color(tile.material);
            draw_polygon_mut(&mut image, &hex_corners(center, size), OUTLINE);
            draw_polygon_mut(&mut image, &hex_corners(center, size - 3.0), fill);

            let (cx, cy) = pixel(center);
            if let Some(number) = tile.number {
                self.draw_token(&mut image, (cx, cy), size, number);
            }
            let below = cy + (size * 0.55) as i32;
            self.draw_centered_text(&mut image, &tile.id, (cx, below), size * 0.16, ink(fill));
        }

        for (port_id, placement) in board.port_positions() {
            let (Some(coord), Some(port)) = (board.coord_of(&placement.tile_id), board.port(port_id)) else {
                continue;
            };
            let center = Self::center(&frame, coord, size);
            let toward = Self::center(&frame, coord.neighbor(placement.direction), size);
            self.draw_port(&mut image, center, toward, size, port_id, port.material);
        }

        if let Some(robber) = board.robber_tile() {
            if let Some(coord) = board.coord_of(&robber.id) {
                let center = pixel(Self::center(&frame, coord, size));
                let radius = (size / 3.0).round() as i32;
                draw_filled_circle_mut(&mut image, center, radius + 2, ROBBER_RIM);
                draw_filled_circle_mut(&mut image, center, radius, ROBBER);
                self.draw_centered_text(&mut image, "R", center, size * 0.3, ROBBER_RIM);
            }
        }

        if self.config.legend {
            self.draw_legend(&mut image, frame.legend_x);
        }
        image
    }

    fn draw_token(&self, image: &mut RgbImage, (cx, cy): (i32, i32), size: f64, number: u8) {
        let radius = (size * 0.38).round() as i32;
        draw_filled_circle_mut(image, (cx, cy), radius + 2, OUTLINE);
        draw_filled_circle_mut(image, (cx, cy), radius, TOKEN);

        let hot = number == 6 || number == 8;
        let color = if hot { HOT_PIP } else { PIP };
        let text_y = cy - (size * 0.08).round() as i32;
        self.draw_centered_text(image, &number.to_string(), (cx, text_y), size * 0.3, color);

        let count = pips(number) as i32;
        let pip_radius = (size * 0.04).round().max(2.0) as i32;
        let step = pip_radius * 3;
        let start = cx - step * (count - 1) / 2;
        let row = cy + (size * 0.2).round() as i32;
        for i in 0..count {
            draw_filled_circle_mut(image, (start + step * i, row), pip_radius, color);
        }
    }

    fn draw_port(
        &self,
        image: &mut RgbImage,
        center: (f64, f64),
        toward: (f64, f64),
        size: f64,
        port_id: &str,
        harbor: Harbor,
    ) {
        let (dx, dy) = (toward.0 - center.0, toward.1 - center.1);
        let length = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = (dx / length, dy / length);
        let along = |distance: f64| (center.0 + ux * distance, center.1 + uy * distance);

        let apothem = size * SQRT_3 / 2.0;
        let radius = size * 0.25;
        let edge = along(apothem);
        let marker = along(apothem + size * 0.3);

        // three pixels wide
        for offset in [-1.0, 0.0, 1.0] {
            let (ox, oy) = (-uy * offset, ux * offset);
            draw_line_segment_mut(
                image,
                ((edge.0 + ox) as f32, (edge.1 + oy) as f32),
                ((marker.0 + ox) as f32, (marker.1 + oy) as f32),
                OUTLINE,
            );
        }

        let fill = port_color(harbor);
        let marker_px = pixel(marker);
        draw_filled_circle_mut(image, marker_px, radius.round() as i32 + 2, OUTLINE);
        draw_filled_circle_mut(image, marker_px, radius.round() as i32, fill);
        self.draw_centered_text(image, &harbor.ratio(), marker_px, size * 0.18, ink(fill));

        let label = pixel(along(apothem + size * 0.3 + radius + size * 0.15));
        self.draw_centered_text(image, port_id, label, size * 0.16, LABEL);
    }

    fn draw_legend(&self, image: &mut RgbImage, x: u32) {
        let size = self.config.tile_size;
        let box_size = (size * 0.4).round() as u32;
        let gap = box_size / 2;
        let x = x as i32;
        let top = self.config.margin as i32;

        self.draw_text(image, "Legend", (x, top), size * 0.24, LABEL);

        let first = top + (size * 0.5) as i32;
        for (i, material) in Material::ALL.into_iter().enumerate() {
            let y = first + i as i32 * (box_size + gap) as i32;
            draw_filled_rect_mut(image, Rect::at(x, y).of_size(box_size, box_size), OUTLINE);
            draw_filled_rect_mut(
                image,
                Rect::at(x + 2, y + 2).of_size(box_size - 4, box_size - 4),
                material_color(material),
            );

            let name = capitalize(material.name());
            let label_x = x + (box_size + gap) as i32;
            let (_, h) = text_size(PxScale::from((size * 0.2) as f32), &self.font, &name);
            let label_y = y + (box_size as i32 - h as i32) / 2;
            self.draw_text(image, &name, (label_x, label_y), size * 0.2, LABEL);
        }
    }

    /// Draw `text` with the top of its glyphs at `(x, y)`
    fn draw_text(
        &self,
        image: &mut RgbImage,
        text: &str,
        (x, y): (i32, i32),
        scale: f64,
        color: Rgb<u8>,
    ) {
        let scale = PxScale::from(scale as f32);
        let (_, h) = text_size(scale, &self.font, text);
        let ascent = self.font.as_scaled(scale).ascent();
        let y = y - ascent.round() as i32 + h as i32;
        draw_text_mut(image, color, x, y, scale, &self.font, text);
    }

    fn draw_centered_text(
        &self,
        image: &mut RgbImage,
        text: &str,
        (cx, cy): (i32, i32),
        scale: f64,
        color: Rgb<u8>,
    ) {
        let scale = PxScale::from(scale as f32);
        let (w, h) = text_size(scale, &self.font, text);
        let ascent = self.font.as_scaled(scale).ascent();
        let x = cx - w as i32 / 2;
        let y = cy - ascent.round() as i32 + h as i32 / 2;
        draw_text_mut(image, color, x, y, scale, &self.font, text);
    }
}

// ==================== Geometry Helpers ====================

fn pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn hex_corners((cx, cy): (f64, f64), size: f64) -> [Point<i32>; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 30.0).to_radians();
        let (x, y) = pixel((cx + size * angle.cos(), cy + size * angle.sin()));
        Point::new(x, y)
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
