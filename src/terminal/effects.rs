//! Cosmetic effect state
//!
//! Nothing in here changes what a command does. It only changes how the
//! terminal looks while it does it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::scheduler::TaskHandle;

pub const MATRIX_CHARACTERS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ123456789@#$%^&*()*&^%+-/~{[|`]}";

/// Chance per frame that a drop past the bottom restarts at the top
const DROP_RESET_CHANCE: f64 = 0.025;

/// How much a trail cell fades per frame
const TRAIL_FADE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Normal,
    Matrix,
}

/// One glyph left on screen by a falling drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainCell {
    pub glyph: char,
    pub intensity: u8,
}

/// Falling-character background, one drop per column
#[derive(Debug, Clone, Default)]
pub struct MatrixRain {
    width: u16,
    height: u16,
    drops: Vec<u16>,
    cells: Vec<Option<RainCell>>,
    glyphs: Vec<char>,
}

impl MatrixRain {
    pub fn new() -> Self {
        Self {
            glyphs: MATRIX_CHARACTERS.chars().collect(),
            ..Self::default()
        }
    }

    /// Match the drawing area. Any size change restarts the rain.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.drops = vec![1; width as usize];
        self.cells = vec![None; width as usize * height as usize];
    }

    /// Draw one frame
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        for cell in self.cells.iter_mut() {
            if let Some(c) = cell {
                c.intensity = c.intensity.saturating_sub(TRAIL_FADE);
                if c.intensity == 0 {
                    *cell = None;
                }
            }
        }

        for x in 0..self.width as usize {
            let y = self.drops[x];
            if y < self.height {
                let glyph = self.glyphs[rng.gen_range(0..self.glyphs.len())];
                self.cells[y as usize * self.width as usize + x] = Some(RainCell {
                    glyph,
                    intensity: u8::MAX,
                });
            }

            if y > self.height && rng.gen_bool(DROP_RESET_CHANCE) {
                self.drops[x] = 0;
            }
            self.drops[x] = self.drops[x].saturating_add(1);
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<RainCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn drops(&self) -> &[u16] {
        &self.drops
    }
}

/// All decorative state, plus the one RNG every effect draws from
#[derive(Debug, Clone)]
pub struct Effects {
    rng: StdRng,
    pub text_color: TextColor,
    pub glitching: bool,
    pub rain_always: bool,
    pub rain: MatrixRain,
    pub(crate) matrix_restore: Option<TaskHandle>,
}

impl Effects {
    pub fn new(seed: Option<u64>, rain_always: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            text_color: TextColor::Normal,
            glitching: false,
            rain_always,
            rain: MatrixRain::new(),
            matrix_restore: None,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn roll(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Rain shows when configured on, or while the matrix color is active
    pub fn rain_visible(&self) -> bool {
        self.rain_always || self.text_color == TextColor::Matrix
    }

    pub fn step_rain(&mut self) {
        if self.rain_visible() {
            self.rain.step(&mut self.rng);
        }
    }
}
