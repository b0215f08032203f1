//! Colors of the grid blocks
//!
//! Public holidays and leaves have fixed colors. Tasks pick theirs from a [`TaskPalette`],
//! which remembers which color it gave to every task label it has seen.

use std::collections::HashMap;
use std::error::Error;

use csscolorparser::Color;
use once_cell::sync::Lazy;

/// Color of public holiday blocks
pub static HOLIDAY_COLOR: Lazy<Color> = Lazy::new(|| Color::from_rgb_u8(0x3b, 0x82, 0xf6));
/// Color of leave blocks
pub static LEAVE_COLOR: Lazy<Color> = Lazy::new(|| Color::from_rgb_u8(0xef, 0x44, 0x44));

/// The default task swatches. None of them is the holiday or the leave color.
const DEFAULT_SWATCHES: [(u8, u8, u8); 10] = [
    (0x22, 0xc5, 0x5e),
    (0xa8, 0x55, 0xf7),
    (0xf5, 0x9e, 0x0b),
    (0xec, 0x48, 0x99),
    (0x63, 0x66, 0xf1),
    (0x14, 0xb8, 0xa6),
    (0xf9, 0x73, 0x16),
    (0x06, 0xb6, 0xd4),
    (0x84, 0xcc, 0x16),
    (0x10, 0xb9, 0x81),
];

/// Hands out task colors, cycling over a fixed list of swatches.
///
/// The first label gets the first swatch, the second label the second swatch, and so on,
/// starting over once every swatch has been used.
/// A label keeps its color until the palette is [reset](TaskPalette::reset).
#[derive(Clone, Debug, PartialEq)]
pub struct TaskPalette {
    swatches: Vec<Color>,
    assigned: HashMap<String, usize>,
    /// Labels in the order they got their color
    order: Vec<String>,
}

impl Default for TaskPalette {
    fn default() -> Self {
        let swatches = DEFAULT_SWATCHES.iter()
            .map(|(r, g, b)| Color::from_rgb_u8(*r, *g, *b))
            .collect();
        Self { swatches, assigned: HashMap::new(), order: Vec::new() }
    }
}

impl TaskPalette {
    /// Build a palette from CSS color strings (`#22c55e`, `rgb(34, 197, 94)`, `seagreen`...)
    pub fn from_css<S: AsRef<str>>(swatches: &[S]) -> Result<Self, Box<dyn Error>> {
        if swatches.is_empty() {
            return Err("A palette needs at least one color".into());
        }

        let mut colors = Vec::with_capacity(swatches.len());
        for swatch in swatches {
            let color = match csscolorparser::parse(swatch.as_ref()) {
                Err(err) => return Err(format!("Invalid palette color {:?}: {}", swatch.as_ref(), err).into()),
                Ok(color) => color,
            };
            if color == *HOLIDAY_COLOR || color == *LEAVE_COLOR {
                log::warn!("Palette color {} is also used for holidays or leaves", color.to_hex_string());
            }
            colors.push(color);
        }
        Ok(Self { swatches: colors, assigned: HashMap::new(), order: Vec::new() })
    }

    /// Number of swatches
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Number of labels that already have a color
    pub fn assigned(&self) -> usize {
        self.assigned.len()
    }

    /// Returns the color of a label, giving it the next swatch if it has none yet
    pub fn color_for(&mut self, label: &str) -> Color {
        let index = match self.assigned.get(label) {
            Some(index) => *index,
            None => {
                let index = self.order.len();
                self.assigned.insert(label.to_string(), index);
                self.order.push(label.to_string());
                index
            }
        };
        self.swatches[index % self.swatches.len()].clone()
    }

    /// Forget every color that has been handed out
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.order.clear();
    }

    /// Reset the palette unless it has colored exactly `labels`, in this order.
    ///
    /// `labels` are the distinct task labels of a grid, in the order they are displayed.
    /// After this call, coloring them in that order gives the same colors as a fresh palette would.
    pub fn sync_vocabulary(&mut self, labels: &[&str]) {
        let unchanged = self.order.len() == labels.len()
            && self.order.iter().zip(labels).all(|(known, label)| known == label);
        if unchanged == false {
            if self.order.is_empty() == false {
                log::debug!("Task labels changed, resetting the palette");
            }
            self.reset();
        }
    }
}
