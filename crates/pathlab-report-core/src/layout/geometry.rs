//! Page geometry in millimetres.

use serde::{Deserialize, Serialize};

/// A4 page width.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 page height.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Where the plan will be painted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// On-screen preview and PDF export
    #[default]
    Screen,
    /// Direct browser print
    Print,
}

/// Axis-aligned rectangle; origin at the top-left of the page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Shrink by `padding` on every side.
    pub fn inset(&self, padding: f64) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - 2.0 * padding).max(0.0),
            height: (self.height - 2.0 * padding).max(0.0),
        }
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f64 = 1e-9;
        other.x + EPSILON >= self.x
            && other.y + EPSILON >= self.y
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// True when the two rectangles share any area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// The three fixed vertical bands of a page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageBands {
    pub page: Rect,
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl PageBands {
    /// Split a page into header, content and footer bands.
    ///
    /// Band heights are clamped so the content band never goes negative.
    pub fn split(page_width: f64, page_height: f64, header_height: f64, footer_height: f64) -> Self {
        let header_height = header_height.clamp(0.0, page_height);
        let footer_height = footer_height.clamp(0.0, page_height - header_height);
        let content_height = page_height - header_height - footer_height;

        Self {
            page: Rect::new(0.0, 0.0, page_width, page_height),
            header: Rect::new(0.0, 0.0, page_width, header_height),
            content: Rect::new(0.0, header_height, page_width, content_height),
            footer: Rect::new(0.0, page_height - footer_height, page_width, footer_height),
        }
    }
}
