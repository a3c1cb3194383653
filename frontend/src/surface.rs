//! The rendering surface the motion behaviors read from and write to.
//!
//! Behaviors never touch `web_sys` directly. They go through [`Surface`], which
//! the browser build implements with [`dom::DomSurface`] and the tests with an
//! in-memory tree.

use std::fmt::Debug;

use crate::error::MotionError;

pub mod dom;
#[cfg(test)]
pub mod fake;

/// Viewport-relative box, same meaning as `getBoundingClientRect()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

pub trait Surface {
    type Node: Clone + PartialEq + Debug;

    /// First node in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// Descendants of `parent` matching `selector`, in document order.
    fn query_within(&self, parent: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Value of the `data-<key>` attribute.
    fn data(&self, node: &Self::Node, key: &str) -> Option<String>;
    fn text(&self, node: &Self::Node) -> Option<String>;

    fn rect(&self, node: &Self::Node) -> Rect;
    fn offset_width(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    /// Computed flex/grid gap in px, 0 when it is `normal` or unset.
    fn gap(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> f64;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), MotionError>;
    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), MotionError>;
    fn remove_class(&self, node: &Self::Node, class: &str) -> Result<(), MotionError>;
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> Result<bool, MotionError>;

    fn require(&self, selector: &str) -> Result<Self::Node, MotionError> {
        self.query(selector).ok_or_else(|| MotionError::missing(selector))
    }
}
