use log::warn;

use crate::error::MotionError;
use crate::surface::Surface;

pub const TRIGGER: &str = ".hamburger";
pub const PANEL: &str = ".mobile-menu";
pub const OPEN: &str = "active";

pub struct MenuToggle<S: Surface> {
    trigger: S::Node,
    panel: S::Node,
}

impl<S: Surface> MenuToggle<S> {
    /// `None` when the page has no hamburger menu.
    pub fn mount(surface: &S) -> Option<Self> {
        match (surface.query(TRIGGER), surface.query(PANEL)) {
            (Some(trigger), Some(panel)) => Some(Self { trigger, panel }),
            _ => {
                warn!("No {} / {} on this page, menu toggle not attached", TRIGGER, PANEL);
                None
            }
        }
    }

    pub fn trigger(&self) -> &S::Node {
        &self.trigger
    }

    /// Returns whether the menu is open afterwards.
    pub fn toggle(&self, surface: &S) -> Result<bool, MotionError> {
        surface.toggle_class(&self.trigger, OPEN)?;
        surface.toggle_class(&self.panel, OPEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::FakeSurface;

    #[test]
    fn toggles_trigger_and_panel_together() {
        let surface = FakeSurface::new();
        let trigger = surface.add(&[TRIGGER], None);
        let panel = surface.add(&[PANEL], None);
        let menu = MenuToggle::mount(&surface).unwrap();

        assert!(menu.toggle(&surface).unwrap());
        assert!(surface.has_class(&trigger, OPEN));
        assert!(surface.has_class(&panel, OPEN));

        assert!(!menu.toggle(&surface).unwrap());
        assert!(!surface.has_class(&trigger, OPEN));
        assert!(!surface.has_class(&panel, OPEN));
    }

    #[test]
    fn absent_elements_skip_the_toggle() {
        let surface = FakeSurface::new();
        surface.add(&[TRIGGER], None);
        assert!(MenuToggle::mount(&surface).is_none());
    }
}
