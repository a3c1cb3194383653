//! Navigation popups. Hovering a button previews its popup, clicking locks it
//! open. Only one popup can be locked at a time.

use log::debug;

use crate::config::PopupSelectors;
use crate::error::MotionError;
use crate::surface::Surface;

pub const ACTIVE: &str = "active";
pub const LOCKED_CLOSED: &str = "locked-closed";

#[derive(Clone, Debug, PartialEq)]
pub struct PopupPair<N> {
    pub button: N,
    pub popup: N,
}

pub struct PopupController<S: Surface> {
    pairs: Vec<PopupPair<S::Node>>,
    locked: Option<usize>,
    /// Set when a popup was closed by a click; hover cannot reopen it until
    /// the pointer has left its button once.
    suppressed: Vec<bool>,
}

impl<S: Surface> PopupController<S> {
    pub fn mount(surface: &S, selectors: &[PopupSelectors]) -> Result<Self, MotionError> {
        let pairs = selectors
            .iter()
            .map(|s| {
                Ok(PopupPair {
                    button: surface.require(&s.button)?,
                    popup: surface.require(&s.popup)?,
                })
            })
            .collect::<Result<Vec<_>, MotionError>>()?;

        Ok(Self {
            suppressed: vec![false; pairs.len()],
            pairs,
            locked: None,
        })
    }

    pub fn pairs(&self) -> &[PopupPair<S::Node>] {
        &self.pairs
    }

    #[cfg(test)]
    pub fn locked(&self) -> Option<usize> {
        self.locked
    }

    #[cfg(test)]
    pub fn is_suppressed(&self, index: usize) -> bool {
        self.suppressed[index]
    }

    pub fn click(&mut self, surface: &S, index: usize) -> Result<(), MotionError> {
        let popup = &self.pairs[index].popup;

        if self.locked == Some(index) {
            surface.remove_class(popup, ACTIVE)?;
            surface.add_class(popup, LOCKED_CLOSED)?;
            self.locked = None;
            self.suppressed[index] = true;
            debug!("Popup {} closed by click", index);
            return Ok(());
        }

        for (other, pair) in self.pairs.iter().enumerate() {
            if other != index {
                surface.remove_class(&pair.popup, ACTIVE)?;
            }
        }
        surface.remove_class(popup, LOCKED_CLOSED)?;
        surface.add_class(popup, ACTIVE)?;
        self.locked = Some(index);
        self.suppressed[index] = false;
        debug!("Popup {} locked open", index);
        Ok(())
    }

    pub fn hover_enter(&mut self, surface: &S, index: usize) -> Result<(), MotionError> {
        if self.suppressed[index] || self.locked.is_some() {
            return Ok(());
        }
        let popup = &self.pairs[index].popup;
        surface.remove_class(popup, LOCKED_CLOSED)?;
        surface.add_class(popup, ACTIVE)
    }

    pub fn hover_leave(&mut self, surface: &S, index: usize) -> Result<(), MotionError> {
        self.suppressed[index] = false;
        if self.locked.is_some() {
            return Ok(());
        }
        let popup = &self.pairs[index].popup;
        surface.remove_class(popup, LOCKED_CLOSED)?;
        surface.remove_class(popup, ACTIVE)
    }

    /// Click outside every popup.
    pub fn dismiss_all(&mut self, surface: &S) -> Result<(), MotionError> {
        for pair in &self.pairs {
            surface.remove_class(&pair.popup, ACTIVE)?;
        }
        self.locked = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PopupConfig;
    use crate::surface::fake::{FakeSurface, NodeId};

    const COMMUNITY: usize = 0;
    const EXPLORE: usize = 1;
    const RESOURCES: usize = 2;

    fn site() -> (FakeSurface, PopupController<FakeSurface>, Vec<NodeId>) {
        let surface = FakeSurface::new();
        let mut popups = Vec::new();
        for name in ["community", "explore", "resources"] {
            let anchor = surface.add(&[".popup-anchor"], None);
            let button = format!(".{}-button", name);
            let popup = format!(".{}-popup", name);
            surface.add(&[button.as_str()], Some(anchor));
            popups.push(surface.add(&[popup.as_str()], Some(anchor)));
        }
        let controller = PopupController::mount(&surface, &PopupConfig::default().pairs).unwrap();
        (surface, controller, popups)
    }

    fn open(surface: &FakeSurface, popups: &[NodeId]) -> Vec<bool> {
        popups.iter().map(|p| surface.has_class(p, ACTIVE)).collect()
    }

    #[test]
    fn missing_button_fails_mount() {
        let surface = FakeSurface::new();
        surface.add(&[".community-popup"], None);
        let err = PopupController::mount(&surface, &PopupConfig::default().pairs);
        assert!(matches!(
            err,
            Err(MotionError::MissingElement { selector }) if selector == ".community-button"
        ));
    }

    #[test]
    fn click_lock_is_exclusive() {
        let (surface, mut controller, popups) = site();
        controller.click(&surface, COMMUNITY).unwrap();
        assert_eq!(open(&surface, &popups), vec![true, false, false]);

        controller.click(&surface, EXPLORE).unwrap();
        assert_eq!(open(&surface, &popups), vec![false, true, false]);
        assert_eq!(controller.locked(), Some(EXPLORE));
    }

    #[test]
    fn second_click_closes_and_blocks_hover_until_leave() {
        let (surface, mut controller, popups) = site();
        controller.click(&surface, RESOURCES).unwrap();
        controller.click(&surface, RESOURCES).unwrap();

        assert!(!surface.has_class(&popups[RESOURCES], ACTIVE));
        assert!(surface.has_class(&popups[RESOURCES], LOCKED_CLOSED));
        assert_eq!(controller.locked(), None);

        controller.hover_enter(&surface, RESOURCES).unwrap();
        assert!(!surface.has_class(&popups[RESOURCES], ACTIVE));

        controller.hover_leave(&surface, RESOURCES).unwrap();
        assert!(!surface.has_class(&popups[RESOURCES], LOCKED_CLOSED));
        controller.hover_enter(&surface, RESOURCES).unwrap();
        assert!(surface.has_class(&popups[RESOURCES], ACTIVE));
    }

    #[test]
    fn hover_previews_only_while_nothing_is_locked() {
        let (surface, mut controller, popups) = site();
        controller.hover_enter(&surface, EXPLORE).unwrap();
        assert_eq!(open(&surface, &popups), vec![false, true, false]);
        controller.hover_leave(&surface, EXPLORE).unwrap();
        assert_eq!(open(&surface, &popups), vec![false, false, false]);

        controller.click(&surface, COMMUNITY).unwrap();
        controller.hover_enter(&surface, EXPLORE).unwrap();
        assert_eq!(open(&surface, &popups), vec![true, false, false]);

        // leaving the locked popup's own button keeps it open
        controller.hover_leave(&surface, COMMUNITY).unwrap();
        assert_eq!(open(&surface, &popups), vec![true, false, false]);
    }

    #[test]
    fn click_elsewhere_closes_everything() {
        let (surface, mut controller, popups) = site();
        controller.click(&surface, EXPLORE).unwrap();
        controller.dismiss_all(&surface).unwrap();
        assert_eq!(open(&surface, &popups), vec![false, false, false]);
        assert_eq!(controller.locked(), None);

        // a fresh click locks again rather than closing
        controller.click(&surface, EXPLORE).unwrap();
        assert_eq!(controller.locked(), Some(EXPLORE));
    }

    #[test]
    fn click_reopen_clears_locked_closed() {
        let (surface, mut controller, popups) = site();
        controller.click(&surface, COMMUNITY).unwrap();
        controller.click(&surface, COMMUNITY).unwrap();
        assert!(controller.is_suppressed(COMMUNITY));

        controller.click(&surface, COMMUNITY).unwrap();
        assert!(!controller.is_suppressed(COMMUNITY));
        assert!(!surface.has_class(&popups[COMMUNITY], LOCKED_CLOSED));
        assert!(surface.has_class(&popups[COMMUNITY], ACTIVE));
    }
}
