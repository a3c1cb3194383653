use log::{debug, warn};

use crate::config::PillarConfig;
use crate::error::MotionError;
use crate::surface::Surface;

pub const SECTION: &str = "#pillars";
pub const CARD: &str = ".pillar-content-card";
pub const SPACER: &str = ".pillar-spacer";
pub const INDICATOR: &str = ".pillars-timeline-indicator";
pub const ACTIVE: &str = "active";

/// Card for a scroll position: one spacer height of scrolling per card,
/// clamped to the cards that exist.
pub fn pillar_index(scroll_y: f64, section_top: f64, spacer_height: f64, count: usize) -> usize {
    if count == 0 || spacer_height <= 0.0 {
        return 0;
    }
    let steps = ((scroll_y - section_top) / spacer_height).floor();
    steps.clamp(0.0, (count - 1) as f64) as usize
}

/// Indicator offset from the middle of the timeline, in rem.
pub fn indicator_offset_rem(index: usize, count: usize, line_height: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let segment = line_height / (count - 1) as f64;
    index as f64 * segment - line_height / 2.0
}

pub struct PillarTracker<S: Surface> {
    section: S::Node,
    spacer: S::Node,
    cards: Vec<S::Node>,
    indicator: Option<S::Node>,
    current: Option<usize>,
    line_height: f64,
    palette: Vec<String>,
}

impl<S: Surface> PillarTracker<S> {
    pub fn mount(surface: &S, config: &PillarConfig) -> Result<Self, MotionError> {
        let section = surface.require(SECTION)?;
        let spacer = surface.require(SPACER)?;
        let cards = surface.query_all(CARD);
        if cards.is_empty() {
            warn!("{} has no {} elements", SECTION, CARD);
        }
        if config.palette.len() < cards.len() {
            warn!(
                "Pillar palette has {} colors for {} cards, colors will repeat",
                config.palette.len(),
                cards.len()
            );
        }

        Ok(Self {
            section,
            spacer,
            cards,
            indicator: surface.query(INDICATOR),
            current: None,
            line_height: config.line_height_rem,
            palette: config.palette.clone(),
        })
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Recomputes the active card. Returns the new index when it changed.
    pub fn update(&mut self, surface: &S) -> Result<Option<usize>, MotionError> {
        if self.cards.is_empty() {
            return Ok(None);
        }

        let scroll_y = surface.scroll_y();
        let section_top = surface.rect(&self.section).top + scroll_y;
        let spacer_height = surface.offset_height(&self.spacer);
        let index = pillar_index(scroll_y, section_top, spacer_height, self.cards.len());

        if self.current == Some(index) {
            return Ok(None);
        }
        self.current = Some(index);
        debug!("Pillar {} active", index + 1);

        for (i, card) in self.cards.iter().enumerate() {
            if i == index {
                surface.add_class(card, ACTIVE)?;
            } else {
                surface.remove_class(card, ACTIVE)?;
            }
        }

        if let Some(indicator) = &self.indicator {
            let offset = indicator_offset_rem(index, self.cards.len(), self.line_height);
            surface.set_style(indicator, "top", &format!("calc(50% + {}rem)", offset))?;
            if !self.palette.is_empty() {
                let color = &self.palette[index % self.palette.len()];
                surface.set_style(indicator, "background", color)?;
            }
        }
        Ok(Some(index))
    }
}
