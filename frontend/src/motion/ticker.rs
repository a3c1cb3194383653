//! Word ticker: layers of duplicated words scroll left until every layer has
//! the current preset's word centered, then the phrase is highlighted, held,
//! and the layers are released one after another.

use std::fmt;

use log::{debug, info};

use crate::config::TickerConfig;
use crate::error::MotionError;
use crate::surface::Surface;

pub const SCROLLER_ITEM: &str = ".scroller-item";
pub const HIGHLIGHTED: &str = "highlighted";

/// Each layer shows at least this many words before the strip is doubled.
const MIN_STRIP_WORDS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickerVariant {
    /// Four stacked layers, one word of the phrase each.
    Layered,
    /// Single `#ticker` row.
    Classic,
}

impl TickerVariant {
    pub fn layer_selectors(self) -> &'static [&'static str] {
        match self {
            TickerVariant::Layered => &[".layer1", ".layer2", ".layer3", ".layer4"],
            TickerVariant::Classic => &["#ticker"],
        }
    }
}

impl fmt::Display for TickerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerVariant::Layered => write!(f, "layered"),
            TickerVariant::Classic => write!(f, "classic"),
        }
    }
}

/// Words rendered in one layer: the distinct words that column of the presets
/// uses, repeated to a minimum length and then doubled so the wrap is seamless.
pub fn layer_words(presets: &[Vec<String>], layer: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in presets.iter().filter_map(|phrase| phrase.get(layer)) {
        if !words.contains(word) {
            words.push(word.clone());
        }
    }
    if words.is_empty() {
        return words;
    }

    let mut strip = words.clone();
    while strip.len() < MIN_STRIP_WORDS {
        strip.extend(words.iter().cloned());
    }
    strip.iter().chain(strip.iter()).cloned().collect()
}

/// One frame of scrolling: move left by `speed`, back to 0 once a full
/// content width has gone by.
pub fn step_offset(offset: f64, speed: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let next = offset - speed;
    if next.abs() >= width {
        0.0
    } else {
        next
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Layers scroll and may freeze.
    Running,
    /// Every layer is frozen and the phrase is highlighted until `until`.
    Highlighted { until: f64 },
    /// Layers are being let go, `released` of them so far.
    Releasing { started: f64, released: usize },
    /// Layers scroll but none may freeze before `until`.
    Cooldown { until: f64 },
}

/// What the machine needs next from whoever drives it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wake {
    /// Call [`TickerMachine::frame`] on the next animation frame.
    Frame,
    /// Call [`TickerMachine::on_timer`] once the clock reaches this time (ms).
    At(f64),
}

struct Layer<N> {
    node: N,
    container: N,
    items: Vec<N>,
    speed: f64,
    offset: f64,
    frozen: bool,
    matched: Option<N>,
}

pub struct TickerMachine<S: Surface> {
    layers: Vec<Layer<S::Node>>,
    presets: Vec<Vec<String>>,
    preset_index: usize,
    phase: Phase,
    cooldown_until: f64,
    threshold: f64,
    highlight_ms: f64,
    stagger_ms: f64,
    cooldown_ms: f64,
}

impl<S: Surface> TickerMachine<S> {
    pub fn mount(
        surface: &S,
        selectors: &[&str],
        presets: &[Vec<String>],
        config: &TickerConfig,
    ) -> Result<Self, MotionError> {
        if presets.is_empty() || presets.iter().any(|p| p.len() != selectors.len()) {
            return Err(MotionError::NoPresets { layers: selectors.len() });
        }

        let mut layers = Vec::with_capacity(selectors.len());
        for (index, selector) in selectors.iter().enumerate() {
            let node = surface.require(selector)?;
            let container = surface
                .parent(&node)
                .ok_or_else(|| MotionError::missing(format!("parent of {}", selector)))?;
            let items = surface.query_within(&node, SCROLLER_ITEM);
            if items.is_empty() {
                return Err(MotionError::EmptyLayer { layer: index + 1 });
            }
            layers.push(Layer {
                node,
                container,
                items,
                speed: config.speed(index),
                offset: 0.0,
                frozen: false,
                matched: None,
            });
        }

        info!("Ticker mounted with {} layer(s), {} presets", layers.len(), presets.len());
        Ok(Self {
            layers,
            presets: presets.to_vec(),
            preset_index: 0,
            phase: Phase::Running,
            cooldown_until: 0.0,
            threshold: config.center_threshold_px,
            highlight_ms: config.highlight_ms,
            stagger_ms: config.release_stagger_ms,
            cooldown_ms: config.cooldown_ms,
        })
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    pub fn current_phrase(&self) -> String {
        self.presets[self.preset_index].join(" ")
    }

    #[cfg(test)]
    pub fn offset(&self, layer: usize) -> f64 {
        self.layers[layer].offset
    }

    #[cfg(test)]
    pub fn is_frozen(&self, layer: usize) -> bool {
        self.layers[layer].frozen
    }

    #[cfg(test)]
    pub fn matched(&self, layer: usize) -> Option<&S::Node> {
        self.layers[layer].matched.as_ref()
    }

    pub fn wake(&self) -> Wake {
        match self.phase {
            Phase::Running | Phase::Cooldown { .. } => Wake::Frame,
            Phase::Highlighted { until } => Wake::At(until),
            Phase::Releasing { started, released } => {
                Wake::At(started + self.stagger_ms * released as f64)
            }
        }
    }

    /// Puts every layer back at rest and drops any highlight. The markup
    /// outlives the machine when the router swaps ticker variants.
    pub fn reset_layers(&mut self, surface: &S) -> Result<(), MotionError> {
        for layer in &mut self.layers {
            layer.offset = 0.0;
            surface.set_style(&layer.node, "transition", "none")?;
            surface.set_style(&layer.node, "transform", "none")?;
            if let Some(item) = layer.matched.take() {
                surface.remove_class(&item, HIGHLIGHTED)?;
            }
        }
        Ok(())
    }

    /// Advances every unfrozen layer by one frame.
    pub fn frame(&mut self, surface: &S, now: f64) -> Result<Wake, MotionError> {
        match self.phase {
            Phase::Highlighted { .. } | Phase::Releasing { .. } => return Ok(self.wake()),
            Phase::Cooldown { until } if now >= until => {
                debug!("Ticker cool-down over");
                self.phase = Phase::Running;
            }
            _ => {}
        }

        let can_freeze = self.phase == Phase::Running;
        let targets = &self.presets[self.preset_index];

        for (index, layer) in self.layers.iter_mut().enumerate() {
            if layer.frozen {
                continue;
            }

            let width = content_width(surface, layer);
            layer.offset = step_offset(layer.offset, layer.speed, width);
            surface.set_style(&layer.node, "transition", "none")?;
            surface.set_style(&layer.node, "transform", &format!("translateX({}px)", layer.offset))?;

            if !can_freeze {
                continue;
            }
            if let Some((item, distance)) = find_centered(surface, layer, &targets[index], self.threshold) {
                debug!(
                    "Layer {} frozen on \"{}\" ({:.1}px from center)",
                    index + 1,
                    targets[index],
                    distance
                );
                layer.frozen = true;
                layer.matched = Some(item);
            }
        }

        if self.layers.iter().all(|layer| layer.frozen) {
            self.highlight(surface, now)?;
        }
        Ok(self.wake())
    }

    /// Handles a timed transition that has come due.
    pub fn on_timer(&mut self, surface: &S, now: f64) -> Result<Wake, MotionError> {
        match self.phase {
            Phase::Highlighted { until } if now >= until => {
                for layer in &mut self.layers {
                    if let Some(item) = layer.matched.take() {
                        surface.set_style(&item, "transition", "all 0.3s ease")?;
                        surface.remove_class(&item, HIGHLIGHTED)?;
                    }
                }
                self.preset_index = (self.preset_index + 1) % self.presets.len();
                self.cooldown_until = now + self.cooldown_ms;
                info!("Next preset: {}", self.current_phrase());

                self.phase = Phase::Releasing { started: now, released: 0 };
                self.release_due(now);
            }
            Phase::Releasing { .. } => self.release_due(now),
            _ => {}
        }
        Ok(self.wake())
    }

    fn highlight(&mut self, surface: &S, now: f64) -> Result<(), MotionError> {
        info!("All layers frozen on \"{}\"", self.current_phrase());
        for layer in &self.layers {
            if let Some(item) = &layer.matched {
                surface.add_class(item, HIGHLIGHTED)?;
            }
        }
        self.phase = Phase::Highlighted { until: now + self.highlight_ms };
        Ok(())
    }

    fn release_due(&mut self, now: f64) {
        let Phase::Releasing { started, mut released } = self.phase else {
            return;
        };
        while released < self.layers.len() && now >= started + self.stagger_ms * released as f64 {
            self.layers[released].frozen = false;
            debug!("Layer {} released", released + 1);
            released += 1;
        }

        self.phase = if released == self.layers.len() {
            Phase::Cooldown { until: self.cooldown_until }
        } else {
            Phase::Releasing { started, released }
        };
    }
}

fn content_width<S: Surface>(surface: &S, layer: &Layer<S::Node>) -> f64 {
    let item_width = surface.offset_width(&layer.items[0]) + surface.gap(&layer.node);
    item_width * (layer.items.len() as f64 / 2.0)
}

/// First item showing `target` whose center is within `threshold` px of the
/// container's center.
fn find_centered<S: Surface>(
    surface: &S,
    layer: &Layer<S::Node>,
    target: &str,
    threshold: f64,
) -> Option<(S::Node, f64)> {
    let center = surface.rect(&layer.container).center_x();
    layer
        .items
        .iter()
        .filter(|item| surface.data(*item, "word").as_deref() == Some(target))
        .map(|item| (item, (surface.rect(item).center_x() - center).abs()))
        .find(|(_, distance)| *distance < threshold)
        .map(|(item, distance)| (item.clone(), distance))
}
