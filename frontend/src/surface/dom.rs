use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, NodeList, Window};

use super::{Rect, Surface};
use crate::error::MotionError;

/// [`Surface`] backed by the live document.
#[derive(Clone)]
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self, MotionError> {
        let window = window().ok_or_else(|| MotionError::Dom("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| MotionError::Dom("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html(node: &Element) -> Result<&HtmlElement, MotionError> {
        node.dyn_ref::<HtmlElement>()
            .ok_or_else(|| MotionError::Dom(format!("<{}> is not an html element", node.tag_name())))
    }
}

fn elements(list: Result<NodeList, wasm_bindgen::JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Leading number of a css length, `"16px"` -> 16. `"normal"` and friends give `None`.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Computed `column-gap` in px. Keywords such as `normal` count as no gap.
pub(crate) fn gap_px(value: &str) -> f64 {
    parse_px(value).unwrap_or(0.0)
}

impl Surface for DomSurface {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector))
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector))
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn data(&self, node: &Element, key: &str) -> Option<String> {
        node.get_attribute(&format!("data-{}", key))
    }

    fn text(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn rect(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn offset_width(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|e| e.offset_width() as f64)
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|e| e.offset_height() as f64)
            .unwrap_or(0.0)
    }

    fn gap(&self, node: &Element) -> f64 {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("column-gap").ok())
            .map(|value| gap_px(&value))
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), MotionError> {
        Self::html(node)?.style().set_property(property, value)?;
        Ok(())
    }

    fn add_class(&self, node: &Element, class: &str) -> Result<(), MotionError> {
        node.class_list().add_1(class)?;
        Ok(())
    }

    fn remove_class(&self, node: &Element, class: &str) -> Result<(), MotionError> {
        node.class_list().remove_1(class)?;
        Ok(())
    }

    fn toggle_class(&self, node: &Element, class: &str) -> Result<bool, MotionError> {
        Ok(node.class_list().toggle(class)?)
    }
}
