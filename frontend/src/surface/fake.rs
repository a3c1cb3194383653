//! In-memory [`Surface`] for unit tests.
//!
//! Nodes are matched by the literal selectors they were created with. Layout is
//! whatever the test says it is, except that a `translateX(..px)` transform on
//! any ancestor shifts the reported rect, which is all the ticker needs.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use super::{Rect, Surface};
use crate::error::MotionError;

pub type NodeId = usize;

#[derive(Default)]
struct FakeNode {
    selectors: Vec<String>,
    parent: Option<NodeId>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    data: BTreeMap<String, String>,
    text: Option<String>,
    rect: Rect,
    offset_height: f64,
    gap: f64,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<FakeNode>,
    scroll_y: f64,
}

#[derive(Clone, Default)]
pub struct FakeSurface {
    tree: Rc<RefCell<Tree>>,
}

fn translate_x(transform: &str) -> f64 {
    transform
        .strip_prefix("translateX(")
        .and_then(|rest| rest.strip_suffix("px)"))
        .and_then(|px| px.parse().ok())
        .unwrap_or(0.0)
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node matching each of `selectors`. Class selectors also become
    /// the node's initial classes.
    pub fn add(&self, selectors: &[&str], parent: Option<NodeId>) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let classes = selectors
            .iter()
            .filter_map(|s| s.strip_prefix('.'))
            .map(str::to_string)
            .collect();
        tree.nodes.push(FakeNode {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent,
            classes,
            ..FakeNode::default()
        });
        tree.nodes.len() - 1
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.tree.borrow_mut().nodes[node].rect = rect;
    }

    pub fn set_data(&self, node: NodeId, key: &str, value: &str) {
        self.tree.borrow_mut().nodes[node]
            .data
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        self.tree.borrow_mut().nodes[node].text = Some(text.to_string());
    }

    pub fn set_offset_height(&self, node: NodeId, height: f64) {
        self.tree.borrow_mut().nodes[node].offset_height = height;
    }

    pub fn set_gap(&self, node: NodeId, gap: f64) {
        self.tree.borrow_mut().nodes[node].gap = gap;
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.tree.borrow_mut().scroll_y = y;
    }

    pub fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().nodes[*node].classes.contains(class)
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.borrow().nodes[node].styles.get(property).cloned()
    }

    fn matches(tree: &Tree, node: NodeId, selector: &str) -> bool {
        tree.nodes[node].selectors.iter().any(|s| s == selector)
    }

    fn is_descendant(tree: &Tree, mut node: NodeId, ancestor: NodeId) -> bool {
        while let Some(parent) = tree.nodes[node].parent {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }
}

impl Surface for FakeSurface {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .filter(|&id| Self::matches(&tree, id, selector))
            .collect()
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .filter(|&id| Self::is_descendant(&tree, id, *parent) && Self::matches(&tree, id, selector))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes[*node].parent
    }

    fn data(&self, node: &NodeId, key: &str) -> Option<String> {
        self.tree.borrow().nodes[*node].data.get(key).cloned()
    }

    fn text(&self, node: &NodeId) -> Option<String> {
        self.tree.borrow().nodes[*node].text.clone()
    }

    fn rect(&self, node: &NodeId) -> Rect {
        let tree = self.tree.borrow();
        let mut rect = tree.nodes[*node].rect;
        let mut cursor = tree.nodes[*node].parent;
        while let Some(id) = cursor {
            if let Some(transform) = tree.nodes[id].styles.get("transform") {
                rect.left += translate_x(transform);
            }
            cursor = tree.nodes[id].parent;
        }
        rect
    }

    fn offset_width(&self, node: &NodeId) -> f64 {
        self.tree.borrow().nodes[*node].rect.width
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.tree.borrow().nodes[*node].offset_height
    }

    fn gap(&self, node: &NodeId) -> f64 {
        self.tree.borrow().nodes[*node].gap
    }

    fn scroll_y(&self) -> f64 {
        self.tree.borrow().scroll_y
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<(), MotionError> {
        self.tree.borrow_mut().nodes[*node]
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn add_class(&self, node: &NodeId, class: &str) -> Result<(), MotionError> {
        self.tree.borrow_mut().nodes[*node].classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&self, node: &NodeId, class: &str) -> Result<(), MotionError> {
        self.tree.borrow_mut().nodes[*node].classes.remove(class);
        Ok(())
    }

    fn toggle_class(&self, node: &NodeId, class: &str) -> Result<bool, MotionError> {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.nodes[*node].classes;
        if classes.remove(class) {
            Ok(false)
        } else {
            classes.insert(class.to_string());
            Ok(true)
        }
    }
}
