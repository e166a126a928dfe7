//! MemoryPage - a synthetic page for running the effect without a browser
//!
//! Holds a flat node arena with parent links, fixed page-space geometry and
//! a real inline `style` attribute (declarations are parsed and serialized
//! the way a browser's `CSSStyleDeclaration` does, `name: value;` joined by
//! spaces). Selector support covers what the site's selectors use:
//! type selectors, `.class` (with `\` escapes), `[class*="..."]`,
//! `:not(...)` and the descendant combinator, in comma-separated lists.

use std::cell::{Cell, RefCell};

use super::page::{Page, Rect};
use crate::rigid_body::Vec2;

pub type NodeId = usize;

#[derive(Clone, Debug)]
struct MemoryNode {
    tag: String,
    classes: Vec<String>,
    parent: Option<NodeId>,
    /// Border box in page coordinates
    rect: Rect,
    display: String,
    opacity: String,
    style: Option<String>,
    /// Style writes fail for this node (simulates a hostile host)
    poisoned: bool,
}

pub struct MemoryPage {
    nodes: RefCell<Vec<MemoryNode>>,
    scroll: Cell<Vec2>,
    viewport_width: f64,
    document_height: f64,
    layout_reads: Cell<usize>,
}

impl MemoryPage {
    /// A page with only a `body` (node 0) covering the document
    pub fn new(viewport_width: f64, document_height: f64) -> Self {
        let body = MemoryNode {
            tag: "body".to_string(),
            classes: Vec::new(),
            parent: None,
            rect: Rect::new(0.0, 0.0, viewport_width, document_height),
            display: "block".to_string(),
            opacity: "1".to_string(),
            style: None,
            poisoned: false,
        };
        Self {
            nodes: RefCell::new(vec![body]),
            scroll: Cell::new(Vec2::zero()),
            viewport_width,
            document_height,
            layout_reads: Cell::new(0),
        }
    }

    pub const BODY: NodeId = 0;

    /// Append an element; `classes` is a space-separated class attribute
    pub fn append(&self, parent: NodeId, tag: &str, classes: &str, rect: Rect) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(MemoryNode {
            tag: tag.to_ascii_lowercase(),
            classes: classes.split_whitespace().map(str::to_string).collect(),
            parent: Some(parent),
            rect,
            display: "block".to_string(),
            opacity: "1".to_string(),
            style: None,
            poisoned: false,
        });
        nodes.len() - 1
    }

    pub fn set_display(&self, node: NodeId, display: &str) {
        self.nodes.borrow_mut()[node].display = display.to_string();
    }

    pub fn set_opacity(&self, node: NodeId, opacity: &str) {
        self.nodes.borrow_mut()[node].opacity = opacity.to_string();
    }

    /// Make every style write to `node` fail
    pub fn poison(&self, node: NodeId) {
        self.nodes.borrow_mut()[node].poisoned = true;
    }

    /// Set the raw `style` attribute before a session (setup helper)
    pub fn set_initial_style(&self, node: NodeId, style: Option<&str>) {
        self.nodes.borrow_mut()[node].style = style.map(str::to_string);
    }

    pub fn style_of(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node].style.clone()
    }

    /// Current inline value of one declaration
    pub fn style_property(&self, node: NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let style = nodes[node].style.as_deref()?;
        parse_declarations(style)
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn set_scroll(&self, x: f64, y: f64) {
        self.scroll.set(Vec2::new(x, y));
    }

    /// Synchronous layout reads requested so far
    pub fn layout_reads(&self) -> usize {
        self.layout_reads.get()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = nodes[node].parent;
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = nodes[id].parent;
        }
        false
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let list = parse_selector_list(selector);
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .filter(|&id| list.iter().any(|complex| matches_complex(&nodes, id, complex)))
            .collect()
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let scroll = self.scroll.get();
        self.nodes.borrow()[*node].rect.translated(-scroll)
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let n = nodes.get(*node)?;
        match property {
            "display" => Some(n.display.clone()),
            "opacity" => Some(n.opacity.clone()),
            _ => None,
        }
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        ancestor == node || self.is_ancestor(*ancestor, *node)
    }

    fn style_attribute(&self, node: &NodeId) -> Option<String> {
        self.style_of(*node)
    }

    fn set_style_attribute(&self, node: &NodeId, value: Option<&str>) -> Result<(), String> {
        let mut nodes = self.nodes.borrow_mut();
        let n = nodes.get_mut(*node).ok_or_else(|| format!("unknown node {}", node))?;
        if n.poisoned {
            return Err(format!("style write rejected for node {}", node));
        }
        n.style = value.map(str::to_string);
        Ok(())
    }

    fn set_style_property(&self, node: &NodeId, name: &str, value: &str) -> Result<(), String> {
        let mut nodes = self.nodes.borrow_mut();
        let n = nodes.get_mut(*node).ok_or_else(|| format!("unknown node {}", node))?;
        if n.poisoned {
            return Err(format!("style write rejected for node {}", node));
        }

        let mut decls = n.style.as_deref().map(parse_declarations).unwrap_or_default();
        if value.is_empty() {
            decls.retain(|(k, _)| k != name);
        } else if let Some(slot) = decls.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            decls.push((name.to_string(), value.to_string()));
        }
        n.style = Some(serialize_declarations(&decls));
        Ok(())
    }

    fn force_layout(&self, _node: &NodeId) {
        self.layout_reads.set(self.layout_reads.get() + 1);
    }

    fn body(&self) -> Option<NodeId> {
        Some(Self::BODY)
    }

    fn scroll_position(&self) -> Vec2 {
        self.scroll.get()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.set_scroll(x, y);
    }
}

// === Inline style ===

fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

fn serialize_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

// === Selectors ===

#[derive(Clone, Debug, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    class_contains: Vec<String>,
    not: Vec<Compound>,
}

/// Descendant chain, outermost first
type Complex = Vec<Compound>;

/// Split on `sep` outside brackets, parens, quotes and escapes
fn split_top_level(input: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            current.push(c);
            if let Some(next) = chars.next() {
                current.push(next);
            }
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 && is_sep(c) {
            if !current.trim().is_empty() {
                parts.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

fn parse_selector_list(selector: &str) -> Vec<Complex> {
    split_top_level(selector, |c| c == ',')
        .iter()
        .map(|part| {
            split_top_level(part, char::is_whitespace)
                .iter()
                .map(|compound| parse_compound(compound))
                .collect()
        })
        .collect()
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let mut out = String::new();
    while *i < chars.len() {
        let c = chars[*i];
        if c == '\\' && *i + 1 < chars.len() {
            out.push(chars[*i + 1]);
            *i += 2;
            continue;
        }
        if matches!(c, '.' | '[' | ':' | '(' | ')' | '#' | ',') || c.is_whitespace() {
            break;
        }
        out.push(c);
        *i += 1;
    }
    out
}

/// Read up to the matching `close`, honoring nesting and escapes
fn read_group(chars: &[char], i: &mut usize, open: char, close: char) -> String {
    let mut out = String::new();
    let mut depth = 1;
    let mut quote: Option<char> = None;
    while *i < chars.len() {
        let c = chars[*i];
        *i += 1;
        if c == '\\' && *i < chars.len() {
            out.push(c);
            out.push(chars[*i]);
            *i += 1;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            out.push(c);
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
        out.push(c);
    }
    out
}

fn parse_compound(text: &str) -> Compound {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut compound = Compound::default();

    if i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '*') {
        let tag = read_ident(&chars, &mut i);
        if tag != "*" {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while i < chars.len() {
        match chars[i] {
            '.' => {
                i += 1;
                compound.classes.push(read_ident(&chars, &mut i));
            }
            '[' => {
                i += 1;
                let inner = read_group(&chars, &mut i, '[', ']');
                if let Some((attr, value)) = inner.split_once("*=") {
                    if attr.trim() == "class" {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        compound.class_contains.push(value.to_string());
                    }
                }
            }
            ':' => {
                i += 1;
                let name = read_ident(&chars, &mut i);
                if i < chars.len() && chars[i] == '(' {
                    i += 1;
                    let inner = read_group(&chars, &mut i, '(', ')');
                    if name == "not" {
                        compound.not.push(parse_compound(inner.trim()));
                    }
                }
            }
            _ => i += 1,
        }
    }

    compound
}

fn matches_compound(nodes: &[MemoryNode], id: NodeId, compound: &Compound) -> bool {
    let node = &nodes[id];
    if let Some(tag) = &compound.tag {
        if &node.tag != tag {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| node.classes.iter().any(|nc| nc == c)) {
        return false;
    }
    if !compound.class_contains.is_empty() {
        let attr = node.classes.join(" ");
        if !compound.class_contains.iter().all(|needle| attr.contains(needle.as_str())) {
            return false;
        }
    }
    !compound.not.iter().any(|n| matches_compound(nodes, id, n))
}

fn matches_complex(nodes: &[MemoryNode], id: NodeId, complex: &Complex) -> bool {
    let Some((last, ancestors)) = complex.split_last() else {
        return false;
    };
    if !matches_compound(nodes, id, last) {
        return false;
    }

    // Walk up, greedily matching the remaining compounds right to left
    let mut remaining = ancestors.iter().rev().peekable();
    let mut cursor = nodes[id].parent;
    while let Some(wanted) = remaining.peek() {
        let Some(ancestor) = cursor else {
            return false;
        };
        if matches_compound(nodes, ancestor, wanted) {
            remaining.next();
        }
        cursor = nodes[ancestor].parent;
    }
    true
}
