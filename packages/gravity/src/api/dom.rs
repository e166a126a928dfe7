//! `Page` over the live document via web-sys

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Window};

use crate::domain::page::{Page, Rect};
use crate::rigid_body::Vec2;

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// `None` outside a browser (no window or no document)
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Inline declaration block of any element, HTML or SVG
    fn inline_style(&self, element: &Element) -> Result<CssStyleDeclaration, String> {
        Reflect::get(element, &JsValue::from_str("style"))
            .map_err(js_error)?
            .dyn_into::<CssStyleDeclaration>()
            .map_err(|_| "element has no inline style".to_string())
    }
}

impl Page for DomPage {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                gravity_warn!("bad selector {}: {}", selector, js_error(e));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn computed_style(&self, node: &Element, property: &str) -> Option<String> {
        let style = self.window.get_computed_style(node).ok()??;
        style.get_property_value(property).ok()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn style_attribute(&self, node: &Element) -> Option<String> {
        node.get_attribute("style")
    }

    fn set_style_attribute(&self, node: &Element, value: Option<&str>) -> Result<(), String> {
        match value {
            Some(value) => node.set_attribute("style", value).map_err(js_error),
            None => node.remove_attribute("style").map_err(js_error),
        }
    }

    fn set_style_property(&self, node: &Element, name: &str, value: &str) -> Result<(), String> {
        let style = self.inline_style(node)?;
        if value.is_empty() {
            style.remove_property(name).map(|_| ()).map_err(js_error)
        } else {
            style.set_property(name, value).map_err(js_error)
        }
    }

    fn force_layout(&self, node: &Element) {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => {
                let _ = html.offset_width();
            }
            None => {
                let _ = node.get_bounding_client_rect();
            }
        }
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn scroll_position(&self) -> Vec2 {
        Vec2::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.window.scroll_to_with_x_and_y(x, y);
    }
}
