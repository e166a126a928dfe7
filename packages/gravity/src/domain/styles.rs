//! Inline style values written during a session

use super::page::Rect;

/// Identity transform in the form the frozen anchor starts with
pub const IDENTITY_TRANSFORM: &str = "translate(0, 0) rotate(0deg)";

pub const DISSIPATED_TRANSFORM: &str = "scale(0.8)";
pub const REAPPEARED_TRANSFORM: &str = "scale(1)";

/// Ease-out-expo, the "settle back into the grid" curve
const RETURN_EASING: &str = "cubic-bezier(0.19, 1, 0.22, 1)";

pub fn px(value: f64) -> String {
    format!("{}px", value)
}

fn seconds(ms: u32) -> String {
    format!("{}s", ms as f64 / 1000.0)
}

pub fn dissipate_transition(ms: u32) -> String {
    format!("all {} ease-out", seconds(ms))
}

pub fn return_transition(ms: u32) -> String {
    format!("transform {} {}", seconds(ms), RETURN_EASING)
}

pub fn reappear_transition(ms: u32) -> String {
    format!("all {} ease", seconds(ms))
}

/// Declarations that pin an element at its absolute anchor
pub fn freeze_declarations(anchor: &Rect) -> [(&'static str, String); 11] {
    [
        ("box-sizing", "border-box".to_string()),
        ("position", "absolute".to_string()),
        ("left", px(anchor.left)),
        ("top", px(anchor.top)),
        ("width", px(anchor.width)),
        ("height", px(anchor.height)),
        ("margin", "0".to_string()),
        ("transform", IDENTITY_TRANSFORM.to_string()),
        ("z-index", "1000".to_string()),
        ("pointer-events", "none".to_string()),
        ("transition", "none".to_string()),
    ]
}

/// Declarations that fade and shrink a dissipated element
pub fn dissipate_declarations(ms: u32) -> [(&'static str, String); 4] {
    [
        ("transition", dissipate_transition(ms)),
        ("transform", DISSIPATED_TRANSFORM.to_string()),
        ("opacity", "0".to_string()),
        ("pointer-events", "none".to_string()),
    ]
}

/// Transform that moves the anchor to the body's pose
pub fn body_transform(dx: f64, dy: f64, angle: f64) -> String {
    format!("translate({}px, {}px) rotate({}rad)", dx, dy, angle)
}
