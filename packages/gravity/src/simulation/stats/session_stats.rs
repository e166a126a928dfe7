use wasm_bindgen::prelude::*;

/// Counters for one gravity session, readable from JS after or during a run
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub(crate) dissipated: u32,
    pub(crate) exploded: u32,
    pub(crate) boundary: u32,
    pub(crate) steps: u32,
    pub(crate) frames: u32,
    pub(crate) impulses: u32,
    pub(crate) render_failures: u32,
}

#[wasm_bindgen]
impl SessionStats {
    #[wasm_bindgen(getter)]
    pub fn dissipated(&self) -> u32 { self.dissipated }
    #[wasm_bindgen(getter)]
    pub fn exploded(&self) -> u32 { self.exploded }
    #[wasm_bindgen(getter)]
    pub fn boundary(&self) -> u32 { self.boundary }
    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> u32 { self.steps }
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u32 { self.frames }
    /// Bodies pushed by pointer-down, summed over all clicks
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn render_failures(&self) -> u32 { self.render_failures }
}
