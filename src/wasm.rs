use crate::palette::{self, Palette};
use crate::point::Point;
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// WASM wrapper around a colour palette.
#[wasm_bindgen(js_name = Palette)]
pub struct PaletteWASM {
    inner: Palette,
}

#[wasm_bindgen(js_class = Palette)]
impl PaletteWASM {
    /// Builds a palette from packed pixel bytes, e.g. `ImageData.data` with `channels = 4`.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is less than 3.
    #[wasm_bindgen(constructor)]
    pub fn new(pixels: &[u8], channels: usize) -> PaletteWASM {
        PaletteWASM {
            inner: Palette::from_bytes(pixels, channels),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn count_colors(&self) -> usize {
        self.inner.len()
    }

    /// The palette colours as a flat `[r, g, b, r, g, b, ...]` array.
    #[wasm_bindgen(getter)]
    pub fn colors(&self) -> Vec<i32> {
        self.inner.colors().iter().flatten().copied().collect()
    }

    pub fn nearest(&self, r: i32, g: i32, b: i32) -> Result<Vec<i32>, JsError> {
        let color = self.inner.nearest(&[r, g, b])?;
        Ok(color.to_vec())
    }

    /// Accepts any JS array-like `[r, g, b]`.
    #[wasm_bindgen(js_name = nearestOf)]
    pub fn nearest_of(&self, val: JsValue) -> Result<Vec<i32>, JsError> {
        let color = parse_js_color(&val).ok_or_else(|| JsError::new("expected an array of 3 numbers"))?;
        let color = self.inner.nearest(&color)?;
        Ok(color.to_vec())
    }

    /// Remaps packed pixel bytes in place.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is less than 3 and the palette is not empty.
    pub fn remap(&self, pixels: &mut [u8], channels: usize) -> Result<(), JsError> {
        self.inner.remap_bytes(pixels, channels)?;
        Ok(())
    }
}

/// # Panics
///
/// Panics if `channels` is less than 3.
#[wasm_bindgen(js_name = countUniqueColors)]
pub fn count_unique_colors(pixels: &[u8], channels: usize) -> usize {
    palette::count_unique_colors(palette::pixels(pixels, channels))
}

fn parse_js_color(val: &JsValue) -> Option<Point> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < 3 {
        return None;
    }
    let mut color = [0; 3];
    for (i, c) in color.iter_mut().enumerate() {
        *c = arr.get(i as u32).as_f64()? as i32;
    }
    Some(color)
}
