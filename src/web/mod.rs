//! Browser host (feature `hydrate`).
//!
//! [`WebPage`] implements [`crate::page::Page`] on the live DOM; [`mount`] is
//! the wasm start function. It reads the optional config island, boots a
//! mirrored [`crate::runtime::Runtime`] once the document is parsed, and then
//! keeps real listeners, intersection observers and timers in step with what
//! the behaviors registered.

mod host;
mod page;

pub use host::mount;
pub use page::WebPage;

use wasm_bindgen::JsValue;

/// Log a failed DOM call and carry on.
pub(crate) fn logged<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("pagefx: {what} failed: {err:?}");
            None
        }
    }
}
