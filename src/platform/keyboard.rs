//! Arrow-key subscription
//!
//! Holds the `keydown` listener for as long as the binding lives; dropping it
//! unsubscribes.

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

use crate::sim::Direction;

pub struct KeyboardBinding {
    window: Window,
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardBinding {
    /// Subscribe `on_hop` to arrow keys on the window.
    ///
    /// Only fires while the page has focus. Key repeats are not filtered, each
    /// one is a hop.
    pub fn attach<F>(mut on_hop: F) -> Result<Self, JsValue>
    where
        F: FnMut(Direction) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if !super::page::has_focus() {
                return;
            }
            if let Some(direction) = Direction::from_key(&event.key()) {
                // Arrow keys would scroll the page otherwise
                event.prevent_default();
                on_hop(direction);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

        Ok(Self { window, closure })
    }
}

impl Drop for KeyboardBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        log::debug!("Keyboard binding detached");
    }
}
