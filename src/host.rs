use duopuzzle_core::{Localizer, Side, SolutionSink};
use js_sys::Function;
use wasm_bindgen::JsValue;

/// Forwards solutions and sound requests to host callbacks.
pub(crate) struct HostSink {
    on_solution: Function,
    on_win_sound: Option<Function>,
}

impl HostSink {
    pub(crate) fn new(on_solution: Function) -> Self {
        Self {
            on_solution,
            on_win_sound: None,
        }
    }

    pub(crate) fn set_win_sound(&mut self, callback: Option<Function>) {
        self.on_win_sound = callback;
    }
}

impl SolutionSink for HostSink {
    fn solution(&mut self, side: Side) {
        let value = JsValue::from(side.value());
        if self.on_solution.call1(&JsValue::NULL, &value).is_err() {
            #[cfg(target_arch = "wasm32")]
            gloo::console::log!("puzzle: solution callback threw");
        }
    }

    fn win_sound(&mut self, src: &str) {
        let Some(callback) = self.on_win_sound.as_ref() else {
            return;
        };
        let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(src));
    }
}

/// Label lookup through a host function `(key) => string | undefined`.
pub(crate) struct JsLocalizer<'a> {
    lookup: &'a Function,
}

impl<'a> JsLocalizer<'a> {
    pub(crate) fn new(lookup: &'a Function) -> Self {
        Self { lookup }
    }
}

impl Localizer for JsLocalizer<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.lookup
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
            .filter(|text| !text.is_empty())
    }
}
