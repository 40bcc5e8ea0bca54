mod host;
mod transfer;
mod view;

use duopuzzle_core::rng::seed_from_nonce;
use duopuzzle_core::{Gesture, PieceId, PuzzleConfig, PuzzleSettings, PuzzleSurface, Session};
use js_sys::{Date, Function};
use wasm_bindgen::prelude::*;
use web_sys::DomRect;

use crate::host::{HostSink, JsLocalizer};
use crate::transfer::{js_error, piece_from_transfer, point, pool_rect, pool_rect_from_dom};
use crate::view::{status_name, transition_name, LayoutView, StateView};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Outcome name for a gesture whose payload is not a piece id.
pub const INVALID_PAYLOAD: &str = "invalid";

fn time_seed() -> u32 {
    seed_from_nonce(Date::now() as u64)
}

/// One puzzle instance bound to a host page.
///
/// Gesture methods take the raw drag-transfer text and return the outcome
/// name, e.g. `"placed"` or `"locked"`. They never throw.
#[wasm_bindgen]
pub struct PuzzleHandle {
    surface: PuzzleSurface<HostSink>,
}

#[wasm_bindgen]
impl PuzzleHandle {
    /// `config_json` may be empty or malformed, falling back to defaults;
    /// `on_solution` receives the solved side (1 or 2).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, on_solution: Function) -> PuzzleHandle {
        let settings = parse_settings(config_json);
        #[cfg(target_arch = "wasm32")]
        gloo::console::log!("puzzle: start", settings.rows as u32, settings.cols as u32);
        Self {
            surface: PuzzleSurface::new(settings, time_seed(), HostSink::new(on_solution)),
        }
    }

    #[wasm_bindgen(js_name = setWinSoundCallback)]
    pub fn set_win_sound_callback(&mut self, callback: Option<Function>) {
        self.surface.sink_mut().set_win_sound(callback);
    }

    pub fn reset(&mut self) {
        self.surface.reset(time_seed());
        #[cfg(target_arch = "wasm32")]
        gloo::console::log!("puzzle: reset");
    }

    /// `left`/`top` are the dragged piece's client-space corner, so the grab
    /// offset survives a drop on the pool.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(
        &mut self,
        raw_id: &str,
        pointer_x: f64,
        pointer_y: f64,
        left: f64,
        top: f64,
    ) -> String {
        self.gesture_for(raw_id, |piece| Gesture::DragStart {
            piece,
            pointer: point(pointer_x, pointer_y),
            piece_origin: point(left, top),
        })
    }

    #[wasm_bindgen(js_name = dropOnCell)]
    pub fn drop_on_cell(&mut self, raw_id: &str, cell: u32) -> String {
        self.gesture_for(raw_id, |piece| Gesture::DropOnCell {
            piece,
            cell: cell as usize,
        })
    }

    #[wasm_bindgen(js_name = dropOnPool)]
    pub fn drop_on_pool(
        &mut self,
        raw_id: &str,
        pointer_x: f64,
        pointer_y: f64,
        pool: &DomRect,
    ) -> String {
        let pool = pool_rect_from_dom(pool);
        self.gesture_for(raw_id, |piece| Gesture::DropOnPool {
            piece,
            pointer: point(pointer_x, pointer_y),
            pool,
        })
    }

    /// Same as `dropOnPool` for hosts that pass the pool box as numbers.
    #[wasm_bindgen(js_name = dropOnPoolRect)]
    #[allow(clippy::too_many_arguments)]
    pub fn drop_on_pool_rect(
        &mut self,
        raw_id: &str,
        pointer_x: f64,
        pointer_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> String {
        self.gesture_for(raw_id, |piece| Gesture::DropOnPool {
            piece,
            pointer: point(pointer_x, pointer_y),
            pool: pool_rect(left, top, width, height),
        })
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) -> String {
        self.gesture(Gesture::DropOutside)
    }

    #[wasm_bindgen(js_name = toggleSide)]
    pub fn toggle_side(&mut self, raw_id: &str) -> String {
        self.gesture_for(raw_id, |piece| Gesture::Click { piece })
    }

    pub fn hover(&mut self, raw_id: &str) -> String {
        self.gesture_for(raw_id, |piece| Gesture::HoverEnter { piece })
    }

    /// Encoded session for the host to store; empty if encoding failed.
    pub fn snapshot(&self) -> Vec<u8> {
        match self.surface.session().to_bytes() {
            Ok(bytes) => bytes,
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                gloo::console::log!("puzzle: snapshot failed", _err.to_string());
                Vec::new()
            }
        }
    }

    /// Adopts a session saved by `snapshot`. Corrupt bytes or a different
    /// grid size leave the current puzzle untouched and return false.
    pub fn restore(&mut self, bytes: &[u8]) -> bool {
        let session = match Session::from_bytes(bytes) {
            Ok(session) => session,
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                gloo::console::log!("puzzle: restore rejected", _err.to_string());
                return false;
            }
        };
        self.surface.restore(session)
    }

    /// Recomputes the grid for a new container size and returns the layout JSON.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        self.surface.resize(width as f32, height as f32);
        self.layout_json()
    }

    /// Host verdict on the reported solution. Returns the resulting status.
    #[wasm_bindgen(js_name = confirmSolution)]
    pub fn confirm_solution(&mut self, accepted: bool) -> String {
        let status = self.surface.confirm_solution(accepted);
        #[cfg(target_arch = "wasm32")]
        gloo::console::log!("puzzle: verdict", accepted);
        status_name(status).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn locked(&self) -> bool {
        self.surface.session().is_locked()
    }

    #[wasm_bindgen(getter, js_name = delayMs)]
    pub fn delay_ms(&self) -> f64 {
        self.surface.settings().delay_ms as f64
    }

    #[wasm_bindgen(getter, js_name = winAudio)]
    pub fn win_audio(&self) -> String {
        self.surface.settings().win_audio.clone()
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        let view = StateView::new(
            self.surface.session(),
            self.surface.settings(),
            self.surface.status(),
        );
        serde_json::to_string(&view).map_err(js_error)
    }

    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsValue> {
        let view = LayoutView::new(&self.surface.layout(), self.surface.settings());
        serde_json::to_string(&view).map_err(js_error)
    }

    #[wasm_bindgen(js_name = poolLabel)]
    pub fn pool_label(&self, lookup: &Function) -> String {
        self.surface.pool_label(&JsLocalizer::new(lookup))
    }

    #[wasm_bindgen(js_name = boardLabel)]
    pub fn board_label(&self, lookup: &Function) -> String {
        self.surface.board_label(&JsLocalizer::new(lookup))
    }
}

impl PuzzleHandle {
    /// Payloads that are not piece ids (foreign drags, stale markup) are
    /// ignored like any other invalid gesture.
    fn gesture_for(&mut self, raw_id: &str, build: impl FnOnce(PieceId) -> Gesture) -> String {
        match piece_from_transfer(raw_id) {
            Ok(piece) => self.gesture(build(piece)),
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                gloo::console::log!("puzzle: ignored payload", _err.to_string());
                INVALID_PAYLOAD.to_string()
            }
        }
    }

    fn gesture(&mut self, gesture: Gesture) -> String {
        let transition = self.surface.handle(gesture);
        #[cfg(target_arch = "wasm32")]
        if !transition.is_ignored() {
            gloo::console::log!("puzzle:", transition_name(&transition));
        }
        transition_name(&transition).to_string()
    }
}

fn parse_settings(config_json: &str) -> PuzzleSettings {
    if config_json.trim().is_empty() {
        return PuzzleSettings::default();
    }
    match PuzzleConfig::from_json_str(config_json) {
        Ok(config) => config.resolve(),
        Err(_err) => {
            #[cfg(target_arch = "wasm32")]
            gloo::console::log!("puzzle: config rejected, using defaults", _err.to_string());
            PuzzleSettings::default()
        }
    }
}
