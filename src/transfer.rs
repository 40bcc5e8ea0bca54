use duopuzzle_core::{PieceId, PieceIdError, Point, PoolRect};
use wasm_bindgen::JsValue;
use web_sys::DomRect;

/// Drag payloads arrive as the text the host put into the data transfer.
pub(crate) fn piece_from_transfer(raw: &str) -> Result<PieceId, PieceIdError> {
    PieceId::parse(raw)
}

pub(crate) fn pool_rect_from_dom(rect: &DomRect) -> PoolRect {
    pool_rect(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn pool_rect(left: f64, top: f64, width: f64, height: f64) -> PoolRect {
    PoolRect {
        left: left as f32,
        top: top as f32,
        width: width as f32,
        height: height as f32,
    }
}

pub(crate) fn point(x: f64, y: f64) -> Point {
    Point::new(x as f32, y as f32)
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
