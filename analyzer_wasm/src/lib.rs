//! WASM bindings for the completion analyzer.
//!
//! Editors speak UTF-16 offsets; everything past [`converter::Converter`] works in bytes.

pub mod converter;
pub mod dto;
pub mod offsets;
pub mod span;

use wasm_bindgen::prelude::*;

use crate::converter::Converter;
use crate::dto::v1::CompletionResult;

/// Completes the expression in `source` up to `cursor_utf16`.
///
/// `request_json` is a `CompletionRequest`; an empty string means an empty catalogue and
/// scope. Request errors are reported through `CompletionResult.error`.
#[wasm_bindgen]
pub fn complete(source: String, cursor_utf16: u32, request_json: String) -> JsValue {
    let result = complete_view(&source, cursor_utf16 as usize, &request_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Native entry point behind [`complete`].
pub fn complete_view(source: &str, cursor_utf16: usize, request_json: &str) -> CompletionResult {
    let request = match Converter::parse_request(request_json) {
        Ok(request) => request,
        Err(err) => return Converter::error_result(err),
    };

    let cursor = Converter::cursor_utf16_to_byte(source, cursor_utf16);
    let input = source.get(..cursor).unwrap_or(source);
    let evaluation = analyzer::evaluate(input, &request.catalogue, &request.scope, &request.config);
    Converter::completion_result(input, &evaluation, &request.catalogue, request.max_items)
}

#[cfg(test)]
mod tests;
