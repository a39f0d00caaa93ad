// WebAssembly bindings for the morse-rx decoder
use js_sys::Array;
use morse_rx_core::{
    decode_morse_annotations, Annotation, AnnotationKind, MorseDecodeParams, MorseSignal,
};
use wasm_bindgen::prelude::*;

// Console logging for debugging
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn kind_str(kind: AnnotationKind) -> &'static str {
    match kind {
        AnnotationKind::Time => "time",
        AnnotationKind::Units => "units",
        AnnotationKind::Symbol => "symbol",
        AnnotationKind::Letter => "letter",
        AnnotationKind::Word => "word",
    }
}

/// Parse decoder params from JSON, falling back to defaults on empty or
/// malformed input.
fn parse_params(params_json: &str) -> MorseDecodeParams {
    if params_json.trim().is_empty() {
        MorseDecodeParams::default()
    } else {
        serde_json::from_str(params_json).unwrap_or_default()
    }
}

// JavaScript-compatible result type
#[wasm_bindgen]
pub struct MorseDecodeResult {
    text: String,
    annotations: Vec<Annotation>,
}

#[wasm_bindgen]
impl MorseDecodeResult {
    /// Decoded words joined by single spaces.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.annotations.len()
    }

    #[wasm_bindgen(getter)]
    pub fn annotations(&self) -> Array {
        let array = Array::new();
        for annotation in &self.annotations {
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"start".into(), &(annotation.start as f64).into())
                .unwrap();
            js_sys::Reflect::set(&obj, &"end".into(), &(annotation.end as f64).into()).unwrap();
            js_sys::Reflect::set(&obj, &"kind".into(), &kind_str(annotation.kind).into())
                .unwrap();
            js_sys::Reflect::set(&obj, &"text".into(), &annotation.text.clone().into()).unwrap();
            array.push(&obj);
        }
        array
    }
}

/// Decode a recorded on/off capture.
///
/// `signals` is a JS array of `{ on: boolean, seconds: number }` runs,
/// `sample_rate` the capture clock in Hz, `params_json` an optional JSON
/// object with `timeUnit` and `adaptRate`.
#[wasm_bindgen]
pub fn decode_morse(
    signals: JsValue,
    sample_rate: f64,
    params_json: &str,
) -> Result<MorseDecodeResult, JsValue> {
    let signals: Vec<MorseSignal> = serde_wasm_bindgen::from_value(signals)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let params = parse_params(params_json);
    let annotations = decode_morse_annotations(&signals, sample_rate, &params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Word)
        .map(|a| a.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(MorseDecodeResult { text, annotations })
}
