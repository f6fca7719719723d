use wasm_bindgen::prelude::*;
use serde::Serialize;

use harmony::lilypond::parse_chords;
use harmony::{HarmonyError, HighlightModes, HighlightPalette, KeySignature, Trainer};

fn error_to_js(e: HarmonyError) -> JsValue {
    let body = serde_json::json!({
        "kind": e.kind(),
        "message": e.to_string(),
    });
    JsValue::from_str(&body.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_modes(modes: &str) -> Result<HighlightModes, JsValue> {
    modes.parse().map_err(error_to_js)
}

/// Palette from a JS object `{ priority: [...], colors: {...} }`; `undefined` means no colours
fn parse_palette(palette: JsValue) -> Result<HighlightPalette, JsValue> {
    if palette.is_undefined() || palette.is_null() {
        return Ok(HighlightPalette::default());
    }
    serde_wasm_bindgen::from_value(palette).map_err(|e| {
        error_to_js(HarmonyError::Config(e.to_string()))
    })
}

/// Trainer state held on the JS side between MIDI events
#[wasm_bindgen]
pub struct Session {
    trainer: Trainer<'static>,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new(key: &str) -> Result<Session, JsValue> {
        Ok(Session {
            trainer: Trainer::new(key).map_err(error_to_js)?,
        })
    }

    /// Returns false if the note was already on
    #[wasm_bindgen(js_name = noteOn)]
    pub fn note_on(&mut self, midi: u8) -> bool {
        self.trainer.note_on(midi)
    }

    #[wasm_bindgen(js_name = noteOff)]
    pub fn note_off(&mut self, midi: u8) -> bool {
        self.trainer.note_off(midi)
    }

    pub fn clear(&mut self) -> bool {
        self.trainer.clear()
    }

    #[wasm_bindgen(js_name = setDisplayedKeyOnly)]
    pub fn set_displayed_key_only(&mut self, key: &str) -> Result<(), JsValue> {
        self.trainer.set_displayed_key_only(key).map_err(error_to_js)
    }

    #[wasm_bindgen(js_name = setSignatureKeyOnly)]
    pub fn set_signature_key_only(&mut self, key: &str) -> Result<(), JsValue> {
        self.trainer.set_signature_key_only(key).map_err(error_to_js)
    }

    #[wasm_bindgen(js_name = setDisplayedAndSignatureKey)]
    pub fn set_displayed_and_signature_key(&mut self, key: &str) -> Result<(), JsValue> {
        self.trainer.set_displayed_and_signature_key(key).map_err(error_to_js)
    }

    /// Snapshot as JSON; `modes` is a list such as "roots,tritones"
    pub fn snapshot(&self, modes: &str, palette: JsValue) -> Result<String, JsValue> {
        let modes = parse_modes(modes)?;
        let palette = parse_palette(palette)?;
        to_json(&self.trainer.snapshot(modes, &palette))
    }
}

/// Spell MIDI notes in `key`, returning a snapshot as JSON
#[wasm_bindgen]
pub fn spell(notes: &[u8], key: &str) -> Result<String, JsValue> {
    let mut trainer = Trainer::new(key).map_err(error_to_js)?;
    for &n in notes {
        trainer.note_on(n);
    }
    to_json(&trainer.snapshot(HighlightModes::none(), &HighlightPalette::default()))
}

/// Classify notes in `key` and return the highlights as a JSON array
#[wasm_bindgen]
pub fn classify(notes: &[u8], key: &str, modes: &str) -> Result<String, JsValue> {
    let key = KeySignature::builtin(key).map_err(error_to_js)?;
    let modes = parse_modes(modes)?;
    to_json(&harmony::classify(notes, &key, modes))
}

/// Parse LilyPond chords and return `[{ visible, hidden }, ...]` as JSON
#[wasm_bindgen(js_name = parseChords)]
pub fn parse_chords_json(text: &str) -> Result<String, JsValue> {
    let chords = parse_chords(text).map_err(error_to_js)?;
    to_json(&chords)
}
