//! WebAssembly bindings for the Seawall engine.
//!
//! This module exposes the controller to JavaScript through
//! wasm-bindgen. The surface mirrors the native one: commands in as
//! JSON, snapshots out as JSON, and a millisecond clock the host
//! advances from its own animation or interval timing.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::Command;
#[cfg(feature = "wasm")]
use crate::controller::{GameConfig, GameController};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    controller: GameController,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a game with the given per-turn seconds
    #[wasm_bindgen(constructor)]
    pub fn new(turn_duration_secs: u32, show_timeout_dialogue: bool) -> Result<WasmGame, JsValue> {
        let config = GameConfig {
            turn_duration_secs,
            show_timeout_dialogue,
        };
        let controller = GameController::new(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
        Ok(WasmGame { controller })
    }

    /// Apply a JSON-encoded command; returns whether it was accepted
    #[wasm_bindgen(js_name = applyCommand)]
    pub fn apply_command(&mut self, command_json: &str) -> Result<bool, JsValue> {
        let command: Command = serde_json::from_str(command_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid command JSON: {}", e)))?;
        Ok(self.controller.apply(command))
    }

    /// Advance the logical clock by `ms` milliseconds
    pub fn advance(&mut self, ms: u32) {
        self.controller.advance(ms as u64);
    }

    /// The full snapshot as JSON
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> String {
        serde_json::to_string(&self.controller.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// The board alone as JSON (for rendering)
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(self.controller.session().board())
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// The lifecycle phase as a JSON string
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(&self.controller.session().phase())
            .unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Whether the turn is mid-switch
    #[wasm_bindgen(js_name = isSwitching)]
    pub fn is_switching(&self) -> bool {
        self.controller.is_switching()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_wasm_module_compiles() {
        // This test just verifies the module compiles
        assert!(true);
    }
}
