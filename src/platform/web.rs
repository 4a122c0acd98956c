use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::session::Session;
use crate::settings::{QualityPreset, Settings};
use crate::sim::TickInput;
use crate::tuning::Tuning;

/// Browser-facing handle around one `Session`
#[wasm_bindgen]
pub struct WebRunner {
    session: Session<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebRunner {
    /// `seed` is usually `Date.now()` from the page
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebRunner {
        console_error_panic_hook::set_once();
        // A second runner on the same page finds the logger already set
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Dash Runner starting...");
        let session = Session::new(
            seed.max(0.0) as u64,
            LocalStorageStore,
            Tuning::default(),
            Settings::load(),
        );
        WebRunner { session }
    }

    /// Step one animation frame. `dt` is in seconds and is clamped.
    pub fn frame(
        &mut self,
        dt: f32,
        jump: bool,
        jump_held: bool,
        duck: bool,
        pause: bool,
        restart: bool,
    ) {
        let input = TickInput {
            jump_requested: jump,
            jump_held,
            duck_held: duck,
            pause_toggled: pause,
            restart_requested: restart,
        };
        self.session.frame(dt, &input);
    }

    /// Current snapshot as JSON for the JS renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_quality(&mut self, name: &str) {
        match QualityPreset::parse(name) {
            Some(preset) => {
                log::info!("Quality preset: {}", preset.as_str());
                self.session.settings.apply_preset(preset);
                self.session.settings.save();
            }
            None => log::warn!("Unknown quality preset {:?}", name),
        }
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.session.settings.reduced_motion = enabled;
        self.session.settings.save();
    }

    pub fn set_screen_shake(&mut self, enabled: bool) {
        self.session.settings.screen_shake = enabled;
        self.session.settings.save();
    }
}
