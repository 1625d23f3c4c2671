//! ytframe WASM - YouTube IFrame player bindings for the browser
//!
//! Provides:
//! - Lazy injection of the IFrame API bootstrap script
//! - The `onYouTubeIframeAPIReady` hook, forwarded to a readiness gate
//! - `registerOnReady` / `unregisterOnReady` for JavaScript callers
//! - A typed `Player` over `YT.Player` for Rust callers
//! - `tracing` output routed to the browser console
//!
//! A page is bootstrapped once. Every `YouTubeLoader` and every JS export
//! shares the same hook, gate and injected script.
//!
//! ## JavaScript usage
//!
//! ```javascript
//! import init, { registerOnReady, unregisterOnReady } from '@ytframe/wasm';
//!
//! await init();
//! registerOnReady(() => {
//!   new YT.Player('player', { videoId: 'M7lc1UVf-VE' });
//! });
//! ```
//!
//! ## Rust usage
//!
//! ```ignore
//! use ytframe_wasm::{Player, PlayerEvents, YouTubeLoader};
//! use ytframe_core::{LoaderConfig, PlayerConfig};
//!
//! let loader = YouTubeLoader::start(LoaderConfig::default())?;
//! loader.register_on_ready(|| {
//!     let events = PlayerEvents::new().on_state_change(|state| tracing::info!(?state));
//!     let player = Player::new("player", &PlayerConfig::new("M7lc1UVf-VE"), events);
//!     // keep `player` alive somewhere
//! });
//! ```

use js_sys::Function;
use wasm_bindgen::prelude::*;
use ytframe_core::{Error, LoaderConfig};

mod bindings;
mod dom;
mod events;
mod loader;
mod logging;
mod player;

pub use bindings::YtPlayer;
pub use dom::DomHost;
pub use events::{event_data, PlayerEvents};
pub use loader::{page_gate, register_js, Gate, ReadyCallback, YouTubeLoader};
pub use player::{build_options, Player};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ytframe WASM initialized");
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(err: Error) -> JsValue {
    js_sys::Error::new(&format!("[{}] {}", err.error_code(), err)).into()
}

/// Bootstrap the IFrame API with an optional loader config object.
///
/// Returns how the script was placed. Once the page is bootstrapped, later
/// calls return the first outcome and ignore `config`.
#[wasm_bindgen(js_name = loadIframeApi)]
pub fn load_iframe_api(config: JsValue) -> Result<String, JsValue> {
    let config: LoaderConfig = if config.is_undefined() || config.is_null() {
        LoaderConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js_error(Error::InvalidConfig(e.to_string())))?
    };

    let loader = YouTubeLoader::start(config).map_err(to_js_error)?;
    Ok(loader.injection().map(|i| i.to_string()).unwrap_or_default())
}

/// Call `callback` once the IFrame API is ready; immediately if it already is.
///
/// Registering a function that is already pending is a no-op, so it runs
/// once, as with `addEventListener`.
#[wasm_bindgen(js_name = registerOnReady)]
pub fn register_on_ready(callback: Function) -> Result<(), JsValue> {
    let gate = YouTubeLoader::attach().map_err(to_js_error)?.gate();
    register_js(&gate, callback);
    Ok(())
}

/// Remove a pending callback. Returns false if it was not pending.
#[wasm_bindgen(js_name = unregisterOnReady)]
pub fn unregister_on_ready(callback: &Function) -> bool {
    page_gate().is_some_and(|gate| gate.unregister_where(|w| w.is_function(callback)) > 0)
}

/// Has the readiness hook fired
#[wasm_bindgen(js_name = isApiReady)]
pub fn is_api_ready() -> bool {
    page_gate().is_some_and(|gate| gate.is_ready())
}
