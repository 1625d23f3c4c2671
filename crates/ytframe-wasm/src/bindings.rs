//! Raw bindings to the external `YT` namespace
//!
//! Signatures follow the IFrame Player API reference. Nothing here has
//! behaviour of its own; see [`crate::Player`] for the typed wrapper.

use wasm_bindgen::prelude::*;
use web_sys::HtmlIFrameElement;

#[wasm_bindgen(js_namespace = YT)]
extern "C" {
    /// An instantiated `YT.Player`
    #[wasm_bindgen(js_name = Player)]
    pub type YtPlayer;

    /// `new YT.Player(elementId, config)`; replaces the element with the player iframe
    #[wasm_bindgen(constructor, js_class = "Player", catch)]
    pub fn new(element_id: &str, config: &JsValue) -> Result<YtPlayer, JsValue>;

    /// Register a global function by name as listener for `event`
    #[wasm_bindgen(method, js_class = "Player", js_name = addEventListener)]
    pub fn add_event_listener(this: &YtPlayer, event: &str, listener: &str);

    #[wasm_bindgen(method, js_class = "Player", js_name = removeEventListener)]
    pub fn remove_event_listener(this: &YtPlayer, event: &str, listener: &str);

    /// Final state is playing (1)
    #[wasm_bindgen(method, js_class = "Player", js_name = playVideo)]
    pub fn play_video(this: &YtPlayer);

    /// Final state is paused (2), unless the player had ended (0)
    #[wasm_bindgen(method, js_class = "Player", js_name = pauseVideo)]
    pub fn pause_video(this: &YtPlayer);

    /// Stops and cancels loading; may leave any not-playing state
    #[wasm_bindgen(method, js_class = "Player", js_name = stopVideo)]
    pub fn stop_video(this: &YtPlayer);

    /// Seek to `seconds`; `allow_seek_ahead` permits a new request outside the buffer
    #[wasm_bindgen(method, js_class = "Player", js_name = seekTo)]
    pub fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_class = "Player")]
    pub fn mute(this: &YtPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = unMute)]
    pub fn un_mute(this: &YtPlayer);

    #[wasm_bindgen(method, js_class = "Player", js_name = isMuted)]
    pub fn is_muted(this: &YtPlayer) -> bool;

    /// 0 until metadata loads; elapsed stream time for live events
    #[wasm_bindgen(method, js_class = "Player", js_name = getDuration)]
    pub fn get_duration(this: &YtPlayer) -> f64;

    /// Integer between 0 and 100
    #[wasm_bindgen(method, js_class = "Player", js_name = setVolume)]
    pub fn set_volume(this: &YtPlayer, volume: f64);

    /// Reported even while muted
    #[wasm_bindgen(method, js_class = "Player", js_name = getVolume)]
    pub fn get_volume(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_class = "Player", js_name = getIframe)]
    pub fn get_iframe(this: &YtPlayer) -> HtmlIFrameElement;

    /// Removes the player iframe
    #[wasm_bindgen(method, js_class = "Player")]
    pub fn destroy(this: &YtPlayer);

    /// Buffered fraction between 0 and 1
    #[wasm_bindgen(method, js_class = "Player", js_name = getVideoLoadedFraction)]
    pub fn get_video_loaded_fraction(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_class = "Player", js_name = getPlayerState)]
    pub fn get_player_state(this: &YtPlayer) -> i32;

    /// Seconds since the video started playing
    #[wasm_bindgen(method, js_class = "Player", js_name = getCurrentTime)]
    pub fn get_current_time(this: &YtPlayer) -> f64;
}
