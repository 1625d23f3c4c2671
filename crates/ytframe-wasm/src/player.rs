//! Player - typed handle over `YT.Player`
//!
//! The caller owns the player. Construct it from inside a ready callback;
//! `YT.Player` does not exist before the readiness hook fires.

use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::HtmlIFrameElement;
use ytframe_core::{Error, PlayerConfig, PlayerEvent, PlayerState, Result};

use crate::{bindings::YtPlayer, dom::js_error, events::PlayerEvents};

/// Build the constructor argument: the serialized config plus `events`
pub fn build_options(config: &PlayerConfig, events: &PlayerEvents) -> Result<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let options = config
        .serialize(&serializer)
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    if !events.is_empty() {
        let events_obj: JsValue = events.to_object()?.into();
        Reflect::set(&options, &JsValue::from_str("events"), &events_obj).map_err(js_error)?;
    }

    Ok(options)
}

/// An embedded player and the closures it calls back into
pub struct Player {
    inner: YtPlayer,
    events: PlayerEvents,
}

impl Player {
    /// Create a player in place of the element with id `element_id`
    pub fn new(element_id: &str, config: &PlayerConfig, events: PlayerEvents) -> Result<Self> {
        config.validate()?;
        let options = build_options(config, &events)?;
        let inner = YtPlayer::new(element_id, &options).map_err(js_error)?;

        tracing::info!(
            element = element_id,
            video_id = config.video_id.as_deref().unwrap_or(""),
            events = ?events,
            "Player created"
        );

        Ok(Self { inner, events })
    }

    /// Raw binding, for calls this wrapper does not cover
    pub fn raw(&self) -> &YtPlayer {
        &self.inner
    }

    pub fn play(&self) {
        self.inner.play_video();
    }

    pub fn pause(&self) {
        self.inner.pause_video();
    }

    pub fn stop(&self) {
        self.inner.stop_video();
    }

    pub fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) {
        self.inner.seek_to(seconds.max(0.0), allow_seek_ahead);
    }

    pub fn mute(&self) {
        self.inner.mute();
    }

    pub fn unmute(&self) {
        self.inner.un_mute();
    }

    pub fn is_muted(&self) -> bool {
        self.inner.is_muted()
    }

    /// Volume is clamped to 0..=100
    pub fn set_volume(&self, volume: u8) {
        self.inner.set_volume(f64::from(volume.min(100)));
    }

    pub fn volume(&self) -> u8 {
        self.inner.get_volume().clamp(0.0, 100.0) as u8
    }

    pub fn duration(&self) -> f64 {
        self.inner.get_duration()
    }

    pub fn current_time(&self) -> f64 {
        self.inner.get_current_time()
    }

    pub fn loaded_fraction(&self) -> f64 {
        self.inner.get_video_loaded_fraction()
    }

    /// `None` if the player reports a code outside the documented set
    pub fn state(&self) -> Option<PlayerState> {
        PlayerState::from_code(self.inner.get_player_state())
    }

    pub fn iframe(&self) -> HtmlIFrameElement {
        self.inner.get_iframe()
    }

    /// Register a global function, by name, as an extra listener
    pub fn add_event_listener(&self, event: PlayerEvent, listener: &str) {
        self.inner.add_event_listener(event.js_name(), listener);
    }

    pub fn remove_event_listener(&self, event: PlayerEvent, listener: &str) {
        self.inner.remove_event_listener(event.js_name(), listener);
    }

    /// Remove the iframe and release the event closures
    pub fn destroy(self) {
        self.inner.destroy();
        tracing::debug!(handlers = ?self.events, "Player destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_take_config_and_events() {
        let build: fn(&PlayerConfig, &PlayerEvents) -> Result<JsValue> = build_options;
        let events = PlayerEvents::new();

        assert!(events.is_empty());
        assert_eq!(events.events().count(), 0);
        let _ = build;
    }
}
