//! Player Events - Rust closures for the `events` slots of `YT.Player`
//!
//! Each handler receives the event object `{ target, data }`. The typed
//! helpers decode `data` into the matching contract type.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use ytframe_core::{PlaybackQuality, PlayerErrorCode, PlayerEvent, PlayerState, Result};

use crate::dom::js_error;

/// `data` field of a player event object
pub fn event_data(event: &JsValue) -> JsValue {
    Reflect::get(event, &JsValue::from_str("data")).unwrap_or(JsValue::UNDEFINED)
}

fn data_code(event: &JsValue) -> Option<i32> {
    event_data(event).as_f64().map(|code| code as i32)
}

/// Handlers for the six player event slots.
///
/// Owns the JS closures; keep it alive as long as the player can fire events.
#[derive(Default)]
pub struct PlayerEvents {
    handlers: Vec<(PlayerEvent, Closure<dyn FnMut(JsValue)>)>,
}

impl PlayerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a raw handler to `event`, replacing any earlier one
    pub fn on<F>(mut self, event: PlayerEvent, handler: F) -> Self
    where
        F: FnMut(JsValue) + 'static,
    {
        self.handlers.retain(|(slot, _)| *slot != event);
        self.handlers.push((event, Closure::new(handler)));
        self
    }

    pub fn on_ready<F>(self, mut handler: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on(PlayerEvent::Ready, move |_| handler())
    }

    /// `None` for codes outside the documented set
    pub fn on_state_change<F>(self, mut handler: F) -> Self
    where
        F: FnMut(Option<PlayerState>) + 'static,
    {
        self.on(PlayerEvent::StateChange, move |event| {
            handler(data_code(&event).and_then(PlayerState::from_code))
        })
    }

    pub fn on_playback_quality_change<F>(self, mut handler: F) -> Self
    where
        F: FnMut(Option<PlaybackQuality>) + 'static,
    {
        self.on(PlayerEvent::PlaybackQualityChange, move |event| {
            let quality = event_data(&event)
                .as_string()
                .and_then(|q| q.parse::<PlaybackQuality>().ok());
            handler(quality)
        })
    }

    pub fn on_playback_rate_change<F>(self, mut handler: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        self.on(PlayerEvent::PlaybackRateChange, move |event| {
            handler(event_data(&event).as_f64().unwrap_or(1.0))
        })
    }

    /// Unknown codes are passed through as `Err(UnknownErrorCode)`
    pub fn on_error<F>(self, mut handler: F) -> Self
    where
        F: FnMut(Result<PlayerErrorCode>) + 'static,
    {
        self.on(PlayerEvent::Error, move |event| {
            let code = data_code(&event).unwrap_or(-1);
            handler(PlayerErrorCode::try_from(code))
        })
    }

    pub fn on_api_change<F>(self, mut handler: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on(PlayerEvent::ApiChange, move |_| handler())
    }

    /// Slots with a handler attached
    pub fn events(&self) -> impl Iterator<Item = PlayerEvent> + '_ {
        self.handlers.iter().map(|(event, _)| *event)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Build the `events` object: slot name to function
    pub fn to_object(&self) -> Result<Object> {
        let object = Object::new();
        for (event, closure) in &self.handlers {
            Reflect::set(&object, &JsValue::from_str(event.js_name()), closure.as_ref())
                .map_err(js_error)?;
        }
        Ok(object)
    }
}

impl std::fmt::Debug for PlayerEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.events()).finish()
    }
}
