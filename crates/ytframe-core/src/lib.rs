//! ytframe Core - typed contract and lazy bootstrap for the YouTube IFrame player
//!
//! This crate provides the host-independent pieces:
//! - Contract types for the external player (state codes, error codes, quality levels, events)
//! - The `playerVars` / constructor descriptor with the player's wire encoding
//! - A one-shot readiness gate for "call me when the API is usable"
//! - The bootstrap injector, written against a minimal DOM trait
//! - Plain `<iframe>` embed URL rendering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          ytframe Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐          ┌──────────────┐                     │
//! │  │  Bootstrap   │  script  │   external   │                     │
//! │  │   Injector   │ ───────▶ │ iframe_api.js│                     │
//! │  └──────────────┘          └──────┬───────┘                     │
//! │                                   │ onYouTubeIframeAPIReady     │
//! │                            ┌──────┴───────┐                     │
//! │  register_on_ready ──────▶ │  Readiness   │ ──▶ waiters, in     │
//! │  unregister_on_ready ────▶ │     Gate     │     registration    │
//! │                            └──────────────┘     order           │
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │   Contract   │  │ PlayerConfig │  │  Embed URL   │           │
//! │  │    Types     │  │  PlayerVars  │  │   Builder    │           │
//! │  └──────────────┘  └──────────────┘  └──────────────┘           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod embed;
pub mod error;
pub mod gate;
pub mod loader;
pub mod types;

pub use config::{
    validate_video_id, AnnotationPolicy, CaptionLanguage, ListType, LoaderConfig, PlayerConfig,
    PlayerVars, ProgressColor, API_GLOBAL, IFRAME_API_URL, READY_HOOK,
};
pub use embed::EMBED_BASE_URL;
pub use error::{Error, Result};
pub use gate::{Callback, ReadinessGate, Registration, Waiter, WaiterId};
pub use loader::{inject_bootstrap, Bootstrap, Injection, ScriptHost};
pub use types::{PlaybackQuality, PlayerErrorCode, PlayerEvent, PlayerState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library start-up line
pub fn init() {
    tracing::info!(version = VERSION, "ytframe Core initialized");
}
