//! Configuration: the player descriptor handed to `YT.Player` and the
//! loader settings used to bootstrap the IFrame API.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;
use url::Url;

/// Default bootstrap script endpoint
pub const IFRAME_API_URL: &str = "https://www.youtube.com/iframe_api";

/// Global namespace installed by the bootstrap script
pub const API_GLOBAL: &str = "YT";

/// Global function the bootstrap script calls once loaded
pub const READY_HOOK: &str = "onYouTubeIframeAPIReady";

/// Length of every YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

/// Serialize `Option<bool>` as the 0/1 integers the player expects
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_u8(u8::from(*v)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Option::<u8>::deserialize(d)?.map(to_bool::<D::Error>).transpose()
    }

    pub(super) fn to_bool<E: serde::de::Error>(value: u8) -> Result<bool, E> {
        match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(E::custom(format!("expected 0 or 1, got {other}"))),
        }
    }
}

/// Serialize `bool` as an optional `1`; absent otherwise
mod presence {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Option::<u8>::deserialize(d)? {
            Some(value) => super::flag::to_bool(value),
            None => Ok(false),
        }
    }

    pub fn is_unset(value: &bool) -> bool {
        !*value
    }
}

/// Progress bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    Red,
    /// Disables `modestbranding`
    White,
}

/// Content selected through `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    /// `list` names a channel whose uploads are played
    UserUploads,
    /// `list` is a playlist id, prefixed with `PL`
    Playlist,
}

/// Annotation display policy (`iv_load_policy`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AnnotationPolicy {
    Show,
    Hide,
}

impl From<AnnotationPolicy> for u8 {
    fn from(policy: AnnotationPolicy) -> Self {
        match policy {
            AnnotationPolicy::Show => 1,
            AnnotationPolicy::Hide => 3,
        }
    }
}

impl TryFrom<u8> for AnnotationPolicy {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AnnotationPolicy::Show),
            3 => Ok(AnnotationPolicy::Hide),
            other => Err(Error::InvalidConfig(format!(
                "iv_load_policy must be 1 or 3, got {other}"
            ))),
        }
    }
}

/// Caption language preference (`cc_lang_pref`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionLanguage {
    /// ISO 639-1 two-letter code
    Code(String),
    /// The literal `1` the player also accepts
    Default,
}

impl Serialize for CaptionLanguage {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CaptionLanguage::Code(code) => s.serialize_str(code),
            CaptionLanguage::Default => s.serialize_u8(1),
        }
    }
}

impl<'de> Deserialize<'de> for CaptionLanguage {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(String),
            Flag(u8),
        }

        match Raw::deserialize(d)? {
            Raw::Code(code) => Ok(CaptionLanguage::Code(code)),
            Raw::Flag(1) => Ok(CaptionLanguage::Default),
            Raw::Flag(other) => Err(serde::de::Error::custom(format!(
                "cc_lang_pref must be a language code or 1, got {other}"
            ))),
        }
    }
}

/// Embedded player parameters (`playerVars`). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerVars {
    /// Start playing as soon as the player loads
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_lang_pref: Option<CaptionLanguage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ProgressColor>,
    /// Show player controls (player default: shown)
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,
    /// Ignore keyboard controls
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub disablekb: Option<bool>,
    /// Allow control through the IFrame API
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub enablejsapi: Option<bool>,
    /// Stop playback at this many seconds from the start of the video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    /// Show the fullscreen button (player default: shown)
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub fs: Option<bool>,
    /// Interface language, e.g. `fr` or `fr-ca`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_load_policy: Option<AnnotationPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, rename = "listType", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
    /// Replay the video (or playlist) when it ends
    #[serde(default, rename = "loop", with = "flag", skip_serializing_if = "Option::is_none")]
    pub loop_playback: Option<bool>,
    /// Hide the YouTube logo in the control bar
    #[serde(default, with = "presence", skip_serializing_if = "presence::is_unset")]
    pub modestbranding: bool,
    /// Embedding domain, recommended whenever `enablejsapi` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Comma separated video ids played after the initial video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
    /// Show related videos from other channels
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub rel: Option<bool>,
    /// Begin playback this many seconds into the video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_referrer: Option<String>,
}

impl PlayerVars {
    /// Parameters for a player driven through the IFrame API from `origin`
    pub fn api_controlled(origin: impl Into<String>) -> Self {
        Self {
            enablejsapi: Some(true),
            origin: Some(origin.into()),
            ..Default::default()
        }
    }

    /// Parameters that loop a single video.
    ///
    /// Single-video loops only work when `playlist` repeats the video id.
    pub fn looping(video_id: impl Into<String>) -> Self {
        Self {
            loop_playback: Some(true),
            playlist: Some(video_id.into()),
            ..Default::default()
        }
    }

    /// Check value domains the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(CaptionLanguage::Code(code)) = &self.cc_lang_pref {
            if code.is_empty() {
                return Err(Error::InvalidConfig("cc_lang_pref must not be empty".into()));
            }
        }

        for (name, value) in [("start", self.start), ("end", self.end)] {
            if value == Some(0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive number of seconds"
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end <= start {
                return Err(Error::InvalidConfig(format!(
                    "end ({end}s) must be after start ({start}s)"
                )));
            }
        }

        if self.list.is_some() != self.list_type.is_some() {
            return Err(Error::InvalidConfig(
                "list and listType must be set together".into(),
            ));
        }

        if let Some(playlist) = &self.playlist {
            for id in playlist.split(',') {
                validate_video_id(id.trim())?;
            }
        }

        if self.modestbranding && self.color == Some(ProgressColor::White) {
            warn!("color=white disables modestbranding");
        }

        if self.enablejsapi == Some(true) && self.origin.is_none() {
            warn!("enablejsapi is set without an origin");
        }

        Ok(())
    }

    /// Wire name/value pairs, suitable for an embed URL query string
    pub fn query_pairs(&self) -> Result<Vec<(String, String)>> {
        let value = serde_json::to_value(self)?;
        let serde_json::Value::Object(map) = value else {
            return Ok(Vec::new());
        };

        Ok(map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect())
    }
}

/// Descriptor passed to the `YT.Player` constructor.
///
/// Event callbacks are attached by the browser binding, which owns the JS
/// closures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_vars: Option<PlayerVars>,
}

impl PlayerConfig {
    /// Config for a single video
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
            ..Default::default()
        }
    }

    /// Set display dimensions; plain numbers are pixels, CSS units are kept
    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn with_vars(mut self, vars: PlayerVars) -> Self {
        self.player_vars = Some(vars);
        self
    }

    /// Validate the video id and the player parameters
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.video_id {
            validate_video_id(id)?;
        }
        if let Some(vars) = &self.player_vars {
            vars.validate()?;
        }
        Ok(())
    }

    /// Serialize to the JSON shape the constructor expects
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A video id is 11 characters from `[A-Za-z0-9_-]`
pub fn validate_video_id(id: &str) -> Result<()> {
    let valid = id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidVideoId(id.to_string()))
    }
}

/// Settings for bootstrapping the IFrame API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Bootstrap script URL
    pub script_url: String,
    /// Global the bootstrap script installs; its presence skips injection
    pub api_global: String,
    /// Global hook the bootstrap script calls when ready
    pub ready_hook: String,
    /// Warn when the hook has not fired after this many milliseconds.
    /// Waiters keep waiting either way.
    pub load_timeout_ms: Option<u32>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            script_url: IFRAME_API_URL.to_string(),
            api_global: API_GLOBAL.to_string(),
            ready_hook: READY_HOOK.to_string(),
            load_timeout_ms: None,
        }
    }
}

impl LoaderConfig {
    /// Default endpoints with a load warning after `timeout_ms`
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self {
            load_timeout_ms: Some(timeout_ms),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.script_url)?;
        if url.scheme() != "https" {
            return Err(Error::InvalidConfig(format!(
                "script_url must use https, got {}",
                url.scheme()
            )));
        }
        if self.api_global.is_empty() || self.ready_hook.is_empty() {
            return Err(Error::InvalidConfig(
                "api_global and ready_hook must be non-empty".into(),
            ));
        }
        if self.load_timeout_ms == Some(0) {
            return Err(Error::InvalidConfig("load_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
