//! Contract types for the YouTube IFrame player
//!
//! These mirror the numeric and string codes the external player uses on
//! the wire. They carry no behaviour beyond conversions.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player state as reported by `getPlayerState()` and `onStateChange`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PlayerState {
    /// -1, the player has not started a video yet
    Unstarted,
    /// 0
    Ended,
    /// 1
    Playing,
    /// 2
    Paused,
    /// 3
    Buffering,
    /// 5, a video is cued and ready to play
    Cued,
}

impl PlayerState {
    /// All states in code order
    pub const ALL: [PlayerState; 6] = [
        PlayerState::Unstarted,
        PlayerState::Ended,
        PlayerState::Playing,
        PlayerState::Paused,
        PlayerState::Buffering,
        PlayerState::Cued,
    ];

    /// Wire code of this state
    pub fn code(&self) -> i32 {
        match self {
            PlayerState::Unstarted => -1,
            PlayerState::Ended => 0,
            PlayerState::Playing => 1,
            PlayerState::Paused => 2,
            PlayerState::Buffering => 3,
            PlayerState::Cued => 5,
        }
    }

    /// Look up a state from its wire code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == code)
    }

    /// Name used by the `YT.PlayerState` namespace
    pub fn constant_name(&self) -> &'static str {
        match self {
            PlayerState::Unstarted => "UNSTARTED",
            PlayerState::Ended => "ENDED",
            PlayerState::Playing => "PLAYING",
            PlayerState::Paused => "PAUSED",
            PlayerState::Buffering => "BUFFERING",
            PlayerState::Cued => "CUED",
        }
    }

    /// True for every state in which no video is actively playing
    pub fn is_idle(&self) -> bool {
        !matches!(self, PlayerState::Playing | PlayerState::Buffering)
    }
}

impl From<PlayerState> for i32 {
    fn from(state: PlayerState) -> Self {
        state.code()
    }
}

impl TryFrom<i32> for PlayerState {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code).ok_or(Error::UnknownStateCode(code))
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Unstarted => write!(f, "unstarted"),
            PlayerState::Ended => write!(f, "ended"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Cued => write!(f, "video cued"),
        }
    }
}

/// Error codes delivered in the `data` field of `onError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PlayerErrorCode {
    /// 2, the request contains an invalid parameter value
    InvalidParameter,
    /// 5, the content cannot be played in an HTML5 player
    Html5,
    /// 100, the video was removed or marked private
    NotFound,
    /// 101, the owner does not allow embedded playback
    EmbedForbidden,
    /// 150, identical to 101
    EmbedForbiddenAlias,
}

impl PlayerErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            PlayerErrorCode::InvalidParameter => 2,
            PlayerErrorCode::Html5 => 5,
            PlayerErrorCode::NotFound => 100,
            PlayerErrorCode::EmbedForbidden => 101,
            PlayerErrorCode::EmbedForbiddenAlias => 150,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(PlayerErrorCode::InvalidParameter),
            5 => Some(PlayerErrorCode::Html5),
            100 => Some(PlayerErrorCode::NotFound),
            101 => Some(PlayerErrorCode::EmbedForbidden),
            150 => Some(PlayerErrorCode::EmbedForbiddenAlias),
            _ => None,
        }
    }

    /// Human readable meaning of the code
    pub fn description(&self) -> &'static str {
        match self {
            PlayerErrorCode::InvalidParameter => {
                "The request contains an invalid parameter value, e.g. a video id that is not 11 characters"
            }
            PlayerErrorCode::Html5 => {
                "The requested content cannot be played in an HTML5 player"
            }
            PlayerErrorCode::NotFound => {
                "The requested video was not found; it was removed or marked private"
            }
            PlayerErrorCode::EmbedForbidden | PlayerErrorCode::EmbedForbiddenAlias => {
                "The owner of the requested video does not allow it to be played in embedded players"
            }
        }
    }

    /// 101 and 150 are the same condition
    pub fn is_embed_restriction(&self) -> bool {
        matches!(
            self,
            PlayerErrorCode::EmbedForbidden | PlayerErrorCode::EmbedForbiddenAlias
        )
    }
}

impl From<PlayerErrorCode> for i32 {
    fn from(code: PlayerErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for PlayerErrorCode {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code).ok_or(Error::UnknownErrorCode(code))
    }
}

impl std::fmt::Display for PlayerErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// Playback quality reported by `onPlaybackQualityChange`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackQuality {
    Small,
    Medium,
    Large,
    Hd720,
    Hd1080,
    Highres,
}

impl PlaybackQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackQuality::Small => "small",
            PlaybackQuality::Medium => "medium",
            PlaybackQuality::Large => "large",
            PlaybackQuality::Hd720 => "hd720",
            PlaybackQuality::Hd1080 => "hd1080",
            PlaybackQuality::Highres => "highres",
        }
    }
}

impl FromStr for PlaybackQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(PlaybackQuality::Small),
            "medium" => Ok(PlaybackQuality::Medium),
            "large" => Ok(PlaybackQuality::Large),
            "hd720" => Ok(PlaybackQuality::Hd720),
            "hd1080" => Ok(PlaybackQuality::Hd1080),
            "highres" => Ok(PlaybackQuality::Highres),
            other => Err(Error::UnknownQuality(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlaybackQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event slots of the `events` object passed to `YT.Player`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Player finished loading and accepts API calls
    #[serde(rename = "onReady")]
    Ready,
    /// `data` is a [`PlayerState`] code
    #[serde(rename = "onStateChange")]
    StateChange,
    /// `data` is a [`PlaybackQuality`] string
    #[serde(rename = "onPlaybackQualityChange")]
    PlaybackQualityChange,
    /// `data` is the new playback rate
    #[serde(rename = "onPlaybackRateChange")]
    PlaybackRateChange,
    /// `data` is a [`PlayerErrorCode`]
    #[serde(rename = "onError")]
    Error,
    /// A module with exposed API methods was loaded or unloaded
    #[serde(rename = "onApiChange")]
    ApiChange,
}

impl PlayerEvent {
    pub const ALL: [PlayerEvent; 6] = [
        PlayerEvent::Ready,
        PlayerEvent::StateChange,
        PlayerEvent::PlaybackQualityChange,
        PlayerEvent::PlaybackRateChange,
        PlayerEvent::Error,
        PlayerEvent::ApiChange,
    ];

    /// Key used in the `events` object and by `addEventListener`
    pub fn js_name(&self) -> &'static str {
        match self {
            PlayerEvent::Ready => "onReady",
            PlayerEvent::StateChange => "onStateChange",
            PlayerEvent::PlaybackQualityChange => "onPlaybackQualityChange",
            PlayerEvent::PlaybackRateChange => "onPlaybackRateChange",
            PlayerEvent::Error => "onError",
            PlayerEvent::ApiChange => "onApiChange",
        }
    }
}

impl FromStr for PlayerEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.js_name() == s)
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}

impl std::fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.js_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes() {
        assert_eq!(PlayerState::Unstarted.code(), -1);
        assert_eq!(PlayerState::Cued.code(), 5);
        assert_eq!(PlayerState::from_code(2), Some(PlayerState::Paused));
        assert_eq!(PlayerState::from_code(4), None);
    }

    #[test]
    fn test_state_serializes_as_code() {
        assert_eq!(serde_json::to_string(&PlayerState::Buffering).unwrap(), "3");
        let state: PlayerState = serde_json::from_str("-1").unwrap();
        assert_eq!(state, PlayerState::Unstarted);
        assert!(serde_json::from_str::<PlayerState>("7").is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PlayerErrorCode::from_code(150), Some(PlayerErrorCode::EmbedForbiddenAlias));
        assert!(PlayerErrorCode::EmbedForbiddenAlias.is_embed_restriction());
        assert!(!PlayerErrorCode::NotFound.is_embed_restriction());
        assert_eq!(
            PlayerErrorCode::EmbedForbidden.description(),
            PlayerErrorCode::EmbedForbiddenAlias.description()
        );
        assert!(matches!(
            PlayerErrorCode::try_from(3),
            Err(Error::UnknownErrorCode(3))
        ));
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("hd720".parse::<PlaybackQuality>().unwrap(), PlaybackQuality::Hd720);
        assert!("4k".parse::<PlaybackQuality>().is_err());
        assert!(PlaybackQuality::Small < PlaybackQuality::Highres);
        assert_eq!(
            serde_json::to_string(&PlaybackQuality::Hd1080).unwrap(),
            "\"hd1080\""
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(PlayerEvent::ApiChange.js_name(), "onApiChange");
        assert_eq!("onError".parse::<PlayerEvent>().unwrap(), PlayerEvent::Error);
        assert_eq!(
            serde_json::to_string(&PlayerEvent::PlaybackRateChange).unwrap(),
            "\"onPlaybackRateChange\""
        );
    }
}
