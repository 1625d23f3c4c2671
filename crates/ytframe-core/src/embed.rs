//! Plain `<iframe>` embed URLs
//!
//! For pages that embed the player without the JS API, the same parameters
//! go into the query string of `https://www.youtube.com/embed/VIDEO_ID`.
//! Playlist and uploads embeds use `https://www.youtube.com/embed?listType=..&list=..`.

use crate::{config::PlayerConfig, Error, Result};
use tracing::debug;
use url::Url;

/// Base of every embed URL
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

impl PlayerConfig {
    /// Render this config as an embed URL.
    ///
    /// Requires either a video id or a `list`/`listType` pair.
    pub fn embed_url(&self) -> Result<Url> {
        self.validate()?;

        let mut url = Url::parse(EMBED_BASE_URL)?;

        let has_list = self
            .player_vars
            .as_ref()
            .is_some_and(|vars| vars.list.is_some());

        match &self.video_id {
            Some(id) => {
                url.path_segments_mut()
                    .map_err(|_| Error::InvalidConfig("embed base cannot have path segments".into()))?
                    .push(id);
            }
            None if has_list => {}
            None => {
                return Err(Error::InvalidConfig(
                    "embed URL needs a video id or a list".into(),
                ));
            }
        }

        if let Some(vars) = &self.player_vars {
            let pairs = vars.query_pairs()?;
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        debug!(url = %url, "Embed URL built");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListType, PlayerVars};

    #[test]
    fn test_single_video() {
        let url = PlayerConfig::new("M7lc1UVf-VE").embed_url().unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/embed/M7lc1UVf-VE");
    }

    #[test]
    fn test_looping_video() {
        let url = PlayerConfig::new("M7lc1UVf-VE")
            .with_vars(PlayerVars::looping("M7lc1UVf-VE"))
            .embed_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/embed/M7lc1UVf-VE?loop=1&playlist=M7lc1UVf-VE"
        );
    }

    #[test]
    fn test_playlist_without_video() {
        let config = PlayerConfig::default().with_vars(PlayerVars {
            list: Some("PLC77007E23FF423C6".into()),
            list_type: Some(ListType::Playlist),
            ..Default::default()
        });
        let url = config.embed_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/embed?list=PLC77007E23FF423C6&listType=playlist"
        );
    }

    #[test]
    fn test_requires_content() {
        assert!(PlayerConfig::default().embed_url().is_err());
    }
}
