//! Media resolution for the hover preview.
//!
//! Every row's media is resolved once at load into a [`MediaSource`]. The
//! preview turns that plus the global mute flag into a [`MediaElement`]
//! description which the host renders (a `<video>` or an embedded player).

use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_EMBED_HOST: &str = "www.youtube.com";

const DIRECT_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".ogg", ".ogv", ".mov", ".m4v"];

/// Resolved media for a row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MediaSource {
    /// A video file the host can play directly
    Direct {
        /// Resource URL
        url: String,
    },
    /// A video-platform watch link played through the embeddable player
    Embedded {
        /// Original watch URL
        watch_url: String,
        /// Platform video identifier
        video_id: String,
        /// Host serving the embeddable player
        host: String,
    },
    /// Nothing playable; the preview renders no media
    #[default]
    None,
}

impl MediaSource {
    /// Resolve a row's media.
    ///
    /// A non-blank `direct` resource wins. Otherwise `media_url` is used as a
    /// direct resource when it names a video file, or as an embedded player
    /// when it is a recognised watch link. Anything else resolves to
    /// [`MediaSource::None`].
    #[must_use]
    pub fn resolve(media_url: &str, direct: Option<&str>) -> Self {
        if let Some(direct) = direct.map(str::trim).filter(|d| !d.is_empty()) {
            return Self::Direct {
                url: direct.to_string(),
            };
        }

        let media_url = media_url.trim();
        if is_direct_resource(media_url) {
            return Self::Direct {
                url: media_url.to_string(),
            };
        }

        match watch_link(media_url) {
            Ok((host, video_id)) => Self::Embedded {
                watch_url: media_url.to_string(),
                video_id,
                host,
            },
            Err(err) => {
                tracing::warn!(url = media_url, error = %err, "media unresolvable, preview will be empty");
                Self::None
            }
        }
    }

    /// Whether there is anything to play.
    #[must_use]
    pub const fn is_playable(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Embeddable player URL for the given mute state (embedded media only).
    #[must_use]
    pub fn embed_url(&self, muted: bool) -> Option<String> {
        match self {
            Self::Embedded { video_id, host, .. } => embed_url(host, video_id, muted).ok(),
            Self::Direct { .. } | Self::None => None,
        }
    }

    /// Element description for the preview panel.
    #[must_use]
    pub fn element(&self, title: &str, muted: bool) -> Option<MediaElement> {
        match self {
            Self::Direct { url } => Some(MediaElement::Video {
                src: url.clone(),
                muted,
            }),
            Self::Embedded { .. } => self.embed_url(muted).map(|src| MediaElement::Frame {
                src,
                title: title.to_string(),
                key: if muted { "yt-muted" } else { "yt-unmuted" }.to_string(),
            }),
            Self::None => None,
        }
    }
}

/// What the host should mount inside the preview panel.
///
/// Both variants autoplay, loop and play inline without controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaElement {
    /// Native video; `muted` is updated in place
    Video {
        /// Resource URL
        src: String,
        /// Muted flag
        muted: bool,
    },
    /// Embedded player; a different `key` means the frame must be recreated
    Frame {
        /// Player URL
        src: String,
        /// Accessible title
        title: String,
        /// Identity of the frame instance
        key: String,
    },
}

impl MediaElement {
    /// Whether switching from `self` to `next` needs a new DOM element.
    #[must_use]
    pub fn needs_remount(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::Video { src: a, .. }, Self::Video { src: b, .. }) => a != b,
            (Self::Frame { src: a, key: ka, .. }, Self::Frame { src: b, key: kb, .. }) => {
                a != b || ka != kb
            }
            _ => true,
        }
    }
}

/// Errors when interpreting a media link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// Not a URL
    #[error("invalid media URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// URL host is not a supported video platform
    #[error("unsupported media host: {0}")]
    UnsupportedHost(String),
    /// Recognised host but no video identifier in the link
    #[error("no video id in media URL")]
    MissingVideoId,
    /// Identifier contains characters the platform never uses
    #[error("invalid video id: {0}")]
    InvalidVideoId(String),
}

/// Whether `url` points at a video file by extension (query and fragment
/// ignored).
#[must_use]
pub fn is_direct_resource(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default().to_ascii_lowercase();
    DIRECT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Extract the platform video id from a watch, short, embed or short-host
/// link.
pub fn video_id(media_url: &str) -> Result<String, MediaError> {
    watch_link(media_url).map(|(_, id)| id)
}

/// Player host and video id of a watch link. The link's own host serves the
/// player, except the short host which has no player of its own.
fn watch_link(media_url: &str) -> Result<(String, String), MediaError> {
    let url = Url::parse(media_url)?;
    let full_host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = full_host.strip_prefix("www.").unwrap_or(&full_host);
    let host = host.strip_prefix("m.").unwrap_or(host);
    let player_host = if host == "youtu.be" {
        DEFAULT_EMBED_HOST.to_string()
    } else {
        full_host.clone()
    };

    let mut segments = url.path_segments().into_iter().flatten().filter(|s| !s.is_empty());
    let id = match host {
        "youtube.com" | "youtube-nocookie.com" => match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            Some("shorts" | "embed" | "live") => segments.next().map(str::to_string),
            _ => None,
        },
        "youtu.be" => segments.next().map(str::to_string),
        other => return Err(MediaError::UnsupportedHost(other.to_string())),
    };

    let id = id.filter(|id| !id.is_empty()).ok_or(MediaError::MissingVideoId)?;
    if id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok((player_host, id))
    } else {
        Err(MediaError::InvalidVideoId(id))
    }
}

/// Build the embeddable player URL on `host`: autoplaying, looping via a
/// one-item playlist of the same video, chromeless, with the given mute
/// state.
pub fn embed_url(host: &str, video_id: &str, muted: bool) -> Result<String, MediaError> {
    let mut url = Url::parse(&format!("https://{host}/embed/"))?.join(video_id)?;
    url.query_pairs_mut()
        .append_pair("autoplay", "1")
        .append_pair("loop", "1")
        .append_pair("playlist", video_id)
        .append_pair("controls", "0")
        .append_pair("modestbranding", "1")
        .append_pair("rel", "0")
        .append_pair("fs", "0")
        .append_pair("iv_load_policy", "3")
        .append_pair("disablekb", "1")
        .append_pair("playsinline", "1")
        .append_pair("mute", if muted { "1" } else { "0" });
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_contents() {
        let source = MediaSource::resolve("https://www.youtube.com/watch?v=ABC123", None);
        let url = source.embed_url(true).unwrap();
        assert!(url.contains("embed/ABC123"));
        assert!(url.contains("autoplay=1"));
        assert!(url.contains("loop=1"));
        assert!(url.contains("playlist=ABC123"));
        assert!(url.contains("mute=1"));
        assert!(url.contains("controls=0"));
    }

    #[test]
    fn test_embed_url_unmuted() {
        let url = embed_url(DEFAULT_EMBED_HOST, "ABC123", false).unwrap();
        assert!(url.ends_with("mute=0"));
    }

    #[test]
    fn test_resolve_watch_link() {
        let source = MediaSource::resolve("https://www.youtube.com/watch?v=MMNICLfHE3M", None);
        assert_eq!(
            source,
            MediaSource::Embedded {
                watch_url: "https://www.youtube.com/watch?v=MMNICLfHE3M".to_string(),
                video_id: "MMNICLfHE3M".to_string(),
                host: "www.youtube.com".to_string(),
            }
        );
    }

    #[test]
    fn test_embed_url_keeps_source_host() {
        let nocookie =
            MediaSource::resolve("https://www.youtube-nocookie.com/embed/EjNYWCH-fJw", None);
        let url = nocookie.embed_url(true).unwrap();
        assert!(url.starts_with("https://www.youtube-nocookie.com/embed/EjNYWCH-fJw?"));

        let mobile = MediaSource::resolve("https://m.youtube.com/watch?v=44LdLqgOpjo", None);
        assert!(mobile
            .embed_url(false)
            .unwrap()
            .starts_with("https://m.youtube.com/embed/44LdLqgOpjo?"));

        // the short host has no player; it embeds from the main site
        let short = MediaSource::resolve("https://youtu.be/dO_RnY_IBww", None);
        assert!(short
            .embed_url(true)
            .unwrap()
            .starts_with("https://www.youtube.com/embed/dO_RnY_IBww?"));
    }

    #[test]
    fn test_video_id_variants() {
        assert_eq!(video_id("https://youtu.be/dO_RnY_IBww").unwrap(), "dO_RnY_IBww");
        assert_eq!(
            video_id("https://youtube.com/shorts/AYaTCPbYGdk").unwrap(),
            "AYaTCPbYGdk"
        );
        assert_eq!(
            video_id("https://m.youtube.com/watch?feature=share&v=44LdLqgOpjo").unwrap(),
            "44LdLqgOpjo"
        );
        assert_eq!(
            video_id("https://www.youtube.com/embed/EjNYWCH-fJw").unwrap(),
            "EjNYWCH-fJw"
        );
    }

    #[test]
    fn test_video_id_errors() {
        assert!(matches!(
            video_id("not a url"),
            Err(MediaError::InvalidUrl(_))
        ));
        assert_eq!(
            video_id("https://vimeo.com/123"),
            Err(MediaError::UnsupportedHost("vimeo.com".to_string()))
        );
        assert_eq!(
            video_id("https://www.youtube.com/watch?list=x"),
            Err(MediaError::MissingVideoId)
        );
        assert!(matches!(
            video_id("https://youtu.be/a%20b"),
            Err(MediaError::InvalidVideoId(_))
        ));
    }

    #[test]
    fn test_resolve_direct_field_wins() {
        let source = MediaSource::resolve(
            "https://www.youtube.com/watch?v=ABC123",
            Some("https://cdn.example.com/clip.mp4"),
        );
        assert_eq!(
            source,
            MediaSource::Direct {
                url: "https://cdn.example.com/clip.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_blank_direct_is_ignored() {
        let source = MediaSource::resolve("https://youtu.be/ABC123", Some("  "));
        assert!(matches!(source, MediaSource::Embedded { .. }));
    }

    #[test]
    fn test_resolve_direct_by_extension() {
        assert!(is_direct_resource("https://cdn.example.com/a.WEBM?t=3"));
        assert!(!is_direct_resource("https://cdn.example.com/mp4"));
        let source = MediaSource::resolve("https://cdn.example.com/a.mp4", None);
        assert!(matches!(source, MediaSource::Direct { .. }));
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let source = MediaSource::resolve("https://example.com/page", None);
        assert_eq!(source, MediaSource::None);
        assert!(!source.is_playable());
        assert!(source.element("x", true).is_none());
        assert!(source.embed_url(true).is_none());
    }

    #[test]
    fn test_element_frame_key_follows_mute() {
        let source = MediaSource::resolve("https://youtu.be/ABC123", None);
        let muted = source.element("King Kong", true).unwrap();
        let unmuted = source.element("King Kong", false).unwrap();
        assert!(muted.needs_remount(&unmuted));
        assert!(!muted.needs_remount(&muted.clone()));
    }

    #[test]
    fn test_element_video_mute_updates_in_place() {
        let source = MediaSource::Direct {
            url: "https://cdn.example.com/a.mp4".to_string(),
        };
        let muted = source.element("t", true).unwrap();
        let unmuted = source.element("t", false).unwrap();
        assert_eq!(
            unmuted,
            MediaElement::Video {
                src: "https://cdn.example.com/a.mp4".to_string(),
                muted: false
            }
        );
        assert!(!muted.needs_remount(&unmuted));
    }
}
