use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use url::Url;

use crate::utils::{PlayerError, PlayerResult};

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtu.be",
    "www.youtube-nocookie.com",
    "youtube-nocookie.com",
];

/// Where a content URL is actually fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Hosted next to the front-end, played as-is
    Relative(String),
    /// `blob:` or `data:` source that never leaves the client
    Inline(String),
    /// Embedded provider, never proxied
    YouTube(String),
    /// Third-party file routed through the API's proxy endpoint
    Proxied { original: String, url: String },
}

impl MediaSource {
    pub fn playback_url(&self) -> &str {
        match self {
            MediaSource::Relative(url) | MediaSource::Inline(url) | MediaSource::YouTube(url) => {
                url
            }
            MediaSource::Proxied { url, .. } => url,
        }
    }
}

/// Rewrites a content URL so the media element can load it without
/// cross-origin failures.
pub fn resolve_source(raw: &str, api_base_url: &str) -> PlayerResult<MediaSource> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PlayerError::InvalidSource("empty url".to_string()));
    }

    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Ok(MediaSource::Relative(raw.to_string()));
        }
        Err(e) => return Err(PlayerError::InvalidSource(format!("{}: {}", raw, e))),
    };

    if matches!(parsed.scheme(), "blob" | "data") {
        return Ok(MediaSource::Inline(raw.to_string()));
    }

    if parsed
        .host_str()
        .is_some_and(|host| YOUTUBE_HOSTS.contains(&host))
    {
        return Ok(MediaSource::YouTube(raw.to_string()));
    }

    let encoded = utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string();
    let url = format!(
        "{}/api/proxy?url={}",
        api_base_url.trim_end_matches('/'),
        encoded
    );
    debug!("Routing {} through proxy", raw);

    Ok(MediaSource::Proxied {
        original: raw.to_string(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.com/";

    #[test]
    fn test_relative_urls_pass_through() {
        let source = resolve_source("/videos/intro.mp4", BASE).unwrap();
        assert_eq!(source, MediaSource::Relative("/videos/intro.mp4".to_string()));
    }

    #[test]
    fn test_youtube_is_never_proxied() {
        for url in [
            "https://www.youtube.com/watch?v=abc",
            "https://youtu.be/abc",
        ] {
            let source = resolve_source(url, BASE).unwrap();
            assert!(matches!(source, MediaSource::YouTube(_)), "{}", url);
            assert_eq!(source.playback_url(), url);
        }
    }

    #[test]
    fn test_remote_files_are_proxied_and_encoded() {
        let source = resolve_source("https://cdn.example.org/a b.mp4?x=1&y=2", BASE).unwrap();
        assert_eq!(
            source.playback_url(),
            "https://api.example.com/api/proxy?url=https%3A%2F%2Fcdn%2Eexample%2Eorg%2Fa%20b%2Emp4%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_rejects_empty_url() {
        assert!(matches!(
            resolve_source("  ", BASE),
            Err(PlayerError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_other_schemes_are_proxied() {
        let source = resolve_source("ftp://files.example.org/movie.mp4", BASE).unwrap();
        assert!(matches!(source, MediaSource::Proxied { .. }));
        assert!(
            source
                .playback_url()
                .starts_with("https://api.example.com/api/proxy?url=ftp%3A%2F%2F")
        );
    }

    #[test]
    fn test_inline_sources_stay_local() {
        for url in ["blob:https://app.example.com/0b5e-41", "data:video/mp4;base64,AAAA"] {
            let source = resolve_source(url, BASE).unwrap();
            assert_eq!(source, MediaSource::Inline(url.to_string()));
            assert_eq!(source.playback_url(), url);
        }
    }
}
