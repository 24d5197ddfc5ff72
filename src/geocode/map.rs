//! Static map preview URLs keyed by coordinates.
//!
//! The image itself is fetched by the browser; a bad token or an outage just
//! shows a broken image, so nothing here validates the response.

const STATIC_MAP_BASE: &str = "https://api.mapbox.com/styles/v1/mapbox/streets-v11/static";
const PIN_STYLE: &str = "pin-s+f74e4e";
const ZOOM: u8 = 13;
const SIZE: &str = "400x200";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPreview {
    token: Option<String>,
}

impl MapPreview {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self { token: token.filter(|t| !t.trim().is_empty()) }
    }

    /// Read the optional `MAP_PREVIEW_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("MAP_PREVIEW_TOKEN").ok())
    }

    /// Image URL with a pin at (`lat`, `lng`), centered on the same point.
    #[must_use]
    pub fn url(&self, lat: f64, lng: f64) -> String {
        let mut url = format!("{STATIC_MAP_BASE}/{PIN_STYLE}({lng},{lat})/{lng},{lat},{ZOOM},0/{SIZE}");
        if let Some(token) = &self.token {
            url.push_str("?access_token=");
            url.push_str(token);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_puts_longitude_first() {
        let url = MapPreview::default().url(28.6139, 77.209);
        assert!(url.contains("pin-s+f74e4e(77.209,28.6139)"));
        assert!(url.ends_with("/77.209,28.6139,13,0/400x200"));
    }

    #[test]
    fn url_appends_token_when_configured() {
        let url = MapPreview::new(Some("pk.test".into())).url(1.0, 2.0);
        assert!(url.ends_with("?access_token=pk.test"));
    }

    #[test]
    fn blank_token_is_ignored() {
        assert_eq!(MapPreview::new(Some("  ".into())), MapPreview::default());
    }
}
