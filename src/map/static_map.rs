//! Static map image renderer.

use url::Url;

use crate::config::MapConfig;
use crate::map::{MapRenderError, MapRenderer, MapRoute, MapView};

const START_MARKER: &str = "color:green|label:A";
const END_MARKER: &str = "color:red|label:B";

/// Renders the winning route as a Google Static Maps image URL: one path
/// through origin, waypoint and destination, plus start and end markers.
#[derive(Debug, Clone)]
pub struct StaticMapRenderer {
    base_url: Url,
    api_key: String,
    width: u32,
    height: u32,
    stroke_weight: u32,
}

impl StaticMapRenderer {
    pub fn new(config: &MapConfig, api_key: &str) -> Result<Self, MapRenderError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MapRenderError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            width: config.width,
            height: config.height,
            stroke_weight: config.stroke_weight,
        })
    }
}

impl MapRenderer for StaticMapRenderer {
    fn render(&self, route: &MapRoute) -> Result<MapView, MapRenderError> {
        let color = hex_color(&route.color)?;
        for location in [&route.origin, &route.waypoint, &route.destination] {
            if location.trim().is_empty() || location.contains('|') {
                return Err(MapRenderError::InvalidLocation(location.clone()));
            }
        }

        let path = format!(
            "color:0x{}|weight:{}|{}|{}|{}",
            color, self.stroke_weight, route.origin, route.waypoint, route.destination
        );

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("size", &format!("{}x{}", self.width, self.height))
                .append_pair("path", &path)
                .append_pair("markers", &format!("{}|{}", START_MARKER, route.origin))
                .append_pair("markers", &format!("{}|{}", END_MARKER, route.destination));
            if !self.api_key.is_empty() {
                pairs.append_pair("key", &self.api_key);
            }
        }

        Ok(MapView {
            image_url: url.to_string(),
            color: route.color.clone(),
        })
    }
}

/// `#RRGGBB` → `RRGGBB`.
fn hex_color(token: &str) -> Result<&str, MapRenderError> {
    match token.strip_prefix('#') {
        Some(hex) if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) => Ok(hex),
        _ => Err(MapRenderError::InvalidColor(token.to_string())),
    }
}
