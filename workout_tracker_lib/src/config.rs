pub const STORAGE_KEY: &str = "workouts";
pub const MAP_ZOOM: f64 = 13.0;
pub const PAN_DURATION_SECS: f64 = 1.0;
pub const FORM_REDISPLAY_DELAY_MS: u32 = 1000;
pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Knobs shared by the controller and the browser frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Key the workout blob is stored under.
    pub storage_key: String,
    pub map_zoom: f64,
    pub pan_duration_secs: f64,
    /// How long the form stays hidden after a submission before it can be shown again.
    pub form_redisplay_delay_ms: u32,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            map_zoom: MAP_ZOOM,
            pan_duration_secs: PAN_DURATION_SECS,
            form_redisplay_delay_ms: FORM_REDISPLAY_DELAY_MS,
            tile_url: TILE_URL.to_owned(),
            tile_attribution: TILE_ATTRIBUTION.to_owned(),
        }
    }
}

impl TrackerConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
