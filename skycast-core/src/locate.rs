//! Best-effort geolocation for the unprompted startup path.
//!
//! The dashboard tries to discover where it is running from the machine's
//! public IP. This runs unsolicited, so every failure mode (no network,
//! slow lookup, provider missing fields) stays silent and the caller simply
//! skips the automatic refresh.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const GEOIP_URL: &str = "https://ipapi.co/json/";

/// Bounded wait on the lookup; the weather fetches themselves carry no
/// timeout.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(7);

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Coordinates of the machine running the dashboard, or `None` when the
/// lookup fails for any reason.
pub async fn detect_coords() -> Option<(f64, f64)> {
    let client = Client::builder().timeout(LOCATE_TIMEOUT).build().ok()?;
    let response: IpApiResponse = client.get(GEOIP_URL).send().await.ok()?.json().await.ok()?;

    let lat = response.latitude?;
    let lon = response.longitude?;
    debug!(lat, lon, "geoip lookup succeeded");
    Some((lat, lon))
}
