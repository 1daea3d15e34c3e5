//! OSRM HTTP adapter for point-to-point directions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::point::Point;
use crate::polyline::Polyline;
use crate::traits::{ChunkResult, DirectionsProvider, DirectionsRequest, Leg, TravelMode};

/// Connection settings for an `osrm-routed` instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    /// Upper bound on a whole request, body included.
    pub request_timeout_secs: u64,
    /// Overrides the travel mode of every request. `osrm-routed` serves the
    /// one profile its dataset was built with, so a server set up for
    /// walking wants every request sent as walking.
    pub travel_mode: Option<TravelMode>,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout_secs: 3,
            request_timeout_secs: 10,
            travel_mode: None,
        }
    }
}

impl OsrmConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// [`DirectionsProvider`] backed by the OSRM `route` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    base_url: String,
    travel_mode: Option<TravelMode>,
    http: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            travel_mode: config.travel_mode,
            http,
        })
    }

    fn route_url(&self, request: &DirectionsRequest) -> String {
        let mode = self.travel_mode.unwrap_or(request.travel_mode);
        let coords = request
            .points()
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lng, point.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson&steps=false",
            self.base_url,
            profile(mode),
            coords
        )
    }
}

fn profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "car",
        TravelMode::Walking => "foot",
        TravelMode::Cycling => "bike",
    }
}

impl DirectionsProvider for OsrmClient {
    fn directions(&self, request: &DirectionsRequest) -> Result<ChunkResult, ProviderError> {
        let response = self.http.get(self.route_url(request)).send()?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ProviderError::unavailable(format!("OSRM answered {status}")));
        }

        // Routing failures come back as 400 with a JSON body, so the body is
        // read before the status is judged.
        let body = match response.json::<OsrmRouteResponse>() {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => {
                return Err(ProviderError::Status {
                    code: status.as_u16().to_string(),
                    message: status.to_string(),
                });
            }
        };

        body.into_chunk_result()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lng, lat]`.
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}

impl OsrmRouteResponse {
    fn into_chunk_result(self) -> Result<ChunkResult, ProviderError> {
        match self.code.as_str() {
            "Ok" => {}
            "NoRoute" => return Err(ProviderError::NoRoute),
            _ => {
                return Err(ProviderError::Status {
                    code: self.code,
                    message: self.message.unwrap_or_default(),
                });
            }
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(ProviderError::NoRoute)?;

        let points = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Point::new(lat, lng))
            .collect();
        let legs = route
            .legs
            .into_iter()
            .map(|leg| Leg {
                distance_meters: leg.distance,
                duration_seconds: leg.duration,
            })
            .collect();

        Ok(ChunkResult {
            path: Polyline::new(points),
            legs,
        })
    }
}
