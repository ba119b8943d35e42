use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::weights::TRAVEL_MINUTES_PER_KM;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    pub distance_km: f64,
}

impl DistanceEstimate {
    /// Three minutes of travel per kilometre, rounded to whole minutes.
    pub fn travel_minutes(&self) -> u32 {
        (self.distance_km * TRAVEL_MINUTES_PER_KM).round().max(0.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    #[error("no route known between '{origin}' and '{destination}'")]
    UnknownRoute { origin: String, destination: String },
    #[error("distance provider unavailable: {0}")]
    Unavailable(String),
}

/// Geocoding/routing collaborator. Implementations must be deterministic for a given pair.
pub trait DistanceProvider: Send + Sync {
    fn estimate(&self, origin: &str, destination: &str) -> Result<DistanceEstimate, DistanceError>;
}

/// Every pair of addresses is the same distance apart.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

impl DistanceProvider for FixedDistance {
    fn estimate(&self, _origin: &str, _destination: &str) -> Result<DistanceEstimate, DistanceError> {
        Ok(DistanceEstimate {
            distance_km: self.0,
        })
    }
}

/// Route as supplied by callers loading a precomputed distance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDistance {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

/// Symmetric lookup table of precomputed distances keyed by normalised address.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    routes: HashMap<(String, String), f64>,
    fallback_km: Option<f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(routes: impl IntoIterator<Item = RouteDistance>) -> Self {
        let mut table = Self::new();
        for route in routes {
            table.insert(&route.from, &route.to, route.distance_km);
        }
        table
    }

    pub fn with_fallback(mut self, distance_km: f64) -> Self {
        self.fallback_km = Some(distance_km);
        self
    }

    pub fn insert(&mut self, origin: &str, destination: &str, distance_km: f64) {
        self.routes.insert(route_key(origin, destination), distance_km);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl DistanceProvider for DistanceTable {
    fn estimate(&self, origin: &str, destination: &str) -> Result<DistanceEstimate, DistanceError> {
        if normalize(origin) == normalize(destination) {
            return Ok(DistanceEstimate { distance_km: 0.0 });
        }

        self.routes
            .get(&route_key(origin, destination))
            .copied()
            .or(self.fallback_km)
            .map(|distance_km| DistanceEstimate { distance_km })
            .ok_or_else(|| DistanceError::UnknownRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

fn route_key(origin: &str, destination: &str) -> (String, String) {
    let a = normalize(origin);
    let b = normalize(destination);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
