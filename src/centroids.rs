use crate::projection::{to_lon_lat, to_mercator};
use crate::types::{CentroidRecord, Neighborhood};
use geo::Centroid;
use tracing::{info, warn};

/// Centroid of each neighborhood, computed in Web Mercator and reported in lon/lat.
pub fn extract_centroids(neighborhoods: &[Neighborhood]) -> Vec<CentroidRecord> {
    let records: Vec<CentroidRecord> = neighborhoods
        .iter()
        .filter_map(|hood| {
            let projected = to_mercator(&hood.geometry);
            let Some(centroid) = projected.centroid() else {
                warn!(name = ?hood.name, "Neighborhood has empty geometry, no centroid");
                return None;
            };
            let lon_lat = to_lon_lat(&centroid);
            Some(CentroidRecord {
                neighborhood: hood.name.clone(),
                longitude: lon_lat.x(),
                latitude: lon_lat.y(),
            })
        })
        .collect();

    info!(count = records.len(), "Extracted neighborhood centroids");
    records
}
