//! Spherical Web Mercator (EPSG:3857) <-> WGS84 (EPSG:4326).

use geo::{Coord, MapCoords};
use std::f64::consts::PI;

// Semi-major axis of WGS84, the sphere radius EPSG:3857 uses.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub fn lon_lat_to_mercator(c: Coord<f64>) -> Coord<f64> {
    let lon_rad = c.x.to_radians();
    let lat_rad = c.y.to_radians();
    Coord {
        x: EARTH_RADIUS_M * lon_rad,
        y: EARTH_RADIUS_M * (PI / 4.0 + lat_rad / 2.0).tan().ln(),
    }
}

pub fn mercator_to_lon_lat(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS_M).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees(),
    }
}

pub fn to_mercator<G>(geometry: &G) -> G::Output
where
    G: MapCoords<f64, f64>,
{
    geometry.map_coords(lon_lat_to_mercator)
}

pub fn to_lon_lat<G>(geometry: &G) -> G::Output
where
    G: MapCoords<f64, f64>,
{
    geometry.map_coords(mercator_to_lon_lat)
}
