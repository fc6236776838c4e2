use crate::taxonomy::TAG_PRECEDENCE;
use crate::types::{Business, Neighborhood, Tags};
use anyhow::{Context, Result, anyhow};
use geo::{Centroid, MultiPolygon};
use geojson::{FeatureCollection, GeoJson};
use serde_json::{Map, Value as JsonValue};
use shapefile::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads neighborhood polygons, dispatching on the file extension.
pub fn load_neighborhoods(path: &Path, name_column: &str) -> Result<Vec<Neighborhood>> {
    let extension = path.extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("Input geometry file has no extension: {:?}", path))?;

    let neighborhoods = match extension.as_str() {
        "shp" => load_shapefile_neighborhoods(path, name_column)?,
        "json" | "geojson" => load_geojson_neighborhoods(path, name_column)?,
        _ => return Err(anyhow!("Unsupported geometry format: {}", extension)),
    };

    info!(count = neighborhoods.len(), "Loaded neighborhoods");
    Ok(neighborhoods)
}

fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    debug!(?path, "Reading GeoJSON");
    let file = File::open(path)
        .with_context(|| format!("Failed to open GeoJSON file: {:?}", path))?;
    let reader = BufReader::new(file);

    let geojson = GeoJson::from_reader(reader)
        .with_context(|| format!("Failed to parse GeoJSON: {:?}", path))?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(anyhow!("GeoJSON must be a FeatureCollection: {:?}", path)),
    }
}

fn property_string(props: Option<&Map<String, JsonValue>>, key: &str) -> Option<String> {
    match props?.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn load_geojson_neighborhoods(path: &Path, name_column: &str) -> Result<Vec<Neighborhood>> {
    let collection = read_feature_collection(path)?;
    let mut neighborhoods = Vec::new();

    for feature in collection.features {
        let name = property_string(feature.properties.as_ref(), name_column);
        if name.is_none() {
            warn!(column = name_column, "Neighborhood without a name");
        }

        let geometry = match feature.geometry {
            Some(geom) => {
                let geo_geom: geo::Geometry<f64> = geom.value.try_into()
                    .map_err(|e| anyhow!("Failed to convert geometry of {:?}: {:?}", name, e))?;

                match geo_geom {
                    geo::Geometry::MultiPolygon(mp) => mp,
                    geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
                    _ => {
                        warn!(?name, "Skipping neighborhood with non-polygon geometry");
                        continue;
                    }
                }
            }
            None => {
                warn!(?name, "Skipping neighborhood without geometry");
                continue;
            }
        };

        neighborhoods.push(Neighborhood { name, geometry });
    }

    Ok(neighborhoods)
}

fn load_shapefile_neighborhoods(path: &Path, name_column: &str) -> Result<Vec<Neighborhood>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open Shapefile: {:?}", path))?;

    let mut neighborhoods = Vec::new();

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let name_value = record.get(name_column)
            .ok_or_else(|| anyhow!("Name column '{}' not found in Shapefile", name_column))?;

        let name = match name_value {
            shapefile::dbase::FieldValue::Character(Some(s)) => Some(s.trim().to_string()),
            shapefile::dbase::FieldValue::Character(None) => {
                warn!(column = name_column, "Neighborhood without a name");
                None
            }
            _ => return Err(anyhow!("Shapefile name column must be a string")),
        };

        let geometry: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(polygon) => polygon.try_into()
                .map_err(|e| anyhow!("Failed to convert polygon: {:?}", e))?,
            shapefile::Shape::PolygonM(polygon) => polygon.try_into()
                .map_err(|e| anyhow!("Failed to convert polygonM: {:?}", e))?,
            shapefile::Shape::PolygonZ(polygon) => polygon.try_into()
                .map_err(|e| anyhow!("Failed to convert polygonZ: {:?}", e))?,
            _ => {
                warn!(?name, "Skipping neighborhood with non-polygon shape");
                continue;
            }
        };

        neighborhoods.push(Neighborhood { name, geometry });
    }

    Ok(neighborhoods)
}

/// Loads every business feature. Untagged features are kept here and dropped
/// at classification.
pub fn load_businesses(path: &Path) -> Result<Vec<Business>> {
    let collection = read_feature_collection(path)?;
    let mut businesses = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let props = feature.properties.as_ref();
        let tags: Tags = TAG_PRECEDENCE.map(|column| property_string(props, column));
        let name = property_string(props, "name");

        let Some(geom) = feature.geometry else {
            debug!(?name, "Skipping business without geometry");
            continue;
        };

        let geo_geom: geo::Geometry<f64> = geom.value.try_into()
            .map_err(|e| anyhow!("Failed to convert business geometry: {:?}", e))?;

        // Venues mapped as areas are reduced to their centroid.
        let point = match geo_geom {
            geo::Geometry::Point(p) => p,
            other => match other.centroid() {
                Some(p) => p,
                None => {
                    debug!(?name, "Skipping business with empty geometry");
                    continue;
                }
            },
        };

        businesses.push(Business { name, point, tags });
    }

    info!(count = businesses.len(), path = ?path, "Loaded business features");
    Ok(businesses)
}
