use geo::{MultiPolygon, Point};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw OSM tag values in precedence order: amenity, shop, office, leisure, tourism.
pub type Tags = [Option<String>; 5];

#[derive(Debug, Clone)]
pub struct Business {
    pub name: Option<String>,
    pub point: Point<f64>,
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct Neighborhood {
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBusiness {
    pub name: Option<String>,
    pub point: Point<f64>,
    pub category: &'static str, // tag column
    pub subcategory: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinedBusiness {
    pub business: ClassifiedBusiness,
    pub neighborhood: Option<String>, // None when outside every polygon
}

/// One row of `neighborhood_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodSummary {
    #[serde(rename = "SchName")]
    pub neighborhood: String,
    #[serde(rename = "share_%")]
    pub share_pct: Option<f64>,
    pub diversity: usize,
    pub total_businesses: Option<usize>,
    pub total_food_businesses: Option<usize>,
}

/// One row of `neighborhood_geopoints`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidRecord {
    #[serde(rename = "SchName")]
    pub neighborhood: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

/// One row of `node_dataset.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "SchName")]
    pub neighborhood: Option<String>,
    pub name: Option<String>,
    pub subcategory: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "pandas_bool")]
    pub is_business: bool,
    #[serde(with = "pandas_bool")]
    pub is_food: bool,
}

/// One row of the merged BI dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiRecord {
    #[serde(rename = "SchName")]
    pub neighborhood: Option<String>,
    pub name: Option<String>,
    pub subcategory: Option<String>,
    pub latitude_node: Option<f64>,
    pub longitude_node: Option<f64>,
    #[serde(serialize_with = "pandas_bool::serialize_option")]
    pub is_business: Option<bool>,
    #[serde(serialize_with = "pandas_bool::serialize_option")]
    pub is_food: Option<bool>,
    pub longitude_neighborhood: f64,
    pub latitude_neighborhood: f64,
}

/// Booleans as `True`/`False`, the way the BI exports have always spelled them.
mod pandas_bool {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn serialize_option<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "True" | "true" => Ok(true),
            "False" | "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean: {other:?}"))),
        }
    }
}
