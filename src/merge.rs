use crate::types::{BiRecord, CentroidRecord, NodeRecord};
use std::collections::HashMap;
use tracing::info;

/// Right join of node rows onto neighborhood centroids by name.
///
/// Every centroid survives, with empty node columns when nothing matched.
/// Node rows without a matching neighborhood are dropped. Null names on either
/// side never match.
pub fn merge_datasets(nodes: &[NodeRecord], centroids: &[CentroidRecord]) -> Vec<BiRecord> {
    let mut by_neighborhood: HashMap<&str, Vec<&NodeRecord>> = HashMap::new();
    for node in nodes {
        if let Some(hood) = node.neighborhood.as_deref() {
            by_neighborhood.entry(hood).or_default().push(node);
        }
    }

    let mut merged = Vec::with_capacity(nodes.len() + centroids.len());
    for centroid in centroids {
        match centroid.neighborhood.as_deref().and_then(|hood| by_neighborhood.get(hood)) {
            Some(matches) => {
                for node in matches {
                    merged.push(BiRecord {
                        neighborhood: centroid.neighborhood.clone(),
                        name: node.name.clone(),
                        subcategory: Some(node.subcategory.clone()),
                        latitude_node: Some(node.latitude),
                        longitude_node: Some(node.longitude),
                        is_business: Some(node.is_business),
                        is_food: Some(node.is_food),
                        longitude_neighborhood: centroid.longitude,
                        latitude_neighborhood: centroid.latitude,
                    });
                }
            }
            None => merged.push(BiRecord {
                neighborhood: centroid.neighborhood.clone(),
                name: None,
                subcategory: None,
                latitude_node: None,
                longitude_node: None,
                is_business: None,
                is_food: None,
                longitude_neighborhood: centroid.longitude,
                latitude_neighborhood: centroid.latitude,
            }),
        }
    }

    info!(nodes = nodes.len(), neighborhoods = centroids.len(), rows = merged.len(), "Merged datasets");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(hood: Option<&str>, name: &str) -> NodeRecord {
        NodeRecord {
            neighborhood: hood.map(String::from),
            name: Some(name.to_string()),
            subcategory: "cafe".to_string(),
            latitude: 32.8,
            longitude: 35.0,
            is_business: true,
            is_food: true,
        }
    }

    fn centroid(hood: &str) -> CentroidRecord {
        CentroidRecord { neighborhood: Some(hood.to_string()), longitude: 35.01, latitude: 32.81 }
    }

    #[test]
    fn unmatched_neighborhood_is_kept_empty() {
        let merged = merge_datasets(&[node(Some("Hadar"), "Cafe")], &[centroid("Hadar"), centroid("Carmel")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name.as_deref(), Some("Cafe"));
        assert_eq!(merged[0].latitude_node, Some(32.8));
        assert_eq!(merged[0].longitude_neighborhood, 35.01);

        assert_eq!(merged[1].neighborhood.as_deref(), Some("Carmel"));
        assert_eq!(merged[1].name, None);
        assert_eq!(merged[1].is_business, None);
        assert_eq!(merged[1].latitude_neighborhood, 32.81);
    }

    #[test]
    fn orphan_nodes_are_dropped() {
        let nodes = [node(None, "Lost"), node(Some("Atlantis"), "Sunk"), node(Some("Hadar"), "Bar")];
        let merged = merge_datasets(&nodes, &[centroid("Hadar")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name.as_deref(), Some("Bar"));
    }

    #[test]
    fn null_names_do_not_match_each_other() {
        let unnamed = CentroidRecord { neighborhood: None, longitude: 35.0, latitude: 32.8 };
        let merged = merge_datasets(&[node(None, "Lost")], &[unnamed]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].neighborhood, None);
        assert_eq!(merged[0].name, None);
    }

    #[test]
    fn order_follows_centroids_then_nodes() {
        let nodes = [node(Some("B"), "b1"), node(Some("A"), "a1"), node(Some("B"), "b2")];
        let merged = merge_datasets(&nodes, &[centroid("B"), centroid("A")]);
        let names: Vec<_> = merged.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["b1", "b2", "a1"]);
    }
}
