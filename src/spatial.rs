use crate::taxonomy::classify;
use crate::types::{Business, ClassifiedBusiness, JoinedBusiness, Neighborhood};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::contains::Contains;
use geo::Point;
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

// Bounding box of one neighborhood, pointing back into the slice
struct AreaIndex {
    index: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for AreaIndex {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

pub struct NeighborhoodIndex<'a> {
    neighborhoods: &'a [Neighborhood],
    tree: RTree<AreaIndex>,
}

impl<'a> NeighborhoodIndex<'a> {
    pub fn new(neighborhoods: &'a [Neighborhood]) -> Self {
        debug!(count = neighborhoods.len(), "Building spatial index");
        let items: Vec<AreaIndex> = neighborhoods.iter().enumerate()
            .filter_map(|(index, hood)| {
                let rect = hood.geometry.bounding_rect()?;
                Some(AreaIndex {
                    index,
                    aabb: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                })
            })
            .collect();

        Self { neighborhoods, tree: RTree::bulk_load(items) }
    }

    /// Every neighborhood strictly containing `point`, in input order.
    pub fn containing(&self, point: &Point<f64>) -> Vec<&'a Neighborhood> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        let mut hits: Vec<usize> = self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|candidate| self.neighborhoods[candidate.index].geometry.contains(point))
            .map(|candidate| candidate.index)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.neighborhoods[i]).collect()
    }
}

/// Drops untagged records and classifies the rest.
pub fn classify_businesses(businesses: Vec<Business>) -> Vec<ClassifiedBusiness> {
    let total = businesses.len();
    let classified: Vec<ClassifiedBusiness> = businesses
        .into_iter()
        .filter_map(|b| {
            let c = classify(&b.tags)?;
            Some(ClassifiedBusiness {
                name: b.name,
                point: b.point,
                category: c.category,
                subcategory: c.subcategory,
            })
        })
        .collect();

    info!(total, tagged = classified.len(), "Classified business features");
    classified
}

/// Left join of businesses onto the neighborhoods that contain them.
///
/// A point outside every polygon is kept with no neighborhood, as is one inside
/// an unnamed polygon. A point inside several overlapping polygons yields one
/// row per polygon.
pub fn join_neighborhoods(
    businesses: Vec<ClassifiedBusiness>,
    neighborhoods: &[Neighborhood],
) -> Vec<JoinedBusiness> {
    let index = NeighborhoodIndex::new(neighborhoods);

    let joined: Vec<JoinedBusiness> = businesses
        .into_par_iter()
        .flat_map_iter(|business| {
            let hits = index.containing(&business.point);
            let rows: Vec<JoinedBusiness> = if hits.is_empty() {
                vec![JoinedBusiness { business, neighborhood: None }]
            } else {
                hits.into_iter()
                    .map(|hood| JoinedBusiness {
                        business: business.clone(),
                        neighborhood: hood.name.clone(),
                    })
                    .collect()
            };
            rows
        })
        .collect();

    let unmatched = joined.iter().filter(|j| j.neighborhood.is_none()).count();
    info!(rows = joined.len(), unmatched, "Joined businesses to neighborhoods");
    joined
}
