//! Per-neighborhood counts, diversity and food share.

use crate::taxonomy::{is_business, is_food_business, SubcategoryClass, BUSINESS_SUBCATEGORIES};
use crate::types::{JoinedBusiness, NeighborhoodSummary};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryCount {
    pub neighborhood: String,
    pub subcategory: String,
    pub count: usize,
}

/// Row of the inner join between food and total counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRow {
    pub neighborhood: String,
    pub total: usize,
    pub food: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareDiversity {
    pub neighborhood: String,
    pub share_pct: Option<f64>,
    pub diversity: usize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NeighborhoodStats {
    pub total: BTreeMap<String, usize>,
    pub food: BTreeMap<String, usize>,
    /// Sorted by neighborhood, then ascending count.
    pub food_by_subcategory: Vec<SubcategoryCount>,
    pub diversity: BTreeMap<String, usize>,
}

/// Joined rows that are businesses and fall inside some neighborhood.
fn located_businesses(joined: &[JoinedBusiness]) -> impl Iterator<Item = (&str, &str)> + '_ {
    joined.iter().filter_map(|row| {
        let hood = row.neighborhood.as_deref()?;
        let sub = row.business.subcategory.as_str();
        is_business(sub).then_some((hood, sub))
    })
}

/// `total / food * 100`, rounded to one decimal with ties to even.
pub fn share_pct(total: usize, food: usize) -> f64 {
    let raw = total as f64 / food as f64 * 100.0;
    (raw * 10.0).round_ties_even() / 10.0
}

impl NeighborhoodStats {
    pub fn from_joined(joined: &[JoinedBusiness]) -> Self {
        let mut stats = NeighborhoodStats::default();
        let mut food_pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
        let mut distinct: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();

        for (hood, sub) in located_businesses(joined) {
            *stats.total.entry(hood.to_string()).or_default() += 1;
            distinct.entry(hood.to_string()).or_default().insert(sub);

            if is_food_business(sub) {
                *stats.food.entry(hood.to_string()).or_default() += 1;
                *food_pairs.entry((hood.to_string(), sub.to_string())).or_default() += 1;
            }
        }

        stats.food_by_subcategory = food_pairs
            .into_iter()
            .map(|((neighborhood, subcategory), count)| SubcategoryCount { neighborhood, subcategory, count })
            .collect();
        stats.food_by_subcategory
            .sort_by(|a, b| a.neighborhood.cmp(&b.neighborhood).then(a.count.cmp(&b.count)));

        stats.diversity = distinct.into_iter().map(|(hood, subs)| (hood, subs.len())).collect();
        stats
    }

    /// Inner join of food and total counts. Neighborhoods without food
    /// businesses do not appear.
    pub fn total_and_food(&self) -> Vec<ShareRow> {
        self.food
            .iter()
            .filter_map(|(hood, &food)| {
                let &total = self.total.get(hood)?;
                Some(ShareRow {
                    neighborhood: hood.clone(),
                    total,
                    food,
                    share_pct: share_pct(total, food),
                })
            })
            .collect()
    }

    /// Diversity left-joined with the share table.
    pub fn share_diversity(&self) -> Vec<ShareDiversity> {
        let shares: BTreeMap<String, f64> = self.total_and_food()
            .into_iter()
            .map(|row| (row.neighborhood, row.share_pct))
            .collect();

        self.diversity
            .iter()
            .map(|(hood, &diversity)| ShareDiversity {
                neighborhood: hood.clone(),
                share_pct: shares.get(hood).copied(),
                diversity,
            })
            .collect()
    }

    /// The `neighborhood_data` table: share/diversity with raw counts left-joined on.
    pub fn summary(&self) -> Vec<NeighborhoodSummary> {
        self.share_diversity()
            .into_iter()
            .map(|row| NeighborhoodSummary {
                total_businesses: self.total.get(&row.neighborhood).copied(),
                total_food_businesses: self.food.get(&row.neighborhood).copied(),
                neighborhood: row.neighborhood,
                share_pct: row.share_pct,
                diversity: row.diversity,
            })
            .collect()
    }
}

/// `(share_%, diversity)` columns with missing shares filled with 0.
pub fn correlation_columns(rows: &[ShareDiversity]) -> (Vec<f64>, Vec<f64>) {
    rows.iter()
        .map(|r| (r.share_pct.unwrap_or(0.0), r.diversity as f64))
        .unzip()
}

/// City-wide figures reported alongside the tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub food_total: usize,
    /// Distinct neighborhood values, a null neighborhood counting as one.
    pub neighborhoods: usize,
    pub unique_business_subcategories: usize,
    pub unseen_business_subcategories: Vec<&'static str>,
    pub unlisted_subcategories: Vec<String>,
}

impl Overview {
    pub fn new(joined: &[JoinedBusiness], stats: &NeighborhoodStats) -> Self {
        let neighborhoods: BTreeSet<Option<&str>> = joined.iter()
            .map(|row| row.neighborhood.as_deref())
            .collect();

        let seen_business: BTreeSet<&str> = joined.iter()
            .map(|row| row.business.subcategory.as_str())
            .filter(|sub| is_business(sub))
            .collect();

        let unlisted: BTreeSet<&str> = joined.iter()
            .map(|row| row.business.subcategory.as_str())
            .filter(|sub| SubcategoryClass::of(sub) == SubcategoryClass::Unlisted)
            .collect();

        Overview {
            food_total: stats.food_by_subcategory.iter().map(|c| c.count).sum(),
            neighborhoods: neighborhoods.len(),
            unique_business_subcategories: seen_business.len(),
            unseen_business_subcategories: BUSINESS_SUBCATEGORIES
                .iter()
                .copied()
                .filter(|sub| !seen_business.contains(sub))
                .collect(),
            unlisted_subcategories: unlisted.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassifiedBusiness;
    use geo::Point;

    fn row(sub: &str, hood: Option<&str>) -> JoinedBusiness {
        JoinedBusiness {
            business: ClassifiedBusiness {
                name: None,
                point: Point::new(0.0, 0.0),
                category: "amenity",
                subcategory: sub.to_string(),
            },
            neighborhood: hood.map(String::from),
        }
    }

    #[test]
    fn restaurant_restaurant_bakery() {
        let joined = vec![
            row("restaurant", Some("Hadar")),
            row("restaurant", Some("Hadar")),
            row("bakery", Some("Hadar")),
        ];
        let stats = NeighborhoodStats::from_joined(&joined);

        assert_eq!(stats.total["Hadar"], 3);
        assert_eq!(stats.food["Hadar"], 3);
        assert_eq!(stats.diversity["Hadar"], 2);
    }

    #[test]
    fn share_is_total_over_food() {
        assert_eq!(share_pct(10, 5), 200.0);
        assert_eq!(share_pct(3, 3), 100.0);
        assert_eq!(share_pct(7, 3), 233.3);
        // 106.25 and 118.75 are exact halves
        assert_eq!(share_pct(17, 16), 106.2);
        assert_eq!(share_pct(19, 16), 118.8);
    }

    #[test]
    fn unlocated_rows_never_aggregate() {
        let joined = vec![row("cafe", None), row("cafe", Some("Carmel"))];
        let stats = NeighborhoodStats::from_joined(&joined);

        assert_eq!(stats.total.len(), 1);
        assert_eq!(stats.total["Carmel"], 1);
        assert_eq!(stats.summary().len(), 1);
    }

    #[test]
    fn non_business_neighborhood_is_absent() {
        let joined = vec![
            row("parking", Some("Port")),
            row("bench", Some("Port")),
            row("clothes", Some("Carmel")),
        ];
        let stats = NeighborhoodStats::from_joined(&joined);

        assert!(!stats.diversity.contains_key("Port"));
        assert!(!stats.total.contains_key("Port"));
        let names: Vec<_> = stats.summary().into_iter().map(|s| s.neighborhood).collect();
        assert_eq!(names, vec!["Carmel".to_string()]);
    }

    #[test]
    fn non_business_food_tags_are_not_food_businesses() {
        let joined = vec![row("vending_machine", Some("Hadar")), row("food_court", Some("Hadar"))];
        let stats = NeighborhoodStats::from_joined(&joined);
        assert!(stats.food.is_empty());
        assert!(stats.total.is_empty());
    }

    #[test]
    fn summary_left_joins_missing_food() {
        let joined = vec![
            row("clothes", Some("Carmel")),
            row("shoes", Some("Carmel")),
            row("cafe", Some("Hadar")),
            row("books", Some("Hadar")),
        ];
        let stats = NeighborhoodStats::from_joined(&joined);
        let summary = stats.summary();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].neighborhood, "Carmel");
        assert_eq!(summary[0].share_pct, None);
        assert_eq!(summary[0].diversity, 2);
        assert_eq!(summary[0].total_businesses, Some(2));
        assert_eq!(summary[0].total_food_businesses, None);

        assert_eq!(summary[1].neighborhood, "Hadar");
        assert_eq!(summary[1].share_pct, Some(200.0));
        assert_eq!(summary[1].total_food_businesses, Some(1));

        let (share, diversity) = correlation_columns(&stats.share_diversity());
        assert_eq!(share, vec![0.0, 200.0]);
        assert_eq!(diversity, vec![2.0, 2.0]);
    }

    #[test]
    fn food_by_subcategory_sorted_by_neighborhood_then_count() {
        let joined = vec![
            row("restaurant", Some("B")),
            row("restaurant", Some("B")),
            row("cafe", Some("B")),
            row("bar", Some("A")),
        ];
        let stats = NeighborhoodStats::from_joined(&joined);
        let order: Vec<_> = stats.food_by_subcategory.iter()
            .map(|c| (c.neighborhood.as_str(), c.subcategory.as_str(), c.count))
            .collect();
        assert_eq!(order, vec![("A", "bar", 1), ("B", "cafe", 1), ("B", "restaurant", 2)]);
    }

    #[test]
    fn overview_reports_gaps() {
        let joined = vec![
            row("restaurant", Some("Hadar")),
            row("bakery", None),
            row("spaceport", Some("Hadar")),
            row("parking", Some("Port")),
        ];
        let stats = NeighborhoodStats::from_joined(&joined);
        let overview = Overview::new(&joined, &stats);

        assert_eq!(overview.food_total, 1);
        // Hadar, Port and the unlocated bakery
        assert_eq!(overview.neighborhoods, 3);
        assert_eq!(overview.unique_business_subcategories, 2);
        assert_eq!(overview.unlisted_subcategories, vec!["spaceport".to_string()]);
        assert!(overview.unseen_business_subcategories.contains(&"cafe"));
        assert!(!overview.unseen_business_subcategories.contains(&"bakery"));
    }
}
