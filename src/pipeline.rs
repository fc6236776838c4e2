//! The three pipeline stages, wired to the configured files.

use crate::aggregate::{correlation_columns, NeighborhoodStats, Overview};
use crate::centroids::extract_centroids;
use crate::config::AppConfig;
use crate::data::{load_businesses, load_neighborhoods};
use crate::merge::merge_datasets;
use crate::output::{read_table, write_table};
use crate::spatial::{classify_businesses, join_neighborhoods};
use crate::stats::{correlate, Correlation};
use crate::taxonomy::{is_business, is_food};
use crate::types::{CentroidRecord, JoinedBusiness, NeighborhoodSummary, NodeRecord};
use anyhow::Result;
use tracing::{info, warn};

/// What `analyze` produced, for callers that want more than the files.
#[derive(Debug)]
pub struct Analysis {
    pub joined: Vec<JoinedBusiness>,
    pub summary: Vec<NeighborhoodSummary>,
    pub overview: Overview,
    pub correlation: Correlation,
}

pub fn run_centroids(config: &AppConfig) -> Result<Vec<CentroidRecord>> {
    let neighborhoods = load_neighborhoods(&config.input.neighborhoods, &config.input.name_column)?;
    let centroids = extract_centroids(&neighborhoods);
    write_table(&config.output.neighborhood_geopoints, &centroids)?;
    Ok(centroids)
}

pub fn node_records(joined: &[JoinedBusiness]) -> Vec<NodeRecord> {
    joined
        .iter()
        .map(|row| NodeRecord {
            neighborhood: row.neighborhood.clone(),
            name: row.business.name.clone(),
            subcategory: row.business.subcategory.clone(),
            latitude: row.business.point.y(),
            longitude: row.business.point.x(),
            is_business: is_business(&row.business.subcategory),
            is_food: is_food(&row.business.subcategory),
        })
        .collect()
}

pub fn run_analysis(config: &AppConfig) -> Result<Analysis> {
    let businesses = load_businesses(&config.input.businesses)?;
    let neighborhoods = load_neighborhoods(&config.input.neighborhoods, &config.input.name_column)?;

    let classified = classify_businesses(businesses);
    let joined = join_neighborhoods(classified, &neighborhoods);

    let stats = NeighborhoodStats::from_joined(&joined);
    let summary = stats.summary();
    write_table(&config.output.neighborhood_data, &summary)?;

    if config.output.write_node_dataset {
        write_table(&config.output.node_dataset, &node_records(&joined))?;
    }

    let overview = Overview::new(&joined, &stats);
    info!(
        food_total = overview.food_total,
        neighborhoods = overview.neighborhoods,
        unique_business_subcategories = overview.unique_business_subcategories,
        "Business overview"
    );
    if !overview.unseen_business_subcategories.is_empty() {
        info!(subcategories = ?overview.unseen_business_subcategories, "Business subcategories never observed");
    }
    if !overview.unlisted_subcategories.is_empty() {
        warn!(subcategories = ?overview.unlisted_subcategories, "Subcategories in neither business list");
    }

    let (share, diversity) = correlation_columns(&stats.share_diversity());
    let correlation = correlate(config.analysis.correlation, &share, &diversity, config.analysis.epsilon)?;

    Ok(Analysis { joined, summary, overview, correlation })
}

pub fn run_merge(config: &AppConfig) -> Result<usize> {
    let centroids: Vec<CentroidRecord> = read_table(&config.output.neighborhood_geopoints)?;
    let nodes: Vec<NodeRecord> = read_table(&config.output.node_dataset)?;

    let merged = merge_datasets(&nodes, &centroids);
    write_table(&config.output.bi_dataset, &merged)?;
    Ok(merged.len())
}
