pub mod aggregate;
pub mod centroids;
pub mod config;
pub mod data;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod spatial;
pub mod stats;
pub mod taxonomy;
pub mod types;
