pub mod activity;
pub mod heatmap;
pub mod languages;
pub mod pinned;
pub mod repos;
pub mod stats;
