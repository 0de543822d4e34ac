pub mod distance;
pub mod lineage;
pub mod matrix;
pub mod stats;
