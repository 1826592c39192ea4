/// Weighted Shannon entropy over possibility sets
pub mod entropy;
