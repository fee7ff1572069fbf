pub mod comparison;
pub mod optimizer;
pub mod recommender;
