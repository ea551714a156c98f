pub mod best_fit;
pub mod first_fit;
pub mod threshold_fit;
