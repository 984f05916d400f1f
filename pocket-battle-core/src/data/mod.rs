pub mod species;
pub mod types;
