pub mod battle;
pub mod pokemon;
pub mod team;
pub mod trainer;

pub use pokemon::Pokemon;
