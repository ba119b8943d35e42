pub mod compliance;
pub mod matching;
pub mod shifts;
