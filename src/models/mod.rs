mod garment;
mod outfit;
mod weather;

pub use garment::{load_catalog, GarmentCategory, GarmentItem, PatternKind};
pub use outfit::{OutfitKind, Recommendation, ScoredItem};
pub use weather::{RequiredAttributes, WeatherReading, WeatherSnapshot, WeatherSource};
