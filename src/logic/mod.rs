pub mod analysis;
pub mod bands;
pub mod nutrients;
pub mod quality;
pub mod sampling;
pub mod summary;
pub mod texture;
pub mod zones;

pub use analysis::{classify_point, FarmAnalyzer};
pub use nutrients::calculate_nutrient_score;
pub use quality::{category_for_percentage, classify_soil_quality};
pub use sampling::{generate_sample_points, generate_sample_points_seeded};
pub use summary::summarize;
pub use texture::classify_soil_texture;
pub use zones::classify_management_zone;
