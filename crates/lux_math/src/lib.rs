// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod aabb;
pub mod geometry;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
