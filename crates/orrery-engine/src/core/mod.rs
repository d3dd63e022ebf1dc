pub mod ray;
pub mod scene;
pub mod spherical;
pub mod time;
