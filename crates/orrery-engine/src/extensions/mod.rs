// extensions/mod.rs
//
// Optional camera systems. Decoupled from Entity/Scene; games opt in by owning them.

pub mod orbit_controls;

pub use orbit_controls::{OrbitControls, OrbitControlsConfig};
