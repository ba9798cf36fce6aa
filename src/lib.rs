//! # whoosh
//!
//! A particle fountain: particles spray from a movable anchor point, age out
//! after a fixed lifespan, and are drawn as depth-sorted, alpha-blended
//! points so translucent sprites composite correctly back to front.
//!
//! The simulation is entirely CPU-side and deterministic per seed; the GPU
//! layer is a thin host that uploads the prepared vertex and index data each
//! frame.
//!
//! ## Quick Start
//!
//! ```no_run
//! use whoosh::prelude::*;
//!
//! let mut fountain = ParticleEmitterSystem::new(Vec3::new(0.0, 0.25, 0.0), 0.1);
//! fountain.set_camera(Vec3::ZERO, Vec3::new(0.0, 1.0, 3.0));
//!
//! // Per frame: advance, reap, spawn, then fetch sorted draw data.
//! fountain.update(16, 450, Vec3::new(0.0, 0.25, 0.0));
//! let list = fountain.draw_list();
//! assert_eq!(list.vertices.len(), list.indices.len());
//! ```
//!
//! Run the windowed demo with `cargo run`. Drag to orbit, scroll to zoom.

pub mod emitter;
pub mod error;
pub mod gpu;
pub mod particle;
pub mod system;
pub mod texture;
pub mod time;
pub mod window;

pub use emitter::EmitterConfig;
pub use particle::{Particle, ParticleKind};
pub use system::{DrawList, ParticleEmitterSystem, PointVertex};
pub use time::{FrameClock, FrameTime};

/// Common imports for working with the emitter.
pub mod prelude {
    pub use crate::emitter::EmitterConfig;
    pub use crate::particle::{Particle, ParticleKind};
    pub use crate::system::{DrawList, ParticleEmitterSystem, PointVertex};
    pub use crate::time::{FrameClock, FrameTime};
    pub use glam::{Mat4, Vec3};
}
