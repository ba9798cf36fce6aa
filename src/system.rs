//! The fountain emitter.
//!
//! [`ParticleEmitterSystem`] owns the particle pool. Each frame it advances
//! every particle, reaps the ones that aged out, spawns replacements at a
//! rate quantized against wall-clock milliseconds, and orders the survivors
//! back-to-front along the camera's view axis for alpha-blended drawing.
//!
//! The system does no GPU work itself. [`draw_list`](ParticleEmitterSystem::draw_list)
//! hands out the frame's vertex data and sorted draw order; the renderer in
//! [`crate::gpu`] uploads them and issues the draw call.
//!
//! # Example
//!
//! ```ignore
//! use whoosh::prelude::*;
//!
//! let mut system = ParticleEmitterSystem::new(Vec3::ZERO, 0.1);
//!
//! // In the frame loop:
//! system.update(frame.elapsed_ms, frame.ms_into_second, anchor);
//! system.set_camera(camera.look_at(), camera.eye());
//! let list = system.draw_list();
//! // upload list.vertices and list.indices, draw list.count() points
//! ```

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::emitter::EmitterConfig;
use crate::particle::{Particle, ParticleKind};

/// One entry of the GPU-visible vertex scratch: particle position plus age,
/// matching the render pipeline's vertex layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Age in ticks, as a float for the age-fade in the shader.
    pub age: f32,
}

/// Borrowed view of one frame's draw data.
///
/// `vertices` holds the selected particles in container order; `indices` is
/// the back-to-front order to draw them in. Both slices have the same
/// length, at most the configured draw capacity.
pub struct DrawList<'a> {
    /// Vertex data for the selected particles.
    pub vertices: &'a [PointVertex],
    /// Draw order, sorted by non-increasing view-axis depth.
    pub indices: &'a [u16],
}

impl DrawList<'_> {
    /// Number of particles to draw this frame.
    #[inline]
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// True when there is nothing to draw. Drawing zero particles is a
    /// legal no-op, not an error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Fountain-type particle emitter and owner of the live particle set.
///
/// The host drives it with two calls per frame, strictly in this order:
/// [`update`](Self::update) with the frame's timing and the current anchor,
/// then [`set_camera`](Self::set_camera) followed by
/// [`draw_list`](Self::draw_list) for rendering.
pub struct ParticleEmitterSystem {
    particles: Vec<Particle>,
    anchor: Vec3,
    config: EmitterConfig,
    eye: Vec3,
    look_at: Vec3,
    rng: SmallRng,
    // Per-frame scratch, allocated once to `draw_capacity` entries.
    vertices: Vec<PointVertex>,
    indices: Vec<u16>,
    depths: Vec<f32>,
    active: bool,
}

impl ParticleEmitterSystem {
    /// Create an emitter anchored at `anchor`, spawning on a shell of
    /// `radius`, with the default operating parameters.
    pub fn new(anchor: Vec3, radius: f32) -> Self {
        Self::with_config(
            anchor,
            EmitterConfig {
                emission_radius: radius,
                ..EmitterConfig::default()
            },
        )
    }

    /// Create an emitter with explicit tunables.
    pub fn with_config(anchor: Vec3, config: EmitterConfig) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(anchor, config, seed)
    }

    /// Deterministic variant of [`with_config`](Self::with_config) for tests
    /// and reproducible runs.
    pub fn with_seed(anchor: Vec3, config: EmitterConfig, seed: u64) -> Self {
        let capacity = config.draw_capacity;
        Self {
            particles: Vec::new(),
            anchor,
            config,
            eye: Vec3::ZERO,
            look_at: Vec3::ZERO,
            rng: SmallRng::seed_from_u64(seed),
            vertices: vec![PointVertex { position: [0.0; 3], age: 0.0 }; capacity],
            indices: vec![0; capacity],
            depths: vec![0.0; capacity],
            active: true,
        }
    }

    /// Reset the live set to empty and re-fix all tunables to their
    /// operating defaults, keeping only the given anchor and radius.
    pub fn initialize(&mut self, anchor: Vec3, radius: f32) {
        self.particles.clear();
        self.anchor = anchor;
        self.config = EmitterConfig {
            emission_radius: radius,
            ..EmitterConfig::default()
        };
        let capacity = self.config.draw_capacity;
        self.vertices.resize(capacity, PointVertex { position: [0.0; 3], age: 0.0 });
        self.indices.resize(capacity, 0);
        self.depths.resize(capacity, 0.0);
        self.active = true;
    }

    /// Camera state for depth sorting, pushed by the host once per frame
    /// before [`draw_list`](Self::draw_list).
    pub fn set_camera(&mut self, look_at: Vec3, eye: Vec3) {
        self.look_at = look_at;
        self.eye = eye;
    }

    /// Number of live particles. May exceed the draw capacity.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// The live particles, for inspection only.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current emission anchor.
    #[inline]
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Current tunables.
    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Whether the system has not been cleaned up yet.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one frame: move the anchor, age and reap the live set, then
    /// spawn this frame's quota of new particles.
    ///
    /// `elapsed_ms` is the frame's duration in whole milliseconds;
    /// `ms_into_second` is the millisecond phase within the current
    /// wall-clock second. The anchor only affects where future particles
    /// spawn; live particles keep their spawn velocity.
    pub fn update(&mut self, elapsed_ms: u32, ms_into_second: u32, anchor: Vec3) {
        debug_assert!(self.active, "update on a cleaned-up emitter");
        self.anchor = anchor;

        // Advance the whole set first and only then erase, highest index
        // first. Erasing mid-scan would shift the not-yet-visited indices.
        let mut doomed = Vec::new();
        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.advance();
            if particle.age() >= self.config.max_lifespan {
                doomed.push(i);
            }
        }
        for &i in doomed.iter().rev() {
            self.particles.remove(i);
        }

        for _ in 0..self.spawn_count(elapsed_ms, ms_into_second) {
            self.spawn_one();
        }
    }

    /// How many particles this frame spawns.
    ///
    /// With `interval` milliseconds between nominal spawns: a frame longer
    /// than the interval batch-spawns one particle per whole interval it
    /// covers; a shorter frame spawns exactly one particle iff its time
    /// window crossed a second-aligned interval boundary. The two branches
    /// together miss no boundary and never double-spawn on one.
    fn spawn_count(&self, elapsed_ms: u32, ms_into_second: u32) -> u32 {
        let interval = self.config.spawn_interval_ms();
        if elapsed_ms > interval {
            elapsed_ms / interval
        } else {
            // Truncating signed division: at the top of a second the
            // previous phase goes negative and must round toward zero.
            let now = ms_into_second as i32 / interval as i32;
            let before = (ms_into_second as i32 - elapsed_ms as i32) / interval as i32;
            u32::from(now > before)
        }
    }

    fn spawn_one(&mut self) {
        // Both angles span a full turn. phi acts as the polar angle, so the
        // shell is double-covered and biased toward the poles; the demo's
        // look depends on that distribution, so it is kept as-is.
        let theta = self.rng.gen::<f32>() * TAU;
        let phi = self.rng.gen::<f32>() * TAU;
        let dir = Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        );
        let speed = self.rng.gen_range(self.config.speed_range.clone());

        self.particles.push(Particle::new(
            self.anchor + self.config.emission_radius * dir,
            dir * speed,
            ParticleKind::Fountain,
        ));
    }

    /// Build this frame's draw data.
    ///
    /// Selects the first `draw_capacity` live particles in container order
    /// (overflow is silently skipped for the frame), computes each one's
    /// signed depth along the camera's view axis, and sorts the draw-order
    /// indices farthest-first so alpha blending composites back-to-front.
    pub fn draw_list(&mut self) -> DrawList<'_> {
        debug_assert!(self.active, "draw_list on a cleaned-up emitter");
        let count = self.particles.len().min(self.config.draw_capacity);

        let model = Mat4::IDENTITY;
        let view_dir = (self.look_at - self.eye).normalize_or_zero().extend(0.0);
        let eye = self.eye.extend(1.0);

        for (i, particle) in self.particles[..count].iter().enumerate() {
            self.vertices[i] = PointVertex {
                position: particle.position().to_array(),
                age: particle.age() as f32,
            };
            self.indices[i] = i as u16;
            // Position is a point, the eye-to-sprite offset a vector.
            let world = model * particle.position().extend(1.0);
            self.depths[i] = view_dir.dot(world - eye);
        }

        let depths = &self.depths;
        let order = &mut self.indices[..count];
        order.sort_unstable_by(|&a, &b| depths[b as usize].total_cmp(&depths[a as usize]));

        // Sanity pass over the freshly sorted order.
        debug_assert!(
            order
                .windows(2)
                .all(|pair| depths[pair[0] as usize] >= depths[pair[1] as usize]),
            "draw order is not back-to-front"
        );

        DrawList {
            vertices: &self.vertices[..count],
            indices: &self.indices[..count],
        }
    }

    /// Drop the live set and the per-frame scratch and mark the system
    /// inert. Safe to call once; `update`/`draw_list` afterwards trip debug
    /// assertions instead of silently corrupting state.
    pub fn cleanup(&mut self) {
        self.particles = Vec::new();
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.depths = Vec::new();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_system() -> ParticleEmitterSystem {
        ParticleEmitterSystem::with_seed(Vec3::ZERO, EmitterConfig::default(), 7)
    }

    #[test]
    fn test_spawn_count_batches_long_frames() {
        let system = test_system();
        // interval = 50: a 120 ms frame covers two whole intervals.
        assert_eq!(system.spawn_count(120, 120), 2);
        assert_eq!(system.spawn_count(51, 0), 1);
        assert_eq!(system.spawn_count(500, 0), 10);
    }

    #[test]
    fn test_spawn_count_boundary_crossing() {
        let system = test_system();
        // 45 ms -> 55 ms crosses the 50 ms boundary.
        assert_eq!(system.spawn_count(10, 55), 1);
        // 10 ms -> 20 ms crosses nothing.
        assert_eq!(system.spawn_count(10, 20), 0);
        // Exactly on the boundary counts once, not twice.
        assert_eq!(system.spawn_count(10, 50), 1);
        assert_eq!(system.spawn_count(10, 60), 0);
    }

    #[test]
    fn test_spawn_count_top_of_second() {
        let system = test_system();
        // Previous phase is negative here; truncation toward zero keeps the
        // quotients equal, so no spawn.
        assert_eq!(system.spawn_count(10, 5), 0);
    }

    #[test]
    fn test_update_records_anchor() {
        let mut system = test_system();
        let anchor = Vec3::new(2.0, -1.0, 0.5);
        system.update(0, 0, anchor);
        assert_eq!(system.anchor(), anchor);
    }

    #[test]
    fn test_spawned_particles_are_fountain_kind() {
        let mut system = test_system();
        system.update(120, 0, Vec3::ZERO);
        assert_eq!(system.particle_count(), 2);
        for p in system.particles() {
            assert_eq!(p.kind(), ParticleKind::Fountain);
            assert_eq!(p.age(), 0);
        }
    }

    #[test]
    fn test_initialize_resets_to_defaults() {
        let mut system = ParticleEmitterSystem::with_seed(
            Vec3::ZERO,
            EmitterConfig {
                max_lifespan: 3,
                draw_capacity: 16,
                ..EmitterConfig::default()
            },
            7,
        );
        system.update(500, 0, Vec3::ZERO);
        assert!(system.particle_count() > 0);

        system.initialize(Vec3::ONE, 0.25);
        assert_eq!(system.particle_count(), 0);
        assert_eq!(system.anchor(), Vec3::ONE);
        assert_eq!(system.config().emission_radius, 0.25);
        assert_eq!(system.config().max_lifespan, 20);
        assert_eq!(system.config().draw_capacity, 200);
    }

    #[test]
    fn test_draw_list_empty_is_noop() {
        let mut system = test_system();
        system.set_camera(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0));
        let list = system.draw_list();
        assert!(list.is_empty());
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn test_cleanup_marks_inert() {
        let mut system = test_system();
        system.update(120, 0, Vec3::ZERO);
        system.cleanup();
        assert!(!system.is_active());
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    #[should_panic(expected = "cleaned-up emitter")]
    #[cfg(debug_assertions)]
    fn test_update_after_cleanup_panics_in_debug() {
        let mut system = test_system();
        system.cleanup();
        system.update(10, 10, Vec3::ZERO);
    }
}
