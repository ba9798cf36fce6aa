//! A single point-mass particle.
//!
//! Particles are pure values: the emitter in [`crate::system`] is the only
//! code that creates or destroys them, and all mutation happens through the
//! methods here.

use glam::Vec3;

/// Which emitter family produced a particle.
///
/// Only [`ParticleKind::Fountain`] is spawned today. The remaining variants
/// are reserved so a future emitter can match on the kind exhaustively
/// instead of comparing magic integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Fountain spray, the only kind the current emitter produces.
    Fountain,
    /// Reserved.
    Rain,
    /// Reserved.
    Splash,
    /// Reserved.
    Butterfly,
}

/// A point mass with a position, a velocity in world units per update tick,
/// and an age counted in ticks.
///
/// Age only ever grows; the emitter removes a particle once its age reaches
/// the configured lifespan.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec3,
    velocity: Vec3,
    kind: ParticleKind,
    age: u32,
}

impl Particle {
    /// Create a particle at `position` moving with `velocity`. Age starts at 0.
    pub fn new(position: Vec3, velocity: Vec3, kind: ParticleKind) -> Self {
        Self {
            position,
            velocity,
            kind,
            age: 0,
        }
    }

    /// Move one step along the velocity and grow one tick older.
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.age += 1;
    }

    /// Current world-space position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity, world units per tick.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Emitter family this particle belongs to.
    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Age in update ticks since spawn.
    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Overwrite the position, e.g. for corrective repositioning.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Overwrite the velocity, discarding existing momentum.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Accumulate a velocity delta on top of the current momentum.
    ///
    /// Distinct from [`set_velocity`](Self::set_velocity) so a future force
    /// integrator can add impulses without clobbering the spawn velocity.
    pub fn add_velocity(&mut self, delta: Vec3) {
        self.velocity += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_starts_at_age_zero() {
        let p = Particle::new(Vec3::ONE, Vec3::ZERO, ParticleKind::Fountain);
        assert_eq!(p.age(), 0);
        assert_eq!(p.kind(), ParticleKind::Fountain);
    }

    #[test]
    fn test_advance_integrates_and_ages() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let velocity = Vec3::new(0.25, -0.5, 1.0);
        let mut p = Particle::new(start, velocity, ParticleKind::Fountain);

        for _ in 0..7 {
            p.advance();
        }

        assert_eq!(p.age(), 7);
        assert_eq!(p.position(), start + velocity * 7.0);
        assert_eq!(p.velocity(), velocity);
    }

    #[test]
    fn test_add_velocity_accumulates() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::X, ParticleKind::Fountain);
        p.add_velocity(Vec3::Y);
        assert_eq!(p.velocity(), Vec3::new(1.0, 1.0, 0.0));

        p.set_velocity(Vec3::Z);
        assert_eq!(p.velocity(), Vec3::Z);
    }

    #[test]
    fn test_set_position_overwrites() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::ZERO, ParticleKind::Fountain);
        p.set_position(Vec3::splat(4.0));
        assert_eq!(p.position(), Vec3::splat(4.0));
        // Repositioning does not touch the age.
        assert_eq!(p.age(), 0);
    }
}
