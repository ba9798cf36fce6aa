//! Tunable parameters for the fountain emitter.

use std::ops::Range;

/// Tunables for [`ParticleEmitterSystem`](crate::system::ParticleEmitterSystem).
///
/// The defaults are the demo's operating values; `initialize` re-fixes them
/// wholesale, replacing whatever was configured before.
///
/// # Preconditions
///
/// `spawn_rate` and `max_lifespan` must be greater than zero. The emitter
/// does not validate them; a zero `spawn_rate` divides by zero in the spawn
/// quantizer.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Distance from the anchor at which new particles appear.
    pub emission_radius: f32,
    /// Random spawn speed bounds, world units per tick.
    pub speed_range: Range<f32>,
    /// Age in ticks at which a particle is removed from the live set.
    pub max_lifespan: u32,
    /// Particles nominally spawned per 1000 ms of elapsed time.
    pub spawn_rate: u32,
    /// Hard cap on particles submitted to the GPU per frame. Live particles
    /// beyond the cap keep simulating; they just are not drawn that frame.
    pub draw_capacity: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emission_radius: 0.1,
            speed_range: 0.005..0.05,
            max_lifespan: 20,
            spawn_rate: 20,
            draw_capacity: 200,
        }
    }
}

impl EmitterConfig {
    /// Milliseconds between nominal spawns, by integer division.
    pub fn spawn_interval_ms(&self) -> u32 {
        1000 / self.spawn_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_operating_values() {
        let config = EmitterConfig::default();
        assert_eq!(config.speed_range, 0.005..0.05);
        assert_eq!(config.max_lifespan, 20);
        assert_eq!(config.spawn_rate, 20);
        assert_eq!(config.draw_capacity, 200);
    }

    #[test]
    fn test_spawn_interval_is_integer_division() {
        let config = EmitterConfig {
            spawn_rate: 30,
            ..Default::default()
        };
        // 1000 / 30 truncates; the remainder is absorbed by the
        // second-aligned boundary check in the emitter.
        assert_eq!(config.spawn_interval_ms(), 33);
    }
}
