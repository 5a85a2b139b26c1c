//! Rock explosion bursts
//!
//! Each destroyed rock becomes a burst of small shards that fly up, fall
//! under light gravity, spin, shrink, and fade out together.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A single shard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    /// Units per tick
    pub velocity: Vec3,
    /// Base shard radius
    pub size: f32,
    /// Multiplier on `size`, shrinks every tick
    pub scale: f32,
    /// Accumulated spin about X and Y
    pub rotation: Vec2,
    pub opacity: f32,
}

/// One explosion: shards sharing a lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionBurst {
    pub origin: Vec3,
    /// 0xRRGGBB taken from the destroyed rock
    pub color: u32,
    pub particles: Vec<Particle>,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    elapsed_ticks: u32,
    lifetime_ticks: u32,
}

impl ExplosionBurst {
    fn spawn(origin: Vec3, color: u32, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let start = origin + Vec3::new(0.0, tuning.burst_lift, 0.0);
        let spread = tuning.particle_spread;
        let particles = (0..tuning.burst_particles)
            .map(|_| Particle {
                position: start,
                velocity: Vec3::new(
                    rng.random_range(-spread..spread),
                    rng.random_range(tuning.particle_min_lift..tuning.particle_max_lift),
                    rng.random_range(-spread..spread),
                ),
                size: rng.random_range(tuning.particle_min_size..tuning.particle_max_size),
                scale: 1.0,
                rotation: Vec2::ZERO,
                opacity: 1.0,
            })
            .collect();

        Self {
            origin,
            color,
            particles,
            life: tuning.burst_life,
            max_life: tuning.burst_life,
            elapsed_ticks: 0,
            lifetime_ticks: tuning.burst_ticks(),
        }
    }

    /// Advance one tick. Returns false once the burst has burned out.
    fn update(&mut self, tuning: &Tuning) -> bool {
        self.elapsed_ticks += 1;
        // Derived from the tick count so the burst ends on an exact tick
        self.life = self.max_life - tuning.burst_step * self.elapsed_ticks as f32;
        let alpha = (self.life / self.max_life).max(0.0);

        for p in &mut self.particles {
            p.velocity.y -= tuning.particle_gravity;
            p.position += p.velocity;
            p.rotation += Vec2::new(tuning.particle_spin_x, tuning.particle_spin_y);
            p.scale *= tuning.particle_shrink;
            p.opacity = alpha;
        }

        self.elapsed_ticks < self.lifetime_ticks
    }

    /// Current fade (1 = fresh, 0 = gone)
    pub fn opacity(&self) -> f32 {
        (self.life / self.max_life).max(0.0)
    }
}

/// Every live burst
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionSystem {
    bursts: Vec<ExplosionBurst>,
    /// Concurrent burst cap; `None` is unbounded, `Some(0)` disables effects
    max_bursts: Option<usize>,
}

impl ExplosionSystem {
    pub fn with_budget(max_bursts: Option<usize>) -> Self {
        Self {
            bursts: Vec::new(),
            max_bursts,
        }
    }

    pub fn set_budget(&mut self, max_bursts: Option<usize>) {
        self.max_bursts = max_bursts;
        if let Some(cap) = max_bursts {
            if self.bursts.len() > cap {
                let excess = self.bursts.len() - cap;
                self.bursts.drain(..excess);
            }
        }
    }

    /// Spawn a burst at a destroyed rock. Evicts the oldest burst when the
    /// budget is full. Returns false when effects are disabled.
    pub fn trigger(&mut self, position: Vec3, color: u32, tuning: &Tuning, rng: &mut Pcg32) -> bool {
        match self.max_bursts {
            Some(0) => return false,
            Some(cap) if self.bursts.len() >= cap => {
                let excess = self.bursts.len() + 1 - cap;
                self.bursts.drain(..excess);
                log::trace!("Burst budget full, evicted {excess} oldest");
            }
            _ => {}
        }
        self.bursts
            .push(ExplosionBurst::spawn(position, color, tuning, rng));
        true
    }

    /// Decay every burst one tick and drop the burned-out ones
    pub fn update(&mut self, tuning: &Tuning) {
        self.bursts.retain_mut(|burst| burst.update(tuning));
    }

    pub fn bursts(&self) -> &[ExplosionBurst] {
        &self.bursts
    }

    pub fn particle_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fire(system: &mut ExplosionSystem, tuning: &Tuning, rng: &mut Pcg32) {
        assert!(system.trigger(Vec3::new(1.0, 0.0, -5.0), 0xE6EEF7, tuning, rng));
    }

    #[test]
    fn test_spawn_shape() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);

        let burst = &system.bursts()[0];
        assert_eq!(burst.particles.len(), 40);
        assert_eq!(burst.life, 0.8);
        assert_eq!(burst.max_life, 0.8);
        for p in &burst.particles {
            assert_eq!(p.position, Vec3::new(1.0, 0.2, -5.0));
            assert!(p.size >= 0.06 && p.size < 0.12);
            assert!(p.velocity.x >= -0.15 && p.velocity.x < 0.15);
            assert!(p.velocity.z >= -0.15 && p.velocity.z < 0.15);
            assert!(p.velocity.y >= 0.05 && p.velocity.y < 0.30);
            assert_eq!(p.opacity, 1.0);
        }
    }

    #[test]
    fn test_burst_gone_after_50_ticks() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);

        for _ in 0..49 {
            system.update(&tuning);
        }
        assert_eq!(system.particle_count(), 40);
        system.update(&tuning);
        assert_eq!(system.particle_count(), 0);
        assert!(system.is_empty());
    }

    #[test]
    fn test_opacity_strictly_decreases() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);

        let mut last = 1.0;
        while let Some(burst) = system.bursts().first() {
            let opacity = burst.particles[0].opacity;
            assert!(opacity <= last);
            last = opacity;
            system.update(&tuning);
            if let Some(burst) = system.bursts().first() {
                assert!(burst.particles[0].opacity < last);
                assert!(burst.particles[0].opacity >= 0.0);
            }
        }
    }

    #[test]
    fn test_particles_fall_and_shrink() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);
        let v0 = system.bursts()[0].particles[0].velocity;

        system.update(&tuning);
        let p = &system.bursts()[0].particles[0];
        assert!((p.velocity.y - (v0.y - 0.005)).abs() < 1e-6);
        assert!((p.scale - 0.98).abs() < 1e-6);
        assert!((p.rotation.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_bursts_decay_independently() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);
        for _ in 0..25 {
            system.update(&tuning);
        }
        fire(&mut system, &tuning, &mut rng);
        for _ in 0..25 {
            system.update(&tuning);
        }
        assert_eq!(system.bursts().len(), 1);
        assert!(system.bursts()[0].opacity() > 0.0);
    }

    #[test]
    fn test_launch_follows_tuning() {
        let tuning = Tuning {
            particle_spread: 0.01,
            particle_min_lift: 1.0,
            particle_max_lift: 1.5,
            particle_min_size: 0.5,
            particle_max_size: 0.6,
            particle_spin_x: 0.0,
            particle_spin_y: 0.2,
            burst_lift: 2.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(13);
        let mut system = ExplosionSystem::default();
        fire(&mut system, &tuning, &mut rng);

        for p in &system.bursts()[0].particles {
            assert_eq!(p.position, Vec3::new(1.0, 2.0, -5.0));
            assert!(p.velocity.x.abs() < 0.01 && p.velocity.z.abs() < 0.01);
            assert!(p.velocity.y >= 1.0 && p.velocity.y < 1.5);
            assert!(p.size >= 0.5 && p.size < 0.6);
        }

        system.update(&tuning);
        let p = &system.bursts()[0].particles[0];
        assert_eq!(p.rotation.x, 0.0);
        assert!((p.rotation.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_budget_evicts_oldest() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ExplosionSystem::with_budget(Some(2));
        for i in 0..3 {
            assert!(system.trigger(Vec3::new(i as f32, 0.0, 0.0), 0xffffff, &tuning, &mut rng));
        }
        assert_eq!(system.bursts().len(), 2);
        assert_eq!(system.bursts()[0].origin.x, 1.0);

        let mut off = ExplosionSystem::with_budget(Some(0));
        assert!(!off.trigger(Vec3::ZERO, 0xffffff, &tuning, &mut rng));
        assert!(off.is_empty());
    }
}
