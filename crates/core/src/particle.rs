//! Particles advected by the flow field.

use crate::prng::Xorshift64;
use crate::vector::Vector;

/// Render footprint of every particle, in surface units.
pub const PARTICLE_SIZE: f64 = 2.0;

/// Surface area, in square units, per spawned particle.
const AREA_PER_PARTICLE: usize = 1000;

/// A point mass with trail memory.
///
/// `previous` is where the particle was before its last move, so a line
/// from `previous` to `position` draws one trail segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector,
    pub previous: Vector,
    pub velocity: Vector,
    /// Force accumulated for the current tick. Zero outside of `move_by`.
    pub acceleration: Vector,
    /// Render footprint; also how far past the near edge a particle may
    /// drift before wrapping.
    pub size: f64,
}

impl Particle {
    /// Creates a particle at `position` moving with `velocity`.
    pub fn new(position: Vector, velocity: Vector) -> Self {
        Self {
            position,
            previous: position,
            velocity,
            acceleration: Vector::ZERO,
            size: PARTICLE_SIZE,
        }
    }

    /// Spawns a particle uniformly on a `width x height` surface with a
    /// random velocity in [-0.5, 0.5) on each axis.
    pub fn spawn(rng: &mut Xorshift64, width: f64, height: f64) -> Self {
        let position = Vector::new(rng.next_f64() * width, rng.next_f64() * height);
        let velocity = Vector::new(rng.next_f64() - 0.5, rng.next_f64() - 0.5);
        Self::new(position, velocity)
    }

    /// Number of particles for a surface: one per thousand square units, rounded down.
    pub fn count_for_surface(width: usize, height: usize) -> usize {
        width.saturating_mul(height) / AREA_PER_PARTICLE
    }

    /// Advances one tick with semi-implicit Euler integration.
    ///
    /// `force` is the field vector under the particle, or `None` when the
    /// particle is outside field coverage. The speed cap is applied after
    /// the position update, so it limits the next step, not this one.
    pub fn move_by(&mut self, force: Option<Vector>, max_speed: f64) {
        self.previous = self.position;
        if let Some(force) = force {
            self.acceleration.add_to(force);
        }
        self.velocity.add_to(self.acceleration);
        self.position.add_to(self.velocity);
        if self.velocity.length() > max_speed {
            self.velocity.set_length(max_speed);
        }
        self.acceleration = Vector::ZERO;
    }

    /// Toroidal boundary: leaving one edge re-enters at the opposite one.
    ///
    /// Both `position` and `previous` snap on the wrapped axis so no trail
    /// segment is drawn across the surface.
    pub fn wrap(&mut self, width: f64, height: f64) {
        if let Some(x) = wrap_axis(self.position.x, width, self.size) {
            self.position.x = x;
            self.previous.x = x;
        }
        if let Some(y) = wrap_axis(self.position.y, height, self.size) {
            self.position.y = y;
            self.previous.y = y;
        }
    }
}

/// New coordinate for one axis, or `None` if no wrap is needed.
fn wrap_axis(value: f64, extent: f64, size: f64) -> Option<f64> {
    if value > extent {
        Some(0.0)
    } else if value < -size {
        Some(extent - 1.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(Vector::new(x, y), Vector::ZERO)
    }

    #[test]
    fn new_particle_has_trail_at_start() {
        let p = at(3.0, 4.0);
        assert_eq!(p.previous, p.position);
        assert_eq!(p.acceleration, Vector::ZERO);
        assert_eq!(p.size, PARTICLE_SIZE);
    }

    #[test]
    fn move_records_previous_position() {
        let mut p = Particle::new(Vector::new(10.0, 10.0), Vector::new(1.0, 0.5));
        p.move_by(None, 10.0);
        assert_eq!(p.previous, Vector::new(10.0, 10.0));
        assert_eq!(p.position, Vector::new(11.0, 10.5));
    }

    #[test]
    fn move_is_semi_implicit() {
        let mut p = Particle::new(Vector::ZERO, Vector::new(1.0, 0.0));
        p.move_by(Some(Vector::new(0.5, 0.25)), 10.0);
        // velocity updated first, then position uses the new velocity
        assert_eq!(p.velocity, Vector::new(1.5, 0.25));
        assert_eq!(p.position, Vector::new(1.5, 0.25));
    }

    #[test]
    fn move_without_force_keeps_velocity() {
        let mut p = Particle::new(Vector::ZERO, Vector::new(0.3, -0.2));
        p.move_by(None, 10.0);
        assert_eq!(p.velocity, Vector::new(0.3, -0.2));
    }

    #[test]
    fn speed_is_capped_after_position_update() {
        let mut p = Particle::new(Vector::ZERO, Vector::new(3.0, 4.0));
        p.move_by(None, 1.0);
        // full uncapped step taken this tick
        assert_eq!(p.position, Vector::new(3.0, 4.0));
        assert!((p.velocity.length() - 1.0).abs() < 1e-12);
        assert!((p.velocity.x - 0.6).abs() < 1e-12);
        assert!((p.velocity.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn acceleration_is_zero_after_move() {
        let mut p = at(0.0, 0.0);
        p.acceleration = Vector::new(9.0, 9.0);
        p.move_by(Some(Vector::new(1.0, 1.0)), 0.5);
        assert_eq!(p.acceleration, Vector::ZERO);
        p.move_by(None, 0.5);
        assert_eq!(p.acceleration, Vector::ZERO);
    }

    #[test]
    fn wrap_past_far_edge_snaps_to_zero() {
        let mut p = at(101.0, 50.0);
        p.previous = Vector::new(99.5, 50.0);
        p.wrap(100.0, 100.0);
        assert_eq!(p.position.x, 0.0);
        assert_eq!(p.previous.x, 0.0);
        assert_eq!(p.position.y, 50.0);
    }

    #[test]
    fn wrap_past_near_edge_snaps_to_far_edge() {
        let mut p = at(50.0, -2.5);
        p.wrap(100.0, 80.0);
        assert_eq!(p.position.y, 79.0);
        assert_eq!(p.previous.y, 79.0);
        assert_eq!(p.position.x, 50.0);
    }

    #[test]
    fn wrap_tolerates_footprint_overhang() {
        let mut p = at(-1.5, -2.0);
        p.wrap(100.0, 100.0);
        assert_eq!(p.position, Vector::new(-1.5, -2.0));
    }

    #[test]
    fn wrap_at_exact_far_edge_does_nothing() {
        let mut p = at(100.0, 100.0);
        p.wrap(100.0, 100.0);
        assert_eq!(p.position, Vector::new(100.0, 100.0));
    }

    #[test]
    fn wrap_both_axes_independently() {
        let mut p = at(120.0, -10.0);
        p.wrap(100.0, 60.0);
        assert_eq!(p.position, Vector::new(0.0, 59.0));
        assert_eq!(p.previous, Vector::new(0.0, 59.0));
    }

    #[test]
    fn count_for_surface_rounds_down() {
        assert_eq!(Particle::count_for_surface(100, 100), 10);
        assert_eq!(Particle::count_for_surface(1920, 1080), 2073);
        assert_eq!(Particle::count_for_surface(30, 30), 0);
        assert_eq!(Particle::count_for_surface(0, 500), 0);
    }

    #[test]
    fn spawn_is_inside_surface() {
        let mut rng = Xorshift64::new(3);
        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, 320.0, 200.0);
            assert!((0.0..320.0).contains(&p.position.x));
            assert!((0.0..200.0).contains(&p.position.y));
            assert!((-0.5..0.5).contains(&p.velocity.x));
            assert!((-0.5..0.5).contains(&p.velocity.y));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn component() -> impl Strategy<Value = f64> {
            -50.0_f64..50.0
        }

        proptest! {
            #[test]
            fn speed_never_exceeds_cap(
                vx in component(),
                vy in component(),
                fx in -5.0_f64..5.0,
                fy in -5.0_f64..5.0,
                particle_speed in 1.0_f64..=100.0,
            ) {
                let max_speed = particle_speed / 50.0;
                let mut p = Particle::new(Vector::ZERO, Vector::new(vx, vy));
                for _ in 0..5 {
                    p.move_by(Some(Vector::new(fx, fy)), max_speed);
                    prop_assert!(p.velocity.length() <= max_speed + 1e-9);
                    prop_assert_eq!(p.acceleration, Vector::ZERO);
                }
            }

            #[test]
            fn wrap_keeps_position_in_bounds(
                x in -500.0_f64..500.0,
                y in -500.0_f64..500.0,
                w in 1.0_f64..400.0,
                h in 1.0_f64..400.0,
            ) {
                let mut p = at(x, y);
                p.wrap(w, h);
                prop_assert!(p.position.x >= -p.size && p.position.x <= w);
                prop_assert!(p.position.y >= -p.size && p.position.y <= h);
            }
        }
    }
}
