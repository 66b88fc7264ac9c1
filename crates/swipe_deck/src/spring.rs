//! Closed-form damped springs.
//!
//! Every motion is a pure function of the time elapsed since it started, so
//! the host only has to feed elapsed seconds from its own clock.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Below this distance from 1.0 the damping ratio is treated as critical.
const CRITICAL_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0
    }

    /// Undamped angular frequency.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Tolerances under which a motion counts as finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rest {
    pub displacement: f32,
    pub speed: f32,
}

impl Rest {
    /// Half a pixel, five pixels per second.
    pub const POSITION: Self = Self {
        displacement: 0.5,
        speed: 5.0,
    };

    pub const SCALE: Self = Self {
        displacement: 0.001,
        speed: 0.01,
    };
}

/// One-dimensional motion from `from` toward `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringMotion {
    spring: Spring,
    to: f32,
    /// Initial displacement from `to`
    x0: f32,
    v0: f32,
}

impl SpringMotion {
    pub const fn new(spring: Spring, from: f32, to: f32, initial_velocity: f32) -> Self {
        Self {
            spring,
            to,
            x0: from - to,
            v0: initial_velocity,
        }
    }

    pub const fn target(&self) -> f32 {
        self.to
    }

    pub fn position(&self, t: f32) -> f32 {
        self.to + self.displacement(t).0
    }

    pub fn velocity(&self, t: f32) -> f32 {
        self.displacement(t).1
    }

    pub fn is_settled(&self, t: f32, rest: Rest) -> bool {
        let (x, v) = self.displacement(t);
        x.abs() <= rest.displacement && v.abs() <= rest.speed
    }

    /// Displacement from target and its derivative at time `t`.
    fn displacement(&self, t: f32) -> (f32, f32) {
        let t = t.max(0.0);
        let (x0, v0) = (self.x0, self.v0);
        let omega = self.spring.natural_frequency();
        let zeta = self.spring.damping_ratio();

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            let c = omega.mul_add(x0, v0);
            let envelope = (-omega * t).exp();
            let x = envelope * c.mul_add(t, x0);
            let v = envelope * (-omega).mul_add(c.mul_add(t, x0), c);
            (x, v)
        } else if zeta < 1.0 {
            let decay = zeta * omega;
            let omega_d = omega * zeta.mul_add(-zeta, 1.0).sqrt();
            let b = decay.mul_add(x0, v0) / omega_d;
            let (sin, cos) = (omega_d * t).sin_cos();
            let envelope = (-decay * t).exp();
            let x = envelope * x0.mul_add(cos, b * sin);
            let v = envelope
                * (-decay).mul_add(x0.mul_add(cos, b * sin), omega_d * b.mul_add(cos, -x0 * sin));
            (x, v)
        } else {
            let root = zeta.mul_add(zeta, -1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c1 = (-r2).mul_add(x0, v0) / (r1 - r2);
            let c2 = x0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1.mul_add(e1, c2 * e2), (c1 * r1).mul_add(e1, c2 * r2 * e2))
        }
    }
}

/// Independent springs on both axes, sharing one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringMotion2 {
    x: SpringMotion,
    y: SpringMotion,
}

impl SpringMotion2 {
    pub const fn new(spring: Spring, from: Vec2, to: Vec2, initial_velocity: Vec2) -> Self {
        Self {
            x: SpringMotion::new(spring, from.x, to.x, initial_velocity.x),
            y: SpringMotion::new(spring, from.y, to.y, initial_velocity.y),
        }
    }

    pub const fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    pub fn position(&self, t: f32) -> Vec2 {
        Vec2::new(self.x.position(t), self.y.position(t))
    }

    pub fn is_settled(&self, t: f32, rest: Rest) -> bool {
        self.x.is_settled(t, rest) && self.y.is_settled(t, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle_time(motion: &SpringMotion, rest: Rest) -> Option<f32> {
        (1..=600)
            .map(|frame| frame as f32 / 60.0)
            .find(|&t| motion.is_settled(t, rest))
    }

    #[test]
    fn starts_at_origin_with_given_velocity() {
        for spring in [
            Spring::new(150.0, 15.0),
            Spring::new(100.0, 20.0),
            Spring::new(100.0, 60.0),
        ] {
            let motion = SpringMotion::new(spring, 40.0, 0.0, -250.0);
            assert!((motion.position(0.0) - 40.0).abs() < 1e-3, "{spring:?} position at t=0");
            assert!((motion.velocity(0.0) + 250.0).abs() < 1e-2, "{spring:?} velocity at t=0");
        }
    }

    #[test]
    fn every_damping_regime_settles_on_target() {
        for spring in [
            Spring::new(150.0, 15.0),
            Spring::new(100.0, 20.0),
            Spring::new(100.0, 60.0),
        ] {
            let motion = SpringMotion::new(spring, 0.0, 960.0, 1500.0);
            let t = settle_time(&motion, Rest::POSITION);
            assert!(t.is_some(), "{spring:?} should settle within ten seconds");
            let t = t.unwrap_or_default();
            assert!(
                (motion.position(t) - 960.0).abs() <= Rest::POSITION.displacement,
                "{spring:?} settles on target"
            );
        }
    }

    #[test]
    fn exit_profile_overshoots_less_than_return_profile() {
        let overshoot = |spring: Spring| {
            let motion = SpringMotion::new(spring, 100.0, 0.0, 0.0);
            (0..600)
                .map(|frame| motion.position(frame as f32 / 120.0))
                .fold(0.0_f32, |worst, p| worst.min(p))
                .abs()
        };
        let exit = overshoot(Spring::new(200.0, 25.0));
        let back = overshoot(Spring::new(150.0, 15.0));
        assert!(exit < back, "exit overshoot {exit} should be below return overshoot {back}");
    }

    #[test]
    fn derived_quantities() {
        let spring = Spring::new(100.0, 20.0);
        assert!((spring.natural_frequency() - 10.0).abs() < 1e-5, "sqrt(k/m)");
        assert!((spring.damping_ratio() - 1.0).abs() < 1e-5, "critical");
        assert!(!Spring::new(-1.0, 1.0).is_valid(), "negative stiffness");
        assert!(!Spring::new(1.0, -1.0).is_valid(), "negative damping");
    }

    #[test]
    fn two_dimensional_motion_tracks_both_axes() {
        let motion = SpringMotion2::new(
            Spring::new(200.0, 25.0),
            Vec2::new(30.0, -10.0),
            Vec2::new(960.0, -10.0),
            Vec2::ZERO,
        );
        assert_eq!(motion.target(), Vec2::new(960.0, -10.0), "target kept");
        assert!(!motion.is_settled(0.0, Rest::POSITION), "not settled at start");
        assert!(motion.is_settled(5.0, Rest::POSITION), "settled after five seconds");
    }
}
