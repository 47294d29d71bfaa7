use glam::Vec2;

use crate::config::MotionScaling;

/// World extents. Positions wrap around at every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map any position into `[0, width) x [0, height)`.
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height))
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Uniform random point inside the bounds.
    pub fn random_point(&self, rng: &mut fastrand::Rng) -> Vec2 {
        Vec2::new(rng.f32() * self.width, rng.f32() * self.height)
    }
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    let wrapped = v.rem_euclid(extent);
    // rem_euclid of a tiny negative can round up to exactly `extent`.
    if wrapped >= extent || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

fn displacement(step: f32, scaling: MotionScaling) -> f32 {
    match scaling {
        MotionScaling::Quadratic => step * step,
        MotionScaling::Linear => step,
    }
}

/// Step from `pos` toward `target`. Snaps onto the target when it is within
/// `step`, otherwise moves along the bearing.
pub fn move_toward(
    pos: Vec2,
    target: Vec2,
    step: f32,
    bounds: &Bounds,
    scaling: MotionScaling,
) -> Vec2 {
    if distance(pos, target) <= step {
        return bounds.wrap(target);
    }
    let to_target = target - pos;
    let heading = Vec2::from_angle(to_target.y.atan2(to_target.x));
    bounds.wrap(pos + heading * displacement(step, scaling))
}

/// Step from `pos` directly away from `threat`.
pub fn move_away(
    pos: Vec2,
    threat: Vec2,
    step: f32,
    bounds: &Bounds,
    scaling: MotionScaling,
) -> Vec2 {
    let to_threat = threat - pos;
    let heading = Vec2::from_angle(to_threat.y.atan2(to_threat.x));
    bounds.wrap(pos - heading * displacement(step, scaling))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Bounds = Bounds {
        width: 960.0,
        height: 640.0,
    };

    #[test]
    fn wrap_maps_into_bounds() {
        let samples = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(960.0, 640.0),
            Vec2::new(2000.5, -1300.25),
            Vec2::new(-1e-7, 0.0),
            Vec2::new(480.0, 320.0),
        ];
        for p in samples {
            let once = WORLD.wrap(p);
            assert!(WORLD.contains(once), "{p:?} wrapped to {once:?}");
            assert_eq!(WORLD.wrap(once), once);
        }
    }

    #[test]
    fn wrap_crosses_to_opposite_edge() {
        let p = WORLD.wrap(Vec2::new(965.0, -5.0));
        assert!((p.x - 5.0).abs() < 1e-4);
        assert!((p.y - 635.0).abs() < 1e-4);
    }

    #[test]
    fn move_toward_snaps_when_close() {
        let p = move_toward(
            Vec2::new(10.0, 10.0),
            Vec2::new(10.5, 10.0),
            1.0,
            &WORLD,
            MotionScaling::Quadratic,
        );
        assert_eq!(p, Vec2::new(10.5, 10.0));
    }

    #[test]
    fn move_toward_scales_quadratically_by_default() {
        let p = move_toward(
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            3.0,
            &WORLD,
            MotionScaling::Quadratic,
        );
        assert!((p.x - 109.0).abs() < 1e-3);
        assert!((p.y - 100.0).abs() < 1e-3);

        let p = move_toward(
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            3.0,
            &WORLD,
            MotionScaling::Linear,
        );
        assert!((p.x - 103.0).abs() < 1e-3);
    }

    #[test]
    fn move_toward_world_edge_wraps() {
        let p = move_toward(
            Vec2::ZERO,
            Vec2::new(WORLD.width, 0.0),
            35.0,
            &WORLD,
            MotionScaling::Quadratic,
        );
        assert!(WORLD.contains(p));
        assert!((p.x - (35.0 * 35.0 - WORLD.width)).abs() < 1e-2);

        let p = move_toward(
            Vec2::new(959.5, 10.0),
            Vec2::new(1100.0, 10.0),
            1.0,
            &WORLD,
            MotionScaling::Linear,
        );
        assert!(WORLD.contains(p));
        assert!((p.x - 0.5).abs() < 1e-3);
    }

    #[test]
    fn move_away_goes_opposite_direction() {
        let p = move_away(
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 150.0),
            2.0,
            &WORLD,
            MotionScaling::Quadratic,
        );
        assert!((p.x - 100.0).abs() < 1e-3);
        assert!((p.y - 96.0).abs() < 1e-3);
    }

    #[test]
    fn move_away_wraps() {
        let p = move_away(
            Vec2::new(1.0, 300.0),
            Vec2::new(20.0, 300.0),
            2.0,
            &WORLD,
            MotionScaling::Linear,
        );
        assert!((p.x - 959.0).abs() < 1e-3);
    }
}
