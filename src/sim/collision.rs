//! Collision detection and response for a point-mass ball
//!
//! Walls are axis-aligned rectangles and the world is an axis-aligned box, so
//! every response is a reflection of one velocity component plus a push-out
//! along the same axis.

use glam::Vec2;

use super::level::Rect;

/// Axis a collision is resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Result of a wall collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the wall to the ball center
    pub point: Vec2,
    /// Axis of greatest penetration (reflection axis)
    pub axis: Axis,
    /// Ball center after push-out
    pub resolved_pos: Vec2,
}

impl CollisionResult {
    pub fn miss(pos: Vec2) -> Self {
        Self {
            hit: false,
            point: pos,
            axis: Axis::Vertical,
            resolved_pos: pos,
        }
    }
}

/// Check a ball against a wall rectangle.
///
/// The reflection axis is the one with the larger center-to-closest-point
/// offset; ties go vertical. The resolved position puts the ball exactly one
/// radius away from the wall face on that axis. A center that has tunneled
/// inside the rectangle is pushed out through the nearest face that keeps it
/// inside the world.
pub fn ball_rect_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    rect: &Rect,
    world_size: Vec2,
) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let offset = ball_pos - closest;

    if offset.length() >= ball_radius {
        return CollisionResult::miss(ball_pos);
    }

    if offset == Vec2::ZERO {
        return inside_collision(ball_pos, ball_radius, rect, world_size);
    }

    let (axis, resolved_pos) = if offset.x.abs() > offset.y.abs() {
        let side = if ball_pos.x > closest.x { 1.0 } else { -1.0 };
        (
            Axis::Horizontal,
            Vec2::new(closest.x + side * ball_radius, ball_pos.y),
        )
    } else {
        let side = if ball_pos.y > closest.y { 1.0 } else { -1.0 };
        (
            Axis::Vertical,
            Vec2::new(ball_pos.x, closest.y + side * ball_radius),
        )
    };

    CollisionResult {
        hit: true,
        point: closest,
        axis,
        resolved_pos,
    }
}

/// Center inside the rectangle: exit through the nearest usable face
fn inside_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    rect: &Rect,
    world_size: Vec2,
) -> CollisionResult {
    let min = rect.min();
    let max = rect.max();

    // Vertical faces first so they win ties
    let faces = [
        (ball_pos.y - min.y, Axis::Vertical, Vec2::new(ball_pos.x, min.y), -Vec2::Y),
        (max.y - ball_pos.y, Axis::Vertical, Vec2::new(ball_pos.x, max.y), Vec2::Y),
        (ball_pos.x - min.x, Axis::Horizontal, Vec2::new(min.x, ball_pos.y), -Vec2::X),
        (max.x - ball_pos.x, Axis::Horizontal, Vec2::new(max.x, ball_pos.y), Vec2::X),
    ];
    let in_world = |p: Vec2| {
        p.x >= ball_radius
            && p.x <= world_size.x - ball_radius
            && p.y >= ball_radius
            && p.y <= world_size.y - ball_radius
    };

    let mut best: Option<(f32, Axis, Vec2, Vec2)> = None;
    let mut fallback = faces[0];
    for (depth, axis, point, out) in faces {
        if depth < fallback.0 {
            fallback = (depth, axis, point, out);
        }
        let resolved = point + out * ball_radius;
        if in_world(resolved) && best.is_none_or(|b| depth < b.0) {
            best = Some((depth, axis, point, resolved));
        }
    }

    let (axis, point, resolved_pos) = match best {
        Some((_, axis, point, resolved)) => (axis, point, resolved),
        None => {
            let (_, axis, point, out) = fallback;
            (axis, point, point + out * ball_radius)
        }
    };

    CollisionResult {
        hit: true,
        point,
        axis,
        resolved_pos,
    }
}

/// Reflect one velocity component, scaled by `restitution`
#[inline]
pub fn reflect_axis(vel: Vec2, axis: Axis, restitution: f32) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(-vel.x * restitution, vel.y),
        Axis::Vertical => Vec2::new(vel.x, -vel.y * restitution),
    }
}

/// Elastic bounce off the world edges. Returns true if any edge was hit.
pub fn world_bounds_collision(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    world_size: Vec2,
) -> bool {
    let mut hit = false;

    if pos.x < radius {
        pos.x = radius;
        vel.x = -vel.x;
        hit = true;
    }
    if pos.x > world_size.x - radius {
        pos.x = world_size.x - radius;
        vel.x = -vel.x;
        hit = true;
    }
    if pos.y < radius {
        pos.y = radius;
        vel.y = -vel.y;
        hit = true;
    }
    if pos.y > world_size.y - radius {
        pos.y = world_size.y - radius;
        vel.y = -vel.y;
        hit = true;
    }

    hit
}

/// Clamp a ball center into the playable world box
#[inline]
pub fn clamp_to_world(pos: Vec2, radius: f32, world_size: Vec2) -> Vec2 {
    pos.min(world_size - Vec2::splat(radius))
        .max(Vec2::splat(radius))
}

/// Check if a resting ball is close enough to the hole to count
#[inline]
pub fn ball_in_hole(ball_pos: Vec2, hole: Vec2, capture_radius: f32) -> bool {
    ball_pos.distance(hole) < capture_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const R: f32 = 18.0;
    const WORLD: Vec2 = Vec2::new(600.0, 900.0);

    #[test]
    fn test_miss_when_far() {
        let wall = Rect::new(100.0, 400.0, 400.0, 30.0);
        let result = ball_rect_collision(Vec2::new(300.0, 300.0), R, &wall, WORLD);
        assert!(!result.hit);
        assert_eq!(result.resolved_pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_hit_from_above() {
        let wall = Rect::new(100.0, 400.0, 400.0, 30.0);
        let result = ball_rect_collision(Vec2::new(300.0, 390.0), R, &wall, WORLD);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::Vertical);
        assert_eq!(result.point, Vec2::new(300.0, 400.0));
        assert_eq!(result.resolved_pos, Vec2::new(300.0, 382.0));
    }

    #[test]
    fn test_hit_from_side() {
        let wall = Rect::new(290.0, 300.0, 20.0, 300.0);
        let result = ball_rect_collision(Vec2::new(320.0, 450.0), R, &wall, WORLD);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::Horizontal);
        assert_eq!(result.resolved_pos, Vec2::new(328.0, 450.0));
    }

    #[test]
    fn test_corner_tie_goes_vertical() {
        let wall = Rect::new(100.0, 100.0, 50.0, 50.0);
        let result = ball_rect_collision(Vec2::new(90.0, 90.0), R, &wall, WORLD);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::Vertical);
        assert_eq!(result.resolved_pos, Vec2::new(90.0, 82.0));
    }

    #[test]
    fn test_tunneled_center_exits_nearest_face() {
        let wall = Rect::new(100.0, 400.0, 400.0, 30.0);
        let result = ball_rect_collision(Vec2::new(300.0, 425.0), R, &wall, WORLD);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::Vertical);
        assert_eq!(result.resolved_pos, Vec2::new(300.0, 448.0));
    }

    #[test]
    fn test_tunneled_center_stays_in_world() {
        // Wall flush with the right edge: exiting right would leave the world
        let wall = Rect::new(560.0, 600.0, 40.0, 200.0);
        let result = ball_rect_collision(Vec2::new(590.0, 700.0), R, &wall, WORLD);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::Horizontal);
        assert_eq!(result.resolved_pos, Vec2::new(542.0, 700.0));
    }

    #[test]
    fn test_reflect_axis() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(reflect_axis(v, Axis::Horizontal, 1.0), Vec2::new(-3.0, -4.0));
        let r = reflect_axis(v, Axis::Vertical, 1.1);
        assert_eq!(r.x, 3.0);
        assert!((r.y - 4.4).abs() < 1e-5);
    }

    #[test]
    fn test_world_bounds_elastic() {
        let world = Vec2::new(600.0, 900.0);
        let mut pos = Vec2::new(5.0, 895.0);
        let mut vel = Vec2::new(-2.0, 3.0);
        assert!(world_bounds_collision(&mut pos, &mut vel, R, world));
        assert_eq!(pos, Vec2::new(R, 900.0 - R));
        assert_eq!(vel, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_ball_in_hole() {
        let hole = Vec2::new(300.0, 150.0);
        assert!(ball_in_hole(Vec2::new(300.0, 170.0), hole, 25.0));
        assert!(!ball_in_hole(Vec2::new(300.0, 176.0), hole, 25.0));
    }

    proptest! {
        #[test]
        fn prop_no_overlap_after_response(
            bx in 0.0f32..600.0,
            by in 0.0f32..900.0,
            rx in 50.0f32..450.0,
            ry in 50.0f32..750.0,
            w in 5.0f32..200.0,
            h in 5.0f32..200.0,
        ) {
            let wall = Rect::new(rx, ry, w, h);
            let result = ball_rect_collision(Vec2::new(bx, by), R, &wall, WORLD);
            let after = result.resolved_pos;
            let dist = after.distance(wall.closest_point(after));
            prop_assert!(dist >= R - 1e-3, "dist {} after resolving {:?}", dist, result);
        }
    }
}
