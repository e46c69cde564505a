//! Axis-aligned rectangle helpers.
//!
//! World space is pixel based with y growing downward (row 0 is the top of
//! the map). Conversion to Bevy's y-up screen space happens only in the
//! render pass.

use bevy::math::Rect;
use bevy::prelude::*;

/// Rectangle from its top-left corner and size.
pub fn rect_from_top_left(top_left: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(top_left, top_left + size)
}

/// Grow (or shrink, with negative amounts) a rectangle around its center.
///
/// `dx`/`dy` are total changes in width/height. Sizes never go negative.
pub fn inflate(rect: Rect, dx: f32, dy: f32) -> Rect {
    let size = (rect.size() + Vec2::new(dx, dy)).max(Vec2::ZERO);
    Rect::from_center_size(rect.center(), size)
}

/// Move a rectangle by an offset.
pub fn translate(rect: Rect, offset: Vec2) -> Rect {
    Rect {
        min: rect.min + offset,
        max: rect.max + offset,
    }
}

/// Strict overlap test; rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// Drawn rectangle plus the (usually smaller) hitbox used against obstacles.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub rect: Rect,
    pub hitbox: Rect,
}

impl Bounds {
    /// Bounds whose hitbox is `rect` inflated by `hitbox_inflate`.
    pub fn new(rect: Rect, hitbox_inflate: Vec2) -> Self {
        Self {
            rect,
            hitbox: inflate(rect, hitbox_inflate.x, hitbox_inflate.y),
        }
    }

    /// Bounds with the hitbox equal to the drawn rectangle.
    pub fn exact(rect: Rect) -> Self {
        Self { rect, hitbox: rect }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Move `bounds` by `direction * distance`, one axis at a time, stopping the
/// hitbox flush against any obstacle it runs into.
///
/// The direction is normalized first, so diagonal movement is not faster.
pub fn move_with_collisions(bounds: &mut Bounds, direction: Vec2, distance: f32, obstacles: &[Rect]) {
    let direction = direction.normalize_or_zero();
    if direction == Vec2::ZERO || distance == 0.0 {
        return;
    }

    let mut hitbox = translate(bounds.hitbox, Vec2::new(direction.x * distance, 0.0));
    for obstacle in obstacles {
        if !overlaps(hitbox, *obstacle) {
            continue;
        }
        let width = hitbox.width();
        if direction.x > 0.0 {
            hitbox.max.x = obstacle.min.x;
            hitbox.min.x = hitbox.max.x - width;
        } else if direction.x < 0.0 {
            hitbox.min.x = obstacle.max.x;
            hitbox.max.x = hitbox.min.x + width;
        }
    }

    hitbox = translate(hitbox, Vec2::new(0.0, direction.y * distance));
    for obstacle in obstacles {
        if !overlaps(hitbox, *obstacle) {
            continue;
        }
        let height = hitbox.height();
        if direction.y > 0.0 {
            hitbox.max.y = obstacle.min.y;
            hitbox.min.y = hitbox.max.y - height;
        } else if direction.y < 0.0 {
            hitbox.min.y = obstacle.max.y;
            hitbox.max.y = hitbox.min.y + height;
        }
    }

    let delta = hitbox.center() - bounds.hitbox.center();
    bounds.hitbox = hitbox;
    bounds.rect = translate(bounds.rect, delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Rect {
        rect_from_top_left(Vec2::new(x, y), Vec2::splat(64.0))
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        assert!(!overlaps(tile(0.0, 0.0), tile(64.0, 0.0)));
        assert!(overlaps(tile(0.0, 0.0), tile(63.0, 0.0)));
    }

    #[test]
    fn inflate_keeps_center() {
        let rect = tile(0.0, 0.0);
        let hitbox = inflate(rect, 0.0, -10.0);
        assert_eq!(hitbox.center(), rect.center());
        assert_eq!(hitbox.height(), 54.0);
        assert_eq!(hitbox.width(), 64.0);
        assert_eq!(inflate(rect, -100.0, 0.0).width(), 0.0);
    }

    #[test]
    fn movement_stops_flush_against_wall() {
        let mut bounds = Bounds::exact(tile(0.0, 0.0));
        let wall = tile(70.0, 0.0);

        move_with_collisions(&mut bounds, Vec2::X, 20.0, &[wall]);

        assert_eq!(bounds.hitbox.max.x, 70.0);
        assert_eq!(bounds.rect.min.x, 6.0);
    }

    #[test]
    fn blocked_axis_does_not_stop_the_other() {
        let mut bounds = Bounds::exact(tile(0.0, 0.0));
        let wall = tile(64.0, -64.0);
        let wall_below = tile(64.0, 0.0);

        move_with_collisions(&mut bounds, Vec2::new(1.0, 1.0), 10.0, &[wall, wall_below]);

        let step = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(bounds.rect.min.x, 0.0);
        assert!((bounds.rect.min.y - step).abs() < 1e-4);
    }

    #[test]
    fn rect_follows_hitbox_offset() {
        let rect = tile(0.0, 0.0);
        let mut bounds = Bounds::new(rect, Vec2::new(-6.0, -26.0));

        move_with_collisions(&mut bounds, Vec2::NEG_Y, 5.0, &[]);

        assert_eq!(bounds.rect.min.y, -5.0);
        assert_eq!(bounds.hitbox.center(), bounds.rect.center());
    }
}
