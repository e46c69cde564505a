//! Combat-related components.

use bevy::prelude::*;
use std::time::Duration;

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current -= amount;
    }

    /// Add health, never going above the maximum.
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.maximum);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Timed invulnerability after taking a hit.
///
/// `vulnerable == false` always comes with a running hurt timer; it only
/// flips back once `duration` has elapsed since `hurt_time`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Invulnerability {
    pub vulnerable: bool,
    pub hurt_time: Duration,
    pub duration: Duration,
}

impl Invulnerability {
    pub fn new(duration: Duration) -> Self {
        Self {
            vulnerable: true,
            hurt_time: Duration::ZERO,
            duration,
        }
    }

    /// Register a hit at `now`. Returns false (and changes nothing) while
    /// already invulnerable.
    pub fn try_hit(&mut self, now: Duration) -> bool {
        if !self.vulnerable {
            return false;
        }
        self.vulnerable = false;
        self.hurt_time = now;
        true
    }

    /// Become vulnerable again once the window has passed.
    pub fn refresh(&mut self, now: Duration) {
        if !self.vulnerable && now.saturating_sub(self.hurt_time) >= self.duration {
            self.vulnerable = true;
        }
    }
}

/// The single live melee hitbox, if any.
#[derive(Resource, Debug, Default)]
pub struct CurrentAttack(pub Option<Entity>);

/// Melee hitbox spawned in front of the player.
#[derive(Component, Debug)]
pub struct WeaponAttack;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invulnerable_hits_are_ignored() {
        let mut window = Invulnerability::new(Duration::from_millis(500));

        assert!(window.try_hit(Duration::from_millis(1000)));
        assert!(!window.vulnerable);
        assert!(!window.try_hit(Duration::from_millis(1100)));
        assert_eq!(window.hurt_time, Duration::from_millis(1000));
    }

    #[test]
    fn vulnerable_again_exactly_at_duration() {
        let mut window = Invulnerability::new(Duration::from_millis(500));
        window.try_hit(Duration::from_millis(1000));

        window.refresh(Duration::from_millis(1499));
        assert!(!window.vulnerable);

        window.refresh(Duration::from_millis(1500));
        assert!(window.vulnerable);
    }

    #[test]
    fn heal_clamps_to_maximum() {
        let mut health = Health::new(100.0);
        health.current = 90.0;
        health.heal(50.0);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn overkill_is_dead() {
        let mut health = Health::new(100.0);
        health.take_damage(130.0);
        assert!(health.is_dead());
        assert_eq!(health.current, -30.0);
    }
}
