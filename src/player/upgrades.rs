//! Spending experience on stats from the upgrade overlay.

use bevy::prelude::*;

use super::components::{Energy, Experience, Player, PlayerStats};
use crate::combat::Health;
use crate::core::{Stat, UpgradeRequest};

/// Apply upgrade requests. Denied requests are dropped silently.
pub fn apply_upgrades(
    mut requests: EventReader<UpgradeRequest>,
    mut player_query: Query<(&mut PlayerStats, &mut Experience, &mut Health, &mut Energy), With<Player>>,
) {
    let Ok((mut stats, mut exp, mut health, mut energy)) = player_query.get_single_mut() else {
        requests.clear();
        return;
    };

    for UpgradeRequest(stat) in requests.read() {
        if !stats.upgrade(*stat, &mut exp) {
            debug!("Upgrade of {} denied ({} exp)", stat, exp.0);
            continue;
        }
        debug!("Upgraded {} to {:.1}, {} exp left", stat, stats.stats.get(*stat), exp.0);

        match stat {
            Stat::Health => health.maximum = stats.stats.health,
            Stat::Energy => energy.current = energy.current.min(stats.stats.energy),
            _ => {}
        }
    }
}
