/// Effects on other lifeforms or plants, produced during the parallel pass and
/// applied sequentially afterwards in lifeform order.
///
/// Indices refer to the tick's sorted lifeform snapshots and plant snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionCommand {
    Damage {
        target_idx: usize,
        attacker_idx: usize,
        amount: f64,
    },
    EatPlant {
        plant_idx: usize,
        eater_idx: usize,
    },
    Reproduce {
        parent_idx: usize,
        partner_idx: usize,
    },
}
