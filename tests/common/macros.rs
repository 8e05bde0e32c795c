/// Asserts that a lifeform with the given ID is NOT present in the world (dead/removed).
#[macro_export]
macro_rules! assert_lifeform_dead {
    ($world:expr, $id:expr) => {
        let exists = $world
            .get_all_lifeforms()
            .into_iter()
            .any(|l| l.identity.id == $id);
        assert!(!exists, "Lifeform {} should be dead but was found alive", $id);
    };
}

/// Asserts that the total population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.get_population_count(),
            $count,
            "Population count mismatch"
        );
    };
}

/// Asserts that a lifeform's hunger equals the expected value.
#[macro_export]
macro_rules! assert_hunger_eq {
    ($world:expr, $id:expr, $expected:expr) => {
        let lifeform = $world.get_lifeform($id).expect("Lifeform not found in world");
        assert!(
            (lifeform.vitals.hunger - $expected).abs() < 1e-9,
            "Lifeform {} hunger {} is not {}",
            $id,
            lifeform.vitals.hunger,
            $expected
        );
    };
}
