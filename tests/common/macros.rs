/// Asserts the world holds exactly the given number of bodies, fixtures and
/// joints.
#[macro_export]
macro_rules! assert_world_counts {
    ($world:expr, $bodies:expr, $fixtures:expr, $joints:expr) => {
        assert_eq!($world.body_count(), $bodies, "Body count mismatch");
        assert_eq!($world.fixture_count(), $fixtures, "Fixture count mismatch");
        assert_eq!($world.joint_count(), $joints, "Joint count mismatch");
    };
}

/// Asserts that only the installed track remains in the simulation world.
#[macro_export]
macro_rules! assert_track_only {
    ($sim:expr) => {
        assert!(!$sim.has_vehicle(), "Vehicle should be absent");
        $crate::assert_world_counts!($sim.world(), 1, 1, 0);
        assert!(
            $sim.world().contains_body($sim.track().body),
            "Track body missing"
        );
    };
}
