//! Collision-group filtering and contact event collection.

use std::sync::Mutex;

use rapier2d::prelude::*;

/// Whether fixtures in groups `a` and `b` may touch.
///
/// Equal negative groups never collide; anything else does.
#[must_use]
pub fn groups_collide(a: i32, b: i32) -> bool {
    !(a == b && a < 0)
}

pub(crate) fn encode_group(group: i32) -> u128 {
    u128::from(group as u32)
}

pub(crate) fn decode_group(user_data: u128) -> i32 {
    user_data as u32 as i32
}

/// Contact-pair hook applying [`groups_collide`] to the group stored in each
/// collider's user data.
pub(crate) struct GroupFilter;

impl PhysicsHooks for GroupFilter {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        let group = |handle| {
            context
                .colliders
                .get(handle)
                .map_or(0, |c: &Collider| decode_group(c.user_data))
        };
        if groups_collide(group(context.collider1), group(context.collider2)) {
            Some(SolverFlags::COMPUTE_IMPULSES)
        } else {
            None
        }
    }
}

/// Buffers collision events raised during one pipeline step.
pub(crate) struct ContactCollector {
    events: Mutex<Vec<CollisionEvent>>,
}

impl ContactCollector {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_negative_group_never_collides() {
        assert!(!groups_collide(-2, -2));
        assert!(!groups_collide(-1, -1));
    }

    #[test]
    fn test_other_pairs_collide() {
        assert!(groups_collide(0, 0));
        assert!(groups_collide(-2, 0));
        assert!(groups_collide(-2, -3));
        assert!(groups_collide(4, 4));
    }

    #[test]
    fn test_group_survives_user_data_encoding() {
        for group in [-32768, -2, -1, 0, 1, 7, i32::MAX, i32::MIN] {
            assert_eq!(decode_group(encode_group(group)), group);
        }
    }
}
