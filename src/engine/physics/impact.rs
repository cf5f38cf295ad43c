use log::trace;
use rapier3d::prelude::*;
use std::sync::Mutex;

/// A collision that just started, seen from a body with a collision listener.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Impact {
    /// The listening body
    pub body: RigidBodyHandle,
    /// The body it ran into, `None` for parentless colliders
    pub other: Option<RigidBodyHandle>,
    /// Relative velocity at the contact point along the contact normal.
    /// Positive when the bodies approach each other.
    pub strength: f32,
}

/// Collects [`Impact`]s while the physics pipeline steps.
///
/// Collision events are reported during contact detection, before the solver
/// has resolved the new contact, so the body velocities read here are still the
/// approaching ones.
#[derive(Default)]
pub struct ImpactCollector {
    impacts: Mutex<Vec<Impact>>,
}

impl ImpactCollector {
    pub fn drain(&mut self) -> Vec<Impact> {
        match self.impacts.get_mut() {
            Ok(impacts) => std::mem::take(impacts),
            Err(poisoned) => std::mem::take(poisoned.into_inner()),
        }
    }

    fn push(&self, impact: Impact) {
        match self.impacts.lock() {
            Ok(mut impacts) => impacts.push(impact),
            Err(poisoned) => poisoned.into_inner().push(impact),
        }
    }
}

impl EventHandler for ImpactCollector {
    fn handle_collision_event(
        &self,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        let CollisionEvent::Started(h1, h2, _) = event else {
            return;
        };
        let Some(pair) = contact_pair else {
            return;
        };
        let Some(strength) = impact_velocity_along_normal(bodies, colliders, pair) else {
            return;
        };

        let body1 = colliders.get(h1).and_then(|c| c.parent());
        let body2 = colliders.get(h2).and_then(|c| c.parent());

        for (listener, body, other) in [(h1, body1, body2), (h2, body2, body1)] {
            let listening = colliders
                .get(listener)
                .is_some_and(|c| c.active_events().contains(ActiveEvents::COLLISION_EVENTS));
            if let (true, Some(body)) = (listening, body) {
                trace!("Impact on {body:?} with strength {strength:.3}");
                self.push(Impact {
                    body,
                    other,
                    strength,
                });
            }
        }
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

/// Relative velocity of the two bodies at the deepest contact point, projected
/// on the contact normal (which points from the pair's first collider to the
/// second).
///
/// Returns `None` if the pair has no contact point.
pub fn impact_velocity_along_normal(
    bodies: &RigidBodySet,
    colliders: &ColliderSet,
    pair: &ContactPair,
) -> Option<f32> {
    let collider1 = colliders.get(pair.collider1)?;
    let collider2 = colliders.get(pair.collider2)?;

    let (manifold, contact) = pair
        .manifolds
        .iter()
        .flat_map(|m| m.points.iter().map(move |p| (m, p)))
        .min_by(|(_, a), (_, b)| a.dist.total_cmp(&b.dist))?;

    let point = collider1.position() * contact.local_p1;
    let normal = manifold.data.normal;

    let velocity_at = |collider: &Collider| {
        collider
            .parent()
            .and_then(|h| bodies.get(h))
            .map(|rb| rb.velocity_at_point(&point))
            .unwrap_or_else(Vector::zeros)
    };

    let relative = velocity_at(collider1) - velocity_at(collider2);
    Some(normal.dot(&relative))
}
