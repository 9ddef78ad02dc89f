//! Collision categories and how orb contacts are read.

use orb_engine::{CollisionFilter, CollisionPair, EntityId};

pub const SURFACE: u32 = 1 << 0;
pub const ORB: u32 = 1 << 1;
pub const TARGET: u32 = 1 << 2;
pub const BARRIER: u32 = 1 << 3;
/// Screen walls. Bounce the orb, never report.
pub const EDGE: u32 = 1 << 4;

/// Bounces off barriers and walls. Passes through the ground but reports touching it.
pub fn orb_filter() -> CollisionFilter {
    CollisionFilter::new(ORB)
        .with_collides_with(TARGET | BARRIER | EDGE)
        .with_contacts(SURFACE)
}

pub fn surface_filter() -> CollisionFilter {
    CollisionFilter::new(SURFACE)
}

pub fn edge_filter() -> CollisionFilter {
    CollisionFilter::new(EDGE)
}

pub fn target_filter() -> CollisionFilter {
    CollisionFilter::new(TARGET)
        .with_collides_with(TARGET)
        .with_contacts(ORB)
}

/// Barriers are kinematic, so listing ORB here only lets the orb bounce off them.
pub fn barrier_filter() -> CollisionFilter {
    CollisionFilter::new(BARRIER)
        .with_collides_with(BARRIER | ORB)
        .with_contacts(ORB)
}

/// An orb contact that matters to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbContact {
    Landed,
    TargetHit { target: EntityId },
    BarrierTouched { barrier: EntityId },
}

/// Read a contact-begin event from `orb`'s point of view.
///
/// Returns `None` for contact-end events, pairs `orb` is not part of, and
/// categories the round does not care about.
pub fn classify(pair: &CollisionPair, orb: EntityId) -> Option<OrbContact> {
    if !pair.started {
        return None;
    }
    let other = pair.other(orb)?;
    let category = if pair.entity_a == orb {
        pair.category_b
    } else {
        pair.category_a
    };
    match category {
        SURFACE => Some(OrbContact::Landed),
        TARGET => Some(OrbContact::TargetHit { target: other }),
        BARRIER => Some(OrbContact::BarrierTouched { barrier: other }),
        _ => None,
    }
}
