//! Physics - movement, collision response, and gravity for one entity.
//!
//! Velocity is integrated one cell per axis per sub-step rather than as a
//! single jump, so `(3, 1)` moves as `(1, 1)`, `(1, 0)`, `(1, 0)`. Diagonals
//! come out slightly biased, which is accepted.
//!
//! At each sub-step the collision index is queried at the prospective
//! footprint. If anything other than the mover is there, both sides'
//! `collide` callbacks run (mover first) and the rest of the tick's motion is
//! dropped, even if one axis was still free.

use log::debug;

use crate::entity::{GameEvent, TickContext};
use crate::types::{Position, Velocity, FALL_OUT_ROW};
use crate::world::World;

/// Unit steps that add up to a velocity.
///
/// # Example
///
/// ```
/// use tui_scroller_core::physics::SubSteps;
/// use tui_scroller_core::types::Velocity;
///
/// let steps: Vec<_> = SubSteps::new(Velocity::new(3, 1)).collect();
/// assert_eq!(
///     steps,
///     vec![Velocity::new(1, 1), Velocity::new(1, 0), Velocity::new(1, 0)]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubSteps {
    remaining: Velocity,
}

impl SubSteps {
    pub fn new(velocity: Velocity) -> Self {
        Self {
            remaining: velocity,
        }
    }

    /// Velocity not yet consumed.
    pub fn remaining(&self) -> Velocity {
        self.remaining
    }
}

impl Iterator for SubSteps {
    type Item = Velocity;

    fn next(&mut self) -> Option<Velocity> {
        if self.remaining.is_zero() {
            return None;
        }
        let step = self.remaining.signum();
        self.remaining = self.remaining - step;
        Some(step)
    }
}

/// Move the entity at `index` along its velocity, resolving collisions.
///
/// Does nothing for entities without a velocity.
pub fn integrate(world: &mut World, index: usize, events: &mut Vec<GameEvent>) {
    let Some(velocity) = world.get(index).and_then(|e| e.velocity()) else {
        return;
    };

    for step in SubSteps::new(velocity) {
        let Some(entity) = world.get(index) else {
            return;
        };
        let next = entity.position().step(step);
        let footprint = entity.footprint_at(next);
        let hits: Vec<usize> = world
            .items_at(&footprint)
            .into_iter()
            .filter(|&i| i != index)
            .collect();

        if hits.is_empty() {
            if let Some(body) = world.get_mut(index).and_then(|e| e.body_mut()) {
                body.position = next;
            }
            continue;
        }

        for other in hits {
            if let Some((mover, obstacle)) = world.pair_mut(index, other) {
                debug!(
                    "{} {} hit {} {} at {}",
                    mover.name(),
                    mover.id(),
                    obstacle.name(),
                    obstacle.id(),
                    next
                );
                mover.collide(obstacle, events);
                obstacle.collide(mover, events);
            }
        }
        break;
    }
}

/// Fall when unsupported; land when resting on something harmless.
pub fn apply_gravity(world: &mut World, index: usize) {
    let Some(entity) = world.get(index) else {
        return;
    };
    let Some(lowest) = lowest_cell(entity.footprint().as_slice()) else {
        return;
    };
    let Some(velocity) = entity.velocity() else {
        return;
    };

    let below = world.items_at(&[lowest.below()]);
    let falling = below.is_empty();
    let landed = !falling
        && velocity.dy < 0
        && !below
            .iter()
            .filter_map(|&i| world.get(i))
            .any(|support| support.kills_on_collision(entity));

    if let Some(body) = world.get_mut(index).and_then(|e| e.body_mut()) {
        if falling {
            body.nudge(-1, 0);
        } else if landed {
            body.set_dy(0);
        }
    }
}

/// First cell on the lowest row of a footprint.
fn lowest_cell(footprint: &[Position]) -> Option<Position> {
    footprint.iter().copied().min_by_key(|p| p.row)
}

/// Remove a mover that has dropped out of the level.
///
/// Returns true when the entity fell out this call.
pub fn check_fall_out(world: &mut World, index: usize, events: &mut Vec<GameEvent>) -> bool {
    let Some(entity) = world.get_mut(index) else {
        return false;
    };
    if !entity.is_movable() || entity.should_be_removed() {
        return false;
    }
    let below_floor = lowest_cell(entity.footprint().as_slice())
        .map(|p| p.row < FALL_OUT_ROW)
        .unwrap_or(false);
    if below_floor {
        debug!("{} {} fell out of the level", entity.name(), entity.id());
        entity.kill();
        events.push(GameEvent::FellOut {
            entity: entity.id(),
        });
    }
    below_floor
}

/// Run one tick for the entity at `index`: move, fall, then advance timers.
pub fn tick_entity(world: &mut World, index: usize, ctx: &mut TickContext<'_>) {
    let (movable, gravity) = match world.get(index) {
        Some(e) => (e.is_movable(), e.experiences_gravity()),
        None => return,
    };

    if movable {
        integrate(world, index, &mut ctx.events);
        if gravity {
            apply_gravity(world, index);
        }
        check_fall_out(world, index, &mut ctx.events);
    }

    if let Some(entity) = world.get_mut(index) {
        entity.advance(ctx);
    }
}
