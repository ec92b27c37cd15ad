//! Inventory items - capabilities the player picks up from the level.

use crate::entity::{Body, EntityId, EntityKind};
use crate::types::{Position, Velocity, SHOT_LIFETIME, SPEED_BOOST_TICKS};

/// What an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Doubles movement and jump strength while it lasts.
    SpeedBoost,
    /// Fires one fireball per player cell on `fire`.
    FireballShooter,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::SpeedBoost => "speed boost",
            ItemKind::FireballShooter => "fireball shooter",
        }
    }
}

/// An item held by the player, with an optional time-to-live in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    kind: ItemKind,
    ttl: Option<u32>,
}

impl InventoryItem {
    /// Fresh item of the given kind with its default lifetime.
    pub fn new(kind: ItemKind) -> Self {
        let ttl = match kind {
            ItemKind::SpeedBoost => Some(SPEED_BOOST_TICKS),
            ItemKind::FireballShooter => None,
        };
        Self { kind, ttl }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    /// Count down one tick of lifetime.
    pub fn tick(&mut self) {
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl = ttl.saturating_sub(1);
        }
    }

    pub fn should_be_removed(&self) -> bool {
        self.ttl == Some(0)
    }

    /// Apply the item's fire effect for `shooter`, pushing anything it
    /// creates onto `spawned`.
    ///
    /// `height` is the number of cells the shooter occupies; one fireball
    /// leaves from each of them.
    pub fn fire(
        &self,
        shooter: EntityId,
        body: &Body,
        height: usize,
        spawned: &mut Vec<EntityKind>,
    ) {
        if self.kind != ItemKind::FireballShooter {
            return;
        }

        let facing = match body.velocity.dx.signum() {
            0 => 1,
            s => s,
        };
        let mut velocity = Velocity::new(body.velocity.dy * 2, body.velocity.dx * 2);
        if velocity.dx == 0 {
            velocity.dx = 1;
        }

        for i in 0..height as i32 {
            let at: Position = body.position.offset(i, facing);
            spawned.push(EntityKind::fireball(at, velocity, SHOT_LIFETIME, Some(shooter)));
        }
    }
}
