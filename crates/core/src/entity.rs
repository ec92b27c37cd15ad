//! Entity model - every object that lives on the level grid.
//!
//! Entities are a tagged variant ([`EntityKind`]) wrapped in an [`Entity`]
//! that carries identity and the removal flag. Behaviour that differs between
//! kinds is exposed through capability predicates (`is_movable`,
//! `experiences_gravity`, `kills_on_collision`, `grants_item`) so collision
//! code never has to switch on concrete kinds.
//!
//! # Footprints
//!
//! An entity's footprint is the ordered list of cells it occupies. It is always
//! computed from the anchor position and the entity's animation counters, never
//! stored. Animation counters only advance in [`Entity::advance`], once per
//! tick, so repeated footprint queries within a tick agree with each other.
//!
//! Most footprints are vertical stacks growing upward from the anchor, one
//! cell per glyph.

use std::fmt;

use arrayvec::ArrayVec;

use crate::item::{InventoryItem, ItemKind};
use crate::rng::SimpleRng;
use crate::scene::SceneBuffer;
use crate::types::{
    Position, Tint, Velocity, CANNON_PERIOD, FIRELINE_SHOT_LIFETIME, REVERSAL_TICKS,
};

/// Largest footprint any entity can have.
pub const MAX_FOOTPRINT: usize = 16;

/// Cells occupied by an entity, lowest anchor first.
pub type Footprint = ArrayVec<Position, MAX_FOOTPRINT>;

const PLAYER_GLYPHS: &str = "MM";
const BOOSTED_PLAYER_GLYPHS: &str = "LL";
const WALKER_GLYPHS: &str = "bb";
const TREE_GLYPHS: &str = "TTT";
const FLAG_GLYPHS: &str = "WINHERE";
const FIRE_GLYPH: char = '🔥';
const FIRELINE_GLYPH: char = 'O';
const FIRELINE_REACH: i32 = 5;
const FIRE_CYCLE: u8 = 20;
const FLAP_CYCLE: u8 = 10;

/// Session-unique entity identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position and velocity of a movable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub position: Position,
    pub velocity: Velocity,
}

impl Body {
    pub fn new(position: Position, velocity: Velocity) -> Self {
        Self { position, velocity }
    }

    /// Set vertical velocity (clamped).
    pub fn set_dy(&mut self, dy: i32) {
        self.velocity.dy = dy;
        self.velocity = self.velocity.clamped();
    }

    /// Set horizontal velocity (clamped).
    pub fn set_dx(&mut self, dx: i32) {
        self.velocity.dx = dx;
        self.velocity = self.velocity.clamped();
    }

    /// Add to the current velocity (clamped).
    pub fn nudge(&mut self, dy: i32, dx: i32) {
        self.velocity = Velocity::new(self.velocity.dy + dy, self.velocity.dx + dx).clamped();
    }
}

/// Something that happened during a tick, reported to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Killed { victim: EntityId, by: EntityId },
    ItemGranted { to: EntityId, item: ItemKind },
    ItemExpired { owner: EntityId, item: ItemKind },
    BrickBroken { brick: EntityId },
    FlagReached { flag: EntityId },
    FellOut { entity: EntityId },
}

/// Per-tick scratch state shared by all entities.
///
/// Spawned entities are collected here and only join the world once the
/// sweep over the current entities is finished.
#[derive(Debug)]
pub struct TickContext<'a> {
    pub rng: &'a mut SimpleRng,
    pub spawned: Vec<EntityKind>,
    pub events: Vec<GameEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(rng: &'a mut SimpleRng) -> Self {
        Self {
            rng,
            spawned: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Player state.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub items: Vec<InventoryItem>,
    pub dead: bool,
    /// Items picked up so far.
    pub collected: u32,
}

impl Player {
    pub fn new(at: Position) -> Self {
        Self {
            body: Body::new(at, Velocity::ZERO),
            items: Vec::new(),
            dead: false,
            collected: 0,
        }
    }

    pub fn has_speed_boost(&self) -> bool {
        self.items.iter().any(|i| i.kind() == ItemKind::SpeedBoost)
    }

    fn boost(&self, normal: i32, boosted: i32) -> i32 {
        if self.has_speed_boost() {
            boosted
        } else {
            normal
        }
    }

    pub fn glyphs(&self) -> &'static str {
        if self.has_speed_boost() {
            BOOSTED_PLAYER_GLYPHS
        } else {
            PLAYER_GLYPHS
        }
    }

    pub fn jump(&mut self) {
        let dy = self.boost(3, 6);
        self.body.nudge(dy, 0);
    }

    pub fn right(&mut self) {
        let dx = self.boost(1, 2);
        self.body.nudge(0, dx);
    }

    pub fn left(&mut self) {
        let dx = self.boost(1, 2);
        self.body.nudge(0, -dx);
    }

    pub fn down(&mut self) {
        let dy = self.boost(2, 4);
        self.body.nudge(-dy, 0);
    }

    pub fn accept_item(&mut self, item: InventoryItem) {
        self.items.push(item);
        self.collected += 1;
    }
}

/// Orientation of a fireline bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirelinePose {
    Vertical,
    /// Bottom-left to top-right.
    Rising,
    /// Bottom-right to top-left.
    Falling,
}

impl FirelinePose {
    pub fn for_counter(counter: u32) -> Self {
        match counter {
            0..=4 | 11..=14 => FirelinePose::Vertical,
            5..=9 => FirelinePose::Rising,
            _ => FirelinePose::Falling,
        }
    }

    /// Horizontal shift per row away from the pivot.
    fn slope(self) -> i32 {
        match self {
            FirelinePose::Vertical => 0,
            FirelinePose::Rising => 1,
            FirelinePose::Falling => -1,
        }
    }
}

/// The concrete kinds of entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Player(Player),
    Brick {
        at: Position,
    },
    /// Breaks after two hits from the player.
    BreakableBrick {
        at: Position,
        hits: u8,
    },
    /// Grants an item to the first mover that touches it.
    Pickup {
        at: Position,
        item: ItemKind,
    },
    /// Ground creature pacing back and forth.
    Walker {
        body: Body,
        since_reversal: u32,
    },
    /// Flying creature pacing back and forth.
    Bird {
        body: Body,
        since_reversal: u32,
        flap: u8,
    },
    Tree {
        at: Position,
    },
    /// Win trigger.
    Flag {
        at: Position,
        triggered: bool,
    },
    /// Periodically launches cannonballs along `dir`.
    Cannon {
        at: Position,
        glyph: char,
        dir: Velocity,
        counter: u32,
    },
    /// Flickering fire, 0 to 2 cells tall.
    Fire {
        at: Position,
        phase: u8,
        height: u8,
    },
    /// Rotating bar of fire pivoting around `at`.
    Fireline {
        at: Position,
        counter: u32,
    },
    Cannonball {
        body: Body,
    },
    Fireball {
        body: Body,
        lifetime: u32,
        immune: Option<EntityId>,
    },
}

impl EntityKind {
    pub fn player(at: Position) -> Self {
        EntityKind::Player(Player::new(at))
    }

    pub fn brick(at: Position) -> Self {
        EntityKind::Brick { at }
    }

    pub fn breakable_brick(at: Position) -> Self {
        EntityKind::BreakableBrick { at, hits: 0 }
    }

    pub fn pickup(at: Position, item: ItemKind) -> Self {
        EntityKind::Pickup { at, item }
    }

    pub fn walker(at: Position) -> Self {
        EntityKind::Walker {
            body: Body::new(at, Velocity::new(0, -1)),
            since_reversal: 0,
        }
    }

    pub fn bird(at: Position) -> Self {
        EntityKind::Bird {
            body: Body::new(at, Velocity::new(0, -1)),
            since_reversal: 0,
            flap: 0,
        }
    }

    pub fn tree(at: Position) -> Self {
        EntityKind::Tree { at }
    }

    pub fn flag(at: Position) -> Self {
        EntityKind::Flag {
            at,
            triggered: false,
        }
    }

    pub fn cannon(at: Position, glyph: char, dir: Velocity) -> Self {
        EntityKind::Cannon {
            at,
            glyph,
            dir,
            counter: 0,
        }
    }

    /// Fire starting at `phase` of its 20-step flicker cycle.
    /// New fire is one cell tall until its first tick, whatever the phase.
    pub fn fire(at: Position, phase: u8) -> Self {
        EntityKind::Fire {
            at,
            phase: phase % FIRE_CYCLE,
            height: 1,
        }
    }

    pub fn fireline(at: Position) -> Self {
        EntityKind::Fireline { at, counter: 0 }
    }

    pub fn cannonball(at: Position, velocity: Velocity) -> Self {
        EntityKind::Cannonball {
            body: Body::new(at, velocity),
        }
    }

    pub fn fireball(
        at: Position,
        velocity: Velocity,
        lifetime: u32,
        immune: Option<EntityId>,
    ) -> Self {
        EntityKind::Fireball {
            body: Body::new(at, velocity),
            lifetime,
            immune,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Player(_) => "player",
            EntityKind::Brick { .. } => "brick",
            EntityKind::BreakableBrick { .. } => "breakable brick",
            EntityKind::Pickup { .. } => "pickup",
            EntityKind::Walker { .. } => "walker",
            EntityKind::Bird { .. } => "bird",
            EntityKind::Tree { .. } => "tree",
            EntityKind::Flag { .. } => "flag",
            EntityKind::Cannon { .. } => "cannon",
            EntityKind::Fire { .. } => "fire",
            EntityKind::Fireline { .. } => "fireline",
            EntityKind::Cannonball { .. } => "cannonball",
            EntityKind::Fireball { .. } => "fireball",
        }
    }
}

fn fire_height(phase: u8) -> u8 {
    if phase > 15 {
        2
    } else if phase > 7 {
        1
    } else {
        0
    }
}

/// Where a fireline throws its fireball for the given counter, if anywhere.
fn fireline_launch(at: Position, counter: u32) -> Option<(Position, Velocity)> {
    match FirelinePose::for_counter(counter) {
        FirelinePose::Vertical => None,
        FirelinePose::Rising => Some((
            at.offset(FIRELINE_REACH, FIRELINE_REACH),
            Velocity::new(1, 2),
        )),
        FirelinePose::Falling => Some((
            at.offset(FIRELINE_REACH, -FIRELINE_REACH),
            Velocity::new(1, -2),
        )),
    }
}

fn vertical_stack(anchor: Position, height: usize) -> Footprint {
    (0..height.min(MAX_FOOTPRINT) as i32)
        .map(|h| anchor.offset(h, 0))
        .collect()
}

/// A live entity: identity, kind, and the removal flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    removed: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            removed: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut EntityKind {
        &mut self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn body(&self) -> Option<&Body> {
        match &self.kind {
            EntityKind::Player(p) => Some(&p.body),
            EntityKind::Walker { body, .. }
            | EntityKind::Bird { body, .. }
            | EntityKind::Cannonball { body }
            | EntityKind::Fireball { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(&mut p.body),
            EntityKind::Walker { body, .. }
            | EntityKind::Bird { body, .. }
            | EntityKind::Cannonball { body }
            | EntityKind::Fireball { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    /// Anchor cell: the lowest cell for stacks, the pivot for firelines.
    pub fn position(&self) -> Position {
        match &self.kind {
            EntityKind::Player(p) => p.body.position,
            EntityKind::Walker { body, .. }
            | EntityKind::Bird { body, .. }
            | EntityKind::Cannonball { body }
            | EntityKind::Fireball { body, .. } => body.position,
            EntityKind::Brick { at }
            | EntityKind::BreakableBrick { at, .. }
            | EntityKind::Pickup { at, .. }
            | EntityKind::Tree { at }
            | EntityKind::Flag { at, .. }
            | EntityKind::Cannon { at, .. }
            | EntityKind::Fire { at, .. }
            | EntityKind::Fireline { at, .. } => *at,
        }
    }

    pub fn velocity(&self) -> Option<Velocity> {
        self.body().map(|b| b.velocity)
    }

    pub fn is_movable(&self) -> bool {
        self.body().is_some()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    /// Ground creatures that fire and fireballs can kill.
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, EntityKind::Walker { .. })
    }

    pub fn experiences_gravity(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Player(_) | EntityKind::Walker { .. } | EntityKind::Cannonball { .. }
        )
    }

    /// Whether touching `self` kills `other`.
    pub fn kills_on_collision(&self, other: &Entity) -> bool {
        match &self.kind {
            EntityKind::Walker { .. }
            | EntityKind::Bird { .. }
            | EntityKind::Tree { .. }
            | EntityKind::Cannonball { .. } => other.is_player(),
            EntityKind::Fire { .. } | EntityKind::Fireline { .. } => {
                other.is_player() || other.is_creature()
            }
            EntityKind::Fireball { immune, .. } => {
                (other.is_player() || other.is_creature()) && *immune != Some(other.id)
            }
            _ => false,
        }
    }

    pub fn grants_item(&self) -> bool {
        matches!(self.kind, EntityKind::Pickup { .. }) && !self.removed
    }

    /// The item this entity hands out, if it still has one.
    pub fn granted_item(&self) -> Option<InventoryItem> {
        match &self.kind {
            EntityKind::Pickup { item, .. } if !self.removed => Some(InventoryItem::new(*item)),
            _ => None,
        }
    }

    pub fn should_be_removed(&self) -> bool {
        self.removed
    }

    pub fn signal_removal(&mut self) {
        self.removed = true;
    }

    /// Flag for removal; the player is additionally marked dead.
    pub fn kill(&mut self) {
        self.removed = true;
        if let EntityKind::Player(p) = &mut self.kind {
            p.dead = true;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.as_player().map(|p| p.dead).unwrap_or(false)
    }

    /// Whether a win trigger has been touched by the player.
    pub fn had_collision(&self) -> bool {
        matches!(self.kind, EntityKind::Flag { triggered: true, .. })
    }

    fn movable_glyphs(&self) -> &'static str {
        match &self.kind {
            EntityKind::Player(p) => p.glyphs(),
            EntityKind::Walker { .. } => WALKER_GLYPHS,
            EntityKind::Bird { flap, .. } => {
                if *flap < FLAP_CYCLE / 2 {
                    "W"
                } else {
                    "w"
                }
            }
            EntityKind::Cannonball { .. } => "O",
            EntityKind::Fireball { .. } => "🔥",
            _ => "",
        }
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint_at(self.position())
    }

    /// Footprint this entity would have with its anchor at `anchor`.
    pub fn footprint_at(&self, anchor: Position) -> Footprint {
        match &self.kind {
            EntityKind::Brick { .. }
            | EntityKind::BreakableBrick { .. }
            | EntityKind::Pickup { .. }
            | EntityKind::Cannon { .. } => vertical_stack(anchor, 1),
            EntityKind::Tree { .. } => vertical_stack(anchor, TREE_GLYPHS.len()),
            EntityKind::Flag { .. } => vertical_stack(anchor, FLAG_GLYPHS.len()),
            EntityKind::Fire { height, .. } => vertical_stack(anchor, *height as usize),
            EntityKind::Fireline { counter, .. } => {
                let slope = FirelinePose::for_counter(*counter).slope();
                (-FIRELINE_REACH..FIRELINE_REACH)
                    .map(|d| anchor.offset(d, d * slope))
                    .collect()
            }
            _ => vertical_stack(anchor, self.movable_glyphs().chars().count()),
        }
    }

    /// React to touching `other`.
    ///
    /// Called once for each side of a collision, mover first.
    pub fn collide(&mut self, other: &Entity, events: &mut Vec<GameEvent>) {
        let kills_other = self.kills_on_collision(other);
        if self.is_movable() {
            self.collide_movable(other, events);
        }

        let id = self.id;
        match &mut self.kind {
            EntityKind::BreakableBrick { hits, .. } if other.is_player() => {
                *hits = hits.saturating_add(1);
                if *hits >= 2 && !self.removed {
                    self.removed = true;
                    events.push(GameEvent::BrickBroken { brick: id });
                }
            }
            EntityKind::Flag { triggered, .. } if other.is_player() => {
                if !*triggered {
                    events.push(GameEvent::FlagReached { flag: id });
                }
                *triggered = true;
            }
            EntityKind::Pickup { .. } if other.is_movable() => {
                self.removed = true;
            }
            EntityKind::Fireball { lifetime, .. } if kills_other => {
                // Linger on screen briefly after a hit.
                *lifetime = 2;
            }
            _ => {}
        }
    }

    fn collide_movable(&mut self, other: &Entity, events: &mut Vec<GameEvent>) {
        if other.kills_on_collision(self) {
            if !self.removed {
                events.push(GameEvent::Killed {
                    victim: self.id,
                    by: other.id,
                });
            }
            self.kill();
        }

        if let Some(item) = other.granted_item() {
            if let EntityKind::Player(p) = &mut self.kind {
                p.accept_item(item);
                events.push(GameEvent::ItemGranted {
                    to: self.id,
                    item: item.kind(),
                });
            }
        }

        // Stop dead against whatever lies along the current velocity.
        let ours = self.footprint();
        let theirs = other.footprint();
        let Some(body) = self.body_mut() else {
            return;
        };
        let v = body.velocity;
        let mut stop_y = false;
        let mut stop_x = false;
        for a in &ours {
            for b in &theirs {
                let dy = b.row - a.row;
                let dx = b.col - a.col;
                if (0 < dy && dy <= v.dy) || (0 > dy && dy >= v.dy) {
                    stop_y = true;
                }
                if (0 < dx && dx <= v.dx) || (0 > dx && dx >= v.dx) {
                    stop_x = true;
                }
            }
        }
        if stop_y {
            body.set_dy(0);
        }
        if stop_x {
            body.set_dx(0);
        }
    }

    /// Per-tick behaviour that runs after movement: animation, timers, spawning.
    pub fn advance(&mut self, ctx: &mut TickContext<'_>) {
        let id = self.id;
        match &mut self.kind {
            EntityKind::Player(p) => {
                for item in p.items.iter_mut() {
                    item.tick();
                }
                for item in p.items.iter().filter(|i| i.should_be_removed()) {
                    ctx.events.push(GameEvent::ItemExpired {
                        owner: id,
                        item: item.kind(),
                    });
                }
                p.items.retain(|i| !i.should_be_removed());
            }
            EntityKind::Walker {
                body,
                since_reversal,
            } => {
                *since_reversal += 1;
                if *since_reversal > REVERSAL_TICKS {
                    *since_reversal = 0;
                    if body.velocity.is_zero() {
                        body.velocity = Velocity::new(0, ctx.rng.next_sign());
                    } else {
                        body.velocity.dx = -body.velocity.dx;
                    }
                }
            }
            EntityKind::Bird {
                body,
                since_reversal,
                flap,
            } => {
                *flap = (*flap + 1) % FLAP_CYCLE;
                *since_reversal += 1;
                if *since_reversal > REVERSAL_TICKS {
                    *since_reversal = 0;
                    body.velocity.dx = -body.velocity.dx;
                }
            }
            EntityKind::Fireball { lifetime, .. } => {
                *lifetime = lifetime.saturating_sub(1);
                if *lifetime == 0 {
                    self.removed = true;
                }
            }
            EntityKind::Cannon { at, dir, counter, .. } => {
                *counter += 1;
                if *counter % CANNON_PERIOD == 0 {
                    let velocity = Velocity::new(dir.dy * 2, dir.dx * 2);
                    ctx.spawned
                        .push(EntityKind::cannonball(at.step(*dir), velocity));
                }
            }
            EntityKind::Fire { phase, height, .. } => {
                *phase = (*phase + 1) % FIRE_CYCLE;
                *height = fire_height(*phase);
            }
            EntityKind::Fireline { at, counter } => {
                *counter += 1;
                if *counter % 10 == 7 {
                    if let Some((launch, velocity)) = fireline_launch(*at, *counter) {
                        ctx.spawned.push(EntityKind::fireball(
                            launch,
                            velocity,
                            FIRELINE_SHOT_LIFETIME,
                            None,
                        ));
                    }
                }
                if *counter == 20 {
                    *counter = 0;
                }
            }
            EntityKind::Brick { .. }
            | EntityKind::BreakableBrick { .. }
            | EntityKind::Pickup { .. }
            | EntityKind::Tree { .. }
            | EntityKind::Flag { .. }
            | EntityKind::Cannonball { .. } => {}
        }
    }

    /// Draw into the scene buffer.
    pub fn render(&self, scene: &mut SceneBuffer) {
        match &self.kind {
            EntityKind::Brick { at } => scene.put(*at, '=', Tint::Terrain),
            EntityKind::BreakableBrick { at, hits } => {
                let glyph = if *hits == 0 { '+' } else { '-' };
                scene.put(*at, glyph, Tint::Terrain);
            }
            EntityKind::Pickup { at, item } => {
                let glyph = match item {
                    ItemKind::SpeedBoost => 'E',
                    ItemKind::FireballShooter => 'W',
                };
                scene.put(*at, glyph, Tint::Pickup);
            }
            EntityKind::Tree { at } => scene.put_vertical(*at, TREE_GLYPHS, Tint::Hazard),
            EntityKind::Flag { at, .. } => scene.put_vertical(*at, FLAG_GLYPHS, Tint::Goal),
            EntityKind::Cannon { at, glyph, .. } => scene.put(*at, *glyph, Tint::Terrain),
            EntityKind::Fire { .. } => {
                for cell in self.footprint() {
                    scene.put(cell, FIRE_GLYPH, Tint::Fire);
                }
            }
            EntityKind::Fireline { .. } => {
                for cell in self.footprint() {
                    scene.put(cell, FIRELINE_GLYPH, Tint::Fire);
                }
            }
            EntityKind::Player(_)
            | EntityKind::Walker { .. }
            | EntityKind::Bird { .. }
            | EntityKind::Cannonball { .. }
            | EntityKind::Fireball { .. } => {
                let tint = match &self.kind {
                    EntityKind::Player(_) => Tint::Player,
                    EntityKind::Fireball { .. } => Tint::Fire,
                    EntityKind::Cannonball { .. } => Tint::Projectile,
                    _ => Tint::Hazard,
                };
                for (cell, glyph) in self.footprint().into_iter().zip(self.movable_glyphs().chars()) {
                    scene.put(cell, glyph, tint);
                }
            }
        }
    }
}
