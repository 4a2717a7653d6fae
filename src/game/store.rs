//! Entity Store
//!
//! Owns every live entity collection. Each kind lives in an [`EntityPool`]
//! addressed by stable [`EntityId`] handles. Removal during a tick only marks
//! the slot dead; [`EntityStore::compact`] drops dead slots once the tick's
//! passes are done, so no pass ever iterates a collection that shrinks
//! underneath it.

use glam::Vec3;

use crate::game::entities::{Boss, Enemy, EntityId, EntityKind, Explosion, Laser, LaserOwner, Player};
use crate::game::events::RenderEvent;

#[derive(Debug, Clone)]
struct Slot<T> {
    id: EntityId,
    alive: bool,
    value: T,
}

/// Arena-style collection for one entity kind.
///
/// Iteration yields live entities in insertion order.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn insert(&mut self, id: EntityId, value: T) {
        self.slots.push(Slot {
            id,
            alive: true,
            value,
        });
    }

    fn slot_index(&self, id: EntityId) -> Option<usize> {
        // Ids are handed out in increasing order and slots keep insertion order
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }

    /// Look up a live entity.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot_index(id)
            .map(|i| &self.slots[i])
            .filter(|slot| slot.alive)
            .map(|slot| &slot.value)
    }

    /// Mutable lookup of a live entity.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let index = self.slot_index(id)?;
        let slot = &mut self.slots[index];
        slot.alive.then_some(&mut slot.value)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Mark an entity dead. Returns the value snapshot the first time only.
    fn kill(&mut self, id: EntityId) -> Option<&T> {
        let index = self.slot_index(id)?;
        let slot = &mut self.slots[index];
        if !slot.alive {
            return None;
        }
        slot.alive = false;
        Some(&slot.value)
    }

    /// Live entities with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .filter(|slot| slot.alive)
            .map(|slot| (slot.id, &slot.value))
    }

    /// Mutable iteration over live entities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.alive)
            .map(|slot| (slot.id, &mut slot.value))
    }

    /// Handles of live entities, snapshotted so the caller may mutate the pool.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop dead slots.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| slot.alive);
    }

    fn drain_live_ids(&mut self) -> Vec<EntityId> {
        let ids = self.ids();
        self.slots.clear();
        ids
    }
}

/// All live entities of a session, plus the render notifications they produced.
#[derive(Debug, Clone)]
pub struct EntityStore {
    next_id: u64,
    player_id: EntityId,
    player: Player,
    pub(crate) enemies: EntityPool<Enemy>,
    pub(crate) player_lasers: EntityPool<Laser>,
    pub(crate) enemy_lasers: EntityPool<Laser>,
    pub(crate) explosions: EntityPool<Explosion>,
    boss: Option<(EntityId, Boss)>,
    render_events: Vec<RenderEvent>,
}

impl EntityStore {
    /// Create a store holding only the player craft at `player_position`.
    pub fn new(player_position: Vec3) -> Self {
        let mut store = Self {
            next_id: 0,
            player_id: EntityId(0),
            player: Player::new(player_position),
            enemies: EntityPool::new(),
            player_lasers: EntityPool::new(),
            enemy_lasers: EntityPool::new(),
            explosions: EntityPool::new(),
            boss: None,
            render_events: Vec::new(),
        };
        store.player_id = store.allocate_id();
        store.push_spawned(store.player_id, EntityKind::Player, player_position);
        store
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_spawned(&mut self, id: EntityId, kind: EntityKind, position: Vec3) {
        tracing::trace!(%id, ?kind, ?position, "entity spawned");
        self.render_events.push(RenderEvent::Spawned { id, kind, position });
    }

    fn push_despawned(&mut self, id: EntityId, kind: EntityKind) {
        tracing::trace!(%id, ?kind, "entity removed");
        self.render_events.push(RenderEvent::Despawned { id, kind });
    }

    // ------------------------------------------------------------------
    // Player
    // ------------------------------------------------------------------

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    // ------------------------------------------------------------------
    // Add primitives
    // ------------------------------------------------------------------

    pub fn add_enemy(&mut self, enemy: Enemy) -> EntityId {
        let id = self.allocate_id();
        self.push_spawned(id, EntityKind::Enemy, enemy.position);
        self.enemies.insert(id, enemy);
        id
    }

    /// Add a laser to the pool matching its owner.
    pub fn add_laser(&mut self, laser: Laser) -> EntityId {
        let id = self.allocate_id();
        self.push_spawned(id, laser.owner.entity_kind(), laser.position);
        match laser.owner {
            LaserOwner::Player => self.player_lasers.insert(id, laser),
            LaserOwner::Enemy => self.enemy_lasers.insert(id, laser),
        }
        id
    }

    pub fn add_explosion(&mut self, explosion: Explosion) -> EntityId {
        let id = self.allocate_id();
        self.push_spawned(id, EntityKind::Explosion, explosion.origin);
        self.explosions.insert(id, explosion);
        id
    }

    /// Install the boss. Refuses (returns `None`) while one already exists.
    pub fn add_boss(&mut self, boss: Boss) -> Option<EntityId> {
        if self.boss.is_some() {
            return None;
        }
        let id = self.allocate_id();
        self.push_spawned(id, EntityKind::Boss, boss.position);
        self.boss = Some((id, boss));
        Some(id)
    }

    // ------------------------------------------------------------------
    // Remove primitives
    //
    // Each returns the removed record the first time and `None` if the
    // entity was already gone, so a second hit on the same entity within a
    // frame is a no-op.
    // ------------------------------------------------------------------

    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let enemy = *self.enemies.kill(id)?;
        self.push_despawned(id, EntityKind::Enemy);
        Some(enemy)
    }

    pub fn remove_player_laser(&mut self, id: EntityId) -> Option<Laser> {
        let laser = *self.player_lasers.kill(id)?;
        self.push_despawned(id, EntityKind::PlayerLaser);
        Some(laser)
    }

    pub fn remove_enemy_laser(&mut self, id: EntityId) -> Option<Laser> {
        let laser = *self.enemy_lasers.kill(id)?;
        self.push_despawned(id, EntityKind::EnemyLaser);
        Some(laser)
    }

    pub fn remove_explosion(&mut self, id: EntityId) -> bool {
        if self.explosions.kill(id).is_none() {
            return false;
        }
        self.push_despawned(id, EntityKind::Explosion);
        true
    }

    pub fn remove_boss(&mut self) -> Option<Boss> {
        let (id, boss) = self.boss.take()?;
        self.push_despawned(id, EntityKind::Boss);
        Some(boss)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn enemies(&self) -> &EntityPool<Enemy> {
        &self.enemies
    }

    pub fn player_lasers(&self) -> &EntityPool<Laser> {
        &self.player_lasers
    }

    pub fn enemy_lasers(&self) -> &EntityPool<Laser> {
        &self.enemy_lasers
    }

    pub fn explosions(&self) -> &EntityPool<Explosion> {
        &self.explosions
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref().map(|(_, boss)| boss)
    }

    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut().map(|(_, boss)| boss)
    }

    pub fn boss_id(&self) -> Option<EntityId> {
        self.boss.as_ref().map(|(id, _)| *id)
    }

    pub fn has_boss(&self) -> bool {
        self.boss.is_some()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Drop entities marked dead during this tick.
    pub fn compact(&mut self) {
        self.enemies.compact();
        self.player_lasers.compact();
        self.enemy_lasers.compact();
        self.explosions.compact();
    }

    /// Remove every enemy, laser, explosion and the boss, and move the
    /// player back to `player_position`. The player keeps its handle.
    pub fn clear(&mut self, player_position: Vec3) {
        for id in self.enemies.drain_live_ids() {
            self.push_despawned(id, EntityKind::Enemy);
        }
        for id in self.player_lasers.drain_live_ids() {
            self.push_despawned(id, EntityKind::PlayerLaser);
        }
        for id in self.enemy_lasers.drain_live_ids() {
            self.push_despawned(id, EntityKind::EnemyLaser);
        }
        for id in self.explosions.drain_live_ids() {
            self.push_despawned(id, EntityKind::Explosion);
        }
        self.remove_boss();
        self.player = Player::new(player_position);
    }

    /// Take the render notifications accumulated since the last drain.
    pub fn drain_render_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.render_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EntityStore {
        EntityStore::new(Vec3::new(0.0, -3.0, 0.0))
    }

    #[test]
    fn test_new_store_has_only_player() {
        let mut store = store();
        assert!(store.enemies().is_empty());
        assert!(store.boss().is_none());
        let events = store.drain_render_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            RenderEvent::Spawned { kind: EntityKind::Player, .. }
        ));
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut store = store();
        let a = store.add_enemy(Enemy::new(Vec3::ZERO, 1.0));
        let b = store.add_enemy(Enemy::new(Vec3::ONE, 1.0));
        assert_ne!(a, b);

        store.remove_enemy(a);
        store.compact();
        assert_eq!(store.enemies().get(b).unwrap().position, Vec3::ONE);
        assert!(store.enemies().get(a).is_none());
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut store = store();
        let id = store.add_enemy(Enemy::new(Vec3::ZERO, 1.0));
        store.drain_render_events();

        assert!(store.remove_enemy(id).is_some());
        assert!(store.remove_enemy(id).is_none());
        assert_eq!(store.drain_render_events().len(), 1);
    }

    #[test]
    fn test_removed_entity_hidden_before_compact() {
        let mut store = store();
        let id = store.add_laser(Laser::player(Vec3::ZERO, 20.0));
        store.remove_player_laser(id);

        assert_eq!(store.player_lasers().len(), 0);
        assert_eq!(store.player_lasers().iter().count(), 0);
        assert!(!store.player_lasers().is_alive(id));
    }

    #[test]
    fn test_lasers_routed_by_owner() {
        let mut store = store();
        store.add_laser(Laser::player(Vec3::ZERO, 20.0));
        store.add_laser(Laser::enemy(Vec3::ZERO, 15.0));
        store.add_laser(Laser::enemy(Vec3::ZERO, 15.0));
        assert_eq!(store.player_lasers().len(), 1);
        assert_eq!(store.enemy_lasers().len(), 2);
    }

    #[test]
    fn test_single_boss() {
        let mut store = store();
        assert!(store.add_boss(Boss::new(Vec3::ZERO, 10)).is_some());
        assert!(store.add_boss(Boss::new(Vec3::ZERO, 10)).is_none());
        assert!(store.remove_boss().is_some());
        assert!(store.remove_boss().is_none());
    }

    #[test]
    fn test_clear_resets_everything_but_player() {
        let mut store = store();
        let player_id = store.player_id();
        store.add_enemy(Enemy::new(Vec3::ZERO, 1.0));
        store.add_laser(Laser::player(Vec3::ZERO, 20.0));
        store.add_laser(Laser::enemy(Vec3::ZERO, 15.0));
        store.add_boss(Boss::new(Vec3::ZERO, 10));
        store.player_mut().position.x = 5.0;
        store.drain_render_events();

        store.clear(Vec3::new(0.0, -3.0, 0.0));

        assert!(store.enemies().is_empty());
        assert!(store.player_lasers().is_empty());
        assert!(store.enemy_lasers().is_empty());
        assert!(!store.has_boss());
        assert_eq!(store.player().position.x, 0.0);
        assert_eq!(store.player_id(), player_id);
        assert_eq!(store.drain_render_events().len(), 4);
    }

    #[test]
    fn test_mutation_through_handle() {
        let mut store = store();
        let id = store.add_enemy(Enemy::new(Vec3::ZERO, 1.0));
        store.enemies.get_mut(id).unwrap().position.y = 4.0;
        assert_eq!(store.enemies().get(id).unwrap().position.y, 4.0);
    }
}
