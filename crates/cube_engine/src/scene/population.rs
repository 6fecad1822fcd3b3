//! Ownership and growth of the live cube set

use crate::config::{ClickAction, ClickConfig, SceneConfig, SpawnConfig};
use crate::foundation::math::Vec3;
use crate::foundation::rng::SceneRng;

use super::object::{ObjectId, RenderableObject, VisualState};
use super::response::CollisionResponsePolicy;

/// Result of a click on an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new cube was added
    Spawned(ObjectId),
    /// The clicked cube got a new color
    Recolored,
    /// The clicked cube got a new color and a new cube was added
    SpawnedAndRecolored(ObjectId),
    /// The spawn roll failed
    NoSpawn,
    /// The spawn roll succeeded but the population is capped
    CapReached,
    /// The clicked cube got a new color; its spawn was blocked by the cap
    RecoloredCapReached,
    /// No live object has that id
    Unknown,
}

impl ClickOutcome {
    /// Id of the spawned cube, if any
    pub fn spawned(&self) -> Option<ObjectId> {
        match *self {
            Self::Spawned(id) | Self::SpawnedAndRecolored(id) => Some(id),
            _ => None,
        }
    }

    /// Whether a spawn was skipped because of `max_objects`
    pub fn cap_reached(&self) -> bool {
        matches!(self, Self::CapReached | Self::RecoloredCapReached)
    }
}

/// Result of one spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRoll {
    /// A new cube was added
    Spawned(ObjectId),
    /// The roll failed
    NoSpawn,
    /// The roll succeeded but the population is capped
    CapReached,
}

impl SpawnRoll {
    /// Id of the spawned cube, if any
    pub fn spawned(&self) -> Option<ObjectId> {
        match *self {
            Self::Spawned(id) => Some(id),
            _ => None,
        }
    }
}

/// Result of a collision on a live object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// Color and base scale now carried by the object
    pub visual: VisualState,
    /// Spawn-on-collision roll
    pub spawn: SpawnRoll,
}

/// Scale summary over the live set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    /// Number of live cubes
    pub count: usize,
    /// Smallest rendered scale
    pub min_scale: f32,
    /// Largest rendered scale
    pub max_scale: f32,
    /// Mean rendered scale
    pub mean_scale: f32,
}

/// Exclusive owner of the live cube set
///
/// Objects are only ever appended; [`PopulationController::reset`] is the
/// single removal path. Ids increase monotonically and survive resets, so an
/// id is never handed out twice in a session. Because of that the backing
/// `Vec` is always sorted by id.
#[derive(Debug, Clone)]
pub struct PopulationController {
    objects: Vec<RenderableObject>,
    next_id: u32,
    spawn: SpawnConfig,
    click: ClickConfig,
    collision_spawn_probability: f32,
    spin_range: (f32, f32),
    max_objects: Option<usize>,
    rng: SceneRng,
}

impl PopulationController {
    /// Create an empty population
    pub fn new(config: &SceneConfig, rng: SceneRng) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
            spawn: config.spawn.clone(),
            click: config.click.clone(),
            collision_spawn_probability: config.collision.spawn_probability,
            spin_range: config.animation.spin_range,
            max_objects: config.max_objects,
            rng,
        }
    }

    /// Create a cube and append it to the live set
    ///
    /// `origin` places the cube there (clamped into the spawn volume);
    /// `None` samples a uniform position in the volume. Size, color, spin and
    /// initial velocity are always randomized.
    pub fn spawn(&mut self, origin: Option<Vec3>) -> &RenderableObject {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let volume = self.spawn.volume;
        let position = match origin {
            Some(point) => volume.clamp_point(&point),
            None => self.rng.point_in(&volume),
        };
        let (size_lo, size_hi) = self.spawn.size_range;
        let size = self.rng.range(size_lo, size_hi).max(f32::EPSILON);
        let color = self.rng.color();
        let spin = self.rng.range(self.spin_range.0, self.spin_range.1);
        let velocity = self.rng.symmetric_vec(self.spawn.initial_speed * 0.5);

        let mut object = RenderableObject::new(id, position, size, color, spin);
        object.velocity = velocity;
        log::debug!(
            "Spawned {} at ({:.2}, {:.2}, {:.2}) size {:.2}",
            id,
            position.x,
            position.y,
            position.z,
            size
        );

        self.objects.push(object);
        &self.objects[self.objects.len() - 1]
    }

    /// React to a click on `id` according to the click policy
    pub fn on_object_clicked(&mut self, id: ObjectId) -> ClickOutcome {
        let Some(index) = self.index_of(id) else {
            log::warn!("Click on unknown {}", id);
            return ClickOutcome::Unknown;
        };

        let outcome = match self.click.action {
            ClickAction::Spawn => match self.roll_spawn(self.click.spawn_probability) {
                SpawnRoll::Spawned(new_id) => ClickOutcome::Spawned(new_id),
                SpawnRoll::NoSpawn => ClickOutcome::NoSpawn,
                SpawnRoll::CapReached => ClickOutcome::CapReached,
            },
            ClickAction::Recolor => {
                self.objects[index].color = self.rng.color();
                ClickOutcome::Recolored
            }
            ClickAction::SpawnAndRecolor => {
                self.objects[index].color = self.rng.color();
                match self.roll_spawn(self.click.spawn_probability) {
                    SpawnRoll::Spawned(new_id) => ClickOutcome::SpawnedAndRecolored(new_id),
                    SpawnRoll::NoSpawn => ClickOutcome::Recolored,
                    SpawnRoll::CapReached => ClickOutcome::RecoloredCapReached,
                }
            }
        };
        log::debug!("Click on {} -> {:?}", id, outcome);
        outcome
    }

    fn roll_spawn(&mut self, probability: f32) -> SpawnRoll {
        if !self.rng.chance(probability) {
            return SpawnRoll::NoSpawn;
        }
        if self.max_objects.is_some_and(|max| self.objects.len() >= max) {
            log::info!("Population cap {:?} reached; spawn skipped", self.max_objects);
            return SpawnRoll::CapReached;
        }
        SpawnRoll::Spawned(self.spawn(None).id())
    }

    /// Apply a collision response to `id`, then roll the collision spawn
    ///
    /// Returns `None` for an unknown id. A zero collision spawn probability
    /// spends no random draw on the spawn roll.
    pub fn on_collision(
        &mut self,
        id: ObjectId,
        policy: &dyn CollisionResponsePolicy,
    ) -> Option<CollisionOutcome> {
        let Some(index) = self.index_of(id) else {
            log::warn!("Collision on unknown {}", id);
            return None;
        };
        let visual = policy.respond(&self.objects[index], &mut self.rng);
        self.objects[index].apply_visual(visual);
        log::trace!("{} collided -> {} scale {:.3}", id, visual.color.to_hex(), visual.scale);

        let spawn = self.roll_spawn(self.collision_spawn_probability);
        if let SpawnRoll::Spawned(new_id) = spawn {
            log::debug!("Collision on {} spawned {}", id, new_id);
        }
        Some(CollisionOutcome { visual, spawn })
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.binary_search_by_key(&id, RenderableObject::id).ok()
    }

    /// Look up a live object
    pub fn get(&self, id: ObjectId) -> Option<&RenderableObject> {
        let index = self.index_of(id)?;
        Some(&self.objects[index])
    }

    /// Look up a live object mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut RenderableObject> {
        let index = self.index_of(id)?;
        Some(&mut self.objects[index])
    }

    /// Iterate over the live set
    pub fn iter(&self) -> impl Iterator<Item = &RenderableObject> {
        self.objects.iter()
    }

    /// The live set as a slice
    pub fn objects(&self) -> &[RenderableObject] {
        &self.objects
    }

    /// The live set as a mutable slice (ids and sizes stay read-only)
    pub fn objects_mut(&mut self) -> &mut [RenderableObject] {
        &mut self.objects
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object; ids keep counting up
    pub fn reset(&mut self) {
        log::info!("Population reset ({} objects removed)", self.objects.len());
        self.objects.clear();
    }

    /// Seed of the population's random source
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Scale summary, `None` when empty
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> Option<PopulationStats> {
        if self.objects.is_empty() {
            return None;
        }
        let (min_scale, max_scale, sum) = self.objects.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0_f32),
            |(lo, hi, sum), o| (lo.min(o.scale()), hi.max(o.scale()), sum + o.scale()),
        );
        Some(PopulationStats {
            count: self.objects.len(),
            min_scale,
            max_scale,
            mean_scale: sum / self.objects.len() as f32,
        })
    }
}
