//! Tick driver tying the core to a scene adapter

use crate::config::SceneConfig;
use crate::events::{EventQueue, SceneEvent};
use crate::foundation::rng::SceneRng;
use crate::foundation::time::FrameClock;

use super::adapter::{SceneAdapter, SceneError};
use super::animator::FrameAnimator;
use super::object::ObjectId;
use super::population::{ClickOutcome, PopulationController, SpawnRoll};
use super::response::{CollisionResponsePolicy, RandomWalkResponse};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame number after this tick
    pub frame: u64,
    /// Click events handled
    pub clicks: usize,
    /// Collision events that changed an object
    pub collisions: usize,
    /// Cubes created this tick
    pub spawned: Vec<ObjectId>,
    /// Events dropped (unknown target or collisions disabled)
    pub ignored: usize,
    /// Successful spawn rolls skipped because of `max_objects`
    pub cap_reached: usize,
}

/// A running cube scene
///
/// Each [`CubeScene::tick`]:
/// 1. registers cubes whose registration failed on an earlier tick
/// 2. advances the clock and steps the adapter, which queues callbacks
/// 3. drains the queue, applying click and collision policies
/// 4. mirrors body positions and velocities back from the adapter
/// 5. animates every object and writes the transforms to the adapter
pub struct CubeScene<A: SceneAdapter> {
    config: SceneConfig,
    adapter: A,
    population: PopulationController,
    animator: FrameAnimator,
    response: Box<dyn CollisionResponsePolicy>,
    events: EventQueue,
    clock: FrameClock,
}

impl<A: SceneAdapter> CubeScene<A> {
    /// Validate `config`, then spawn and register the initial cubes
    pub fn build(config: SceneConfig, adapter: A) -> Result<Self, SceneError> {
        config.validate()?;
        let rng = SceneRng::from_option(config.seed);
        log::info!(
            "Building scene: {} cubes, seed {:#x}",
            config.initial_count,
            rng.seed()
        );

        let mut scene = Self {
            population: PopulationController::new(&config, rng),
            animator: FrameAnimator::new(&config.animation),
            response: Box::new(RandomWalkResponse::from_config(&config.collision)),
            events: EventQueue::new(),
            clock: FrameClock::new(),
            adapter,
            config,
        };
        scene.populate()?;
        Ok(scene)
    }

    /// Replace the collision response policy
    pub fn with_response_policy(mut self, policy: Box<dyn CollisionResponsePolicy>) -> Self {
        self.response = policy;
        self
    }

    fn populate(&mut self) -> Result<(), SceneError> {
        for _ in 0..self.config.initial_count {
            let id = self.population.spawn(None).id();
            self.register(id)?;
        }
        Ok(())
    }

    fn register(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let Some(object) = self.population.get(id) else {
            return Ok(());
        };
        let velocity = object.velocity;
        let handle = self.adapter.register_object(object)?;
        if let Some(object) = self.population.get_mut(id) {
            object.body = Some(handle);
        }
        self.adapter.set_velocity(handle, velocity)?;
        self.adapter.subscribe_click(handle)?;
        if self.config.collision.enabled {
            self.adapter.subscribe_collision(handle)?;
        }
        Ok(())
    }

    fn register_unbound(&mut self) -> Result<(), SceneError> {
        let unbound: Vec<ObjectId> = self
            .population
            .iter()
            .filter(|o| o.body.is_none())
            .map(|o| o.id())
            .collect();
        for id in unbound {
            log::debug!("Retrying registration of {}", id);
            self.register(id)?;
        }
        Ok(())
    }

    /// Advance the scene by `dt` seconds
    ///
    /// Every queued event is handled even when one of them fails. The first
    /// adapter error is returned once the tick has finished; a cube whose
    /// registration failed stays in the population without a body and is
    /// registered again at the start of the next tick.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport, SceneError> {
        let mut failure = self.register_unbound().err();

        self.clock.advance(dt);
        self.adapter.step(self.clock.delta_time(), &mut self.events);

        let mut report = TickReport::default();
        let pending: Vec<SceneEvent> = self.events.drain().collect();
        for event in pending {
            if let Err(err) = self.handle_event(event, &mut report) {
                log::warn!("Handling {:?} failed: {}", event, err);
                failure.get_or_insert(err);
            }
        }

        for object in self.population.objects_mut() {
            if let Some(handle) = object.body {
                object.position = self.adapter.read_position(handle)?;
                object.velocity = self.adapter.read_velocity(handle)?;
            }
        }

        self.animator
            .apply(self.population.objects_mut(), self.clock.elapsed_seconds());

        for object in self.population.objects() {
            if let Some(handle) = object.body {
                self.adapter.write_transform(handle, object)?;
            }
        }

        report.frame = self.clock.frame_count();
        if !report.spawned.is_empty() || report.collisions > 0 {
            log::debug!(
                "Frame {}: {} clicks, {} collisions, {} spawned, {} live",
                report.frame,
                report.clicks,
                report.collisions,
                report.spawned.len(),
                self.population.len()
            );
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    fn handle_event(&mut self, event: SceneEvent, report: &mut TickReport) -> Result<(), SceneError> {
        match event {
            SceneEvent::Clicked { id } => {
                let outcome = self.population.on_object_clicked(id);
                report.clicks += 1;
                if outcome.cap_reached() {
                    report.cap_reached += 1;
                }
                if let Some(new_id) = outcome.spawned() {
                    report.spawned.push(new_id);
                    self.register(new_id)?;
                } else if outcome == ClickOutcome::Unknown {
                    report.ignored += 1;
                }
            }
            SceneEvent::Collided { id, other } => {
                if !self.config.collision.enabled {
                    report.ignored += 1;
                    return Ok(());
                }
                let Some(outcome) = self.population.on_collision(id, self.response.as_ref())
                else {
                    report.ignored += 1;
                    return Ok(());
                };
                log::trace!("{} hit {:?}", id, other);
                report.collisions += 1;
                match outcome.spawn {
                    SpawnRoll::Spawned(new_id) => {
                        report.spawned.push(new_id);
                        self.register(new_id)?;
                    }
                    SpawnRoll::CapReached => report.cap_reached += 1,
                    SpawnRoll::NoSpawn => {}
                }
            }
        }
        Ok(())
    }

    /// Queue a click on `id` for the next tick
    ///
    /// For hosts that resolve picking themselves.
    pub fn click(&mut self, id: ObjectId) {
        self.events.push(SceneEvent::Clicked { id });
    }

    /// Queue an arbitrary event for the next tick
    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Destroy every cube and rebuild the initial set
    pub fn reset(&mut self) -> Result<(), SceneError> {
        log::info!("Resetting scene");
        self.population.reset();
        self.adapter.clear();
        self.events.clear();
        self.clock.reset();
        self.populate()
    }

    /// The live cube set
    pub fn population(&self) -> &PopulationController {
        &self.population
    }

    /// The engine adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The engine adapter, mutably
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Active configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Scene clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Seed the scene's randomness started from
    pub fn seed(&self) -> u64 {
        self.population.seed()
    }

    /// Events waiting for the next tick
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
