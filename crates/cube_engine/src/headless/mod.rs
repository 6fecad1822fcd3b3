//! Headless scene adapter
//!
//! A minimal [`SceneAdapter`] for driving the core without a GPU: tests, the
//! demo binary and benchmarks. It integrates gravity, bounces bodies off an
//! optional floor plane, exchanges velocity between overlapping bodies and
//! reports contact starts, which is enough motion to make collisions happen.
//! It makes no attempt at physical accuracy.

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::config::PhysicsConfig;
use crate::events::{Contact, EventQueue, SceneEvent};
use crate::foundation::math::{Color, Vec3};
use crate::physics::{BoundingSphere, Ray};
use crate::scene::{BodyHandle, ObjectId, RenderableObject, SceneAdapter, SceneError};

/// Vertical speeds below this settle instead of bouncing
const REST_SPEED: f32 = 0.05;

/// Gap above the floor still counted as resting on it
const FLOOR_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone)]
struct Body {
    object: ObjectId,
    position: Vec3,
    velocity: Vec3,
    rotation: Vec3,
    color: Color,
    edge: f32,
    clickable: bool,
    collidable: bool,
    on_floor: bool,
}

impl Body {
    fn sphere(&self) -> BoundingSphere {
        BoundingSphere::enclosing_cube(self.position, self.edge)
    }
}

/// Snapshot of a headless body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    /// Object the body mirrors
    pub object: ObjectId,
    /// Position
    pub position: Vec3,
    /// Rotation last written by the core
    pub rotation: Vec3,
    /// Color last written by the core
    pub color: Color,
    /// Rendered edge length last written by the core
    pub edge: f32,
}

/// In-process stand-in for a rendering/physics engine
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    bodies: SlotMap<BodyHandle, Body>,
    gravity: Vec3,
    floor_height: Option<f32>,
    restitution: f32,
    contacts: HashSet<(BodyHandle, BodyHandle)>,
    picked: Vec<ObjectId>,
}

impl HeadlessScene {
    /// Create an empty scene with the given physics parameters
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity: config.gravity,
            floor_height: config.floor_height,
            restitution: config.restitution,
            contacts: HashSet::new(),
            picked: Vec::new(),
        }
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Inspect a body
    pub fn snapshot(&self, handle: BodyHandle) -> Option<BodySnapshot> {
        self.bodies.get(handle).map(|body| BodySnapshot {
            object: body.object,
            position: body.position,
            rotation: body.rotation,
            color: body.color,
            edge: body.edge,
        })
    }

    /// Move a body (test setup, drag tools)
    pub fn teleport(&mut self, handle: BodyHandle, position: Vec3) -> Result<(), SceneError> {
        self.body_mut(handle)?.position = position;
        Ok(())
    }

    /// Cast a pointer ray and find the nearest clickable body
    ///
    /// A hit is remembered and reported as a `Clicked` event on the next
    /// step, like an engine's pointer callback.
    pub fn pick(&mut self, ray: &Ray) -> Option<ObjectId> {
        let hit = self
            .bodies
            .values()
            .filter(|body| body.clickable)
            .filter_map(|body| body.sphere().intersect_ray(ray).map(|hit| (hit.distance, body.object)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, object)| object);

        if let Some(object) = hit {
            log::debug!("Pointer ray hit {}", object);
            self.picked.push(object);
        }
        hit
    }

    fn body(&self, handle: BodyHandle) -> Result<&Body, SceneError> {
        self.bodies.get(handle).ok_or(SceneError::StaleHandle(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, SceneError> {
        self.bodies.get_mut(handle).ok_or(SceneError::StaleHandle(handle))
    }

    fn integrate(&mut self, dt: f32, events: &mut EventQueue) {
        for body in self.bodies.values_mut() {
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;

            let Some(floor) = self.floor_height else {
                continue;
            };
            let bottom = body.position.y - body.edge * 0.5;
            if bottom <= floor {
                body.position.y = floor + body.edge * 0.5;
                if body.velocity.y < 0.0 {
                    body.velocity.y = -body.velocity.y * self.restitution;
                    if body.velocity.y < REST_SPEED {
                        body.velocity.y = 0.0;
                    }
                }
                if !body.on_floor && body.collidable {
                    events.push(SceneEvent::Collided {
                        id: body.object,
                        other: Contact::Floor,
                    });
                }
                body.on_floor = true;
            } else if bottom > floor + FLOOR_TOLERANCE {
                body.on_floor = false;
            }
        }
    }

    fn detect_contacts(&mut self, events: &mut EventQueue) {
        let handles: Vec<BodyHandle> = self.bodies.keys().collect();
        let mut current = HashSet::new();

        for (i, &a) in handles.iter().enumerate() {
            for &b in &handles[i + 1..] {
                let (sphere_a, sphere_b) = (self.bodies[a].sphere(), self.bodies[b].sphere());
                if !sphere_a.intersects(&sphere_b) {
                    continue;
                }
                let pair = (a.min(b), a.max(b));
                current.insert(pair);
                if self.contacts.contains(&pair) {
                    continue;
                }
                self.exchange_velocity(a, b);
                for (this, that) in [(a, b), (b, a)] {
                    if self.bodies[this].collidable {
                        events.push(SceneEvent::Collided {
                            id: self.bodies[this].object,
                            other: Contact::Object(self.bodies[that].object),
                        });
                    }
                }
            }
        }

        self.contacts = current;
    }

    // Equal-mass elastic exchange along the contact normal
    fn exchange_velocity(&mut self, a: BodyHandle, b: BodyHandle) {
        let offset = self.bodies[b].position - self.bodies[a].position;
        let Some(normal) = offset.try_normalize(f32::EPSILON) else {
            return;
        };
        let approach = (self.bodies[a].velocity - self.bodies[b].velocity).dot(&normal);
        if approach <= 0.0 {
            return;
        }
        let impulse = normal * approach;
        self.bodies[a].velocity -= impulse;
        self.bodies[b].velocity += impulse;
    }
}

impl SceneAdapter for HeadlessScene {
    fn register_object(&mut self, object: &RenderableObject) -> Result<BodyHandle, SceneError> {
        let handle = self.bodies.insert(Body {
            object: object.id(),
            position: object.position,
            velocity: object.velocity,
            rotation: object.rotation,
            color: object.color,
            edge: object.extent(),
            clickable: false,
            collidable: false,
            on_floor: false,
        });
        log::trace!("Registered {} as {:?}", object.id(), handle);
        Ok(handle)
    }

    fn subscribe_collision(&mut self, handle: BodyHandle) -> Result<(), SceneError> {
        self.body_mut(handle)?.collidable = true;
        Ok(())
    }

    fn subscribe_click(&mut self, handle: BodyHandle) -> Result<(), SceneError> {
        self.body_mut(handle)?.clickable = true;
        Ok(())
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<(), SceneError> {
        self.body_mut(handle)?.velocity = velocity;
        Ok(())
    }

    fn read_position(&self, handle: BodyHandle) -> Result<Vec3, SceneError> {
        Ok(self.body(handle)?.position)
    }

    fn read_velocity(&self, handle: BodyHandle) -> Result<Vec3, SceneError> {
        Ok(self.body(handle)?.velocity)
    }

    fn write_transform(
        &mut self,
        handle: BodyHandle,
        object: &RenderableObject,
    ) -> Result<(), SceneError> {
        let body = self.body_mut(handle)?;
        body.rotation = object.rotation;
        body.color = object.color;
        body.edge = object.extent();
        Ok(())
    }

    fn step(&mut self, dt: f32, events: &mut EventQueue) {
        for object in self.picked.drain(..) {
            events.push(SceneEvent::Clicked { id: object });
        }
        if dt > 0.0 {
            self.integrate(dt, events);
        }
        self.detect_contacts(events);
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.contacts.clear();
        self.picked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn still_physics() -> PhysicsConfig {
        PhysicsConfig {
            gravity: Vec3::zeros(),
            floor_height: None,
            ..PhysicsConfig::default()
        }
    }

    fn cube_at(id: u32, position: Vec3) -> RenderableObject {
        RenderableObject::new(ObjectId(id), position, 1.0, Color::WHITE, 1.0)
    }

    fn register(scene: &mut HeadlessScene, object: &RenderableObject) -> BodyHandle {
        let handle = scene.register_object(object).expect("register");
        scene.subscribe_collision(handle).expect("subscribe");
        scene.subscribe_click(handle).expect("subscribe");
        handle
    }

    #[test]
    fn test_gravity_and_floor_contact_reported_once() {
        let mut scene = HeadlessScene::new(&PhysicsConfig::default());
        let handle = register(&mut scene, &cube_at(0, Vec3::new(0.0, 0.0, 0.0)));
        let mut events = EventQueue::new();
        let mut floor_hits = 0;
        for _ in 0..600 {
            scene.step(1.0 / 60.0, &mut events);
            floor_hits += events
                .drain()
                .filter(|e| matches!(e, SceneEvent::Collided { other: Contact::Floor, .. }))
                .count();
        }
        let position = scene.read_position(handle).expect("live");
        assert_relative_eq!(position.y, -0.5, epsilon = 1e-4);
        assert!(floor_hits >= 1);
        assert!(floor_hits < 10, "resting body kept reporting: {floor_hits}");
    }

    #[test]
    fn test_overlap_reported_for_both_bodies_once() {
        let mut scene = HeadlessScene::new(&still_physics());
        register(&mut scene, &cube_at(0, Vec3::zeros()));
        register(&mut scene, &cube_at(1, Vec3::new(0.5, 0.0, 0.0)));
        let mut events = EventQueue::new();

        scene.step(0.0, &mut events);
        let first: Vec<_> = events.drain().collect();
        assert_eq!(first.len(), 2);
        assert!(first.contains(&SceneEvent::Collided {
            id: ObjectId(0),
            other: Contact::Object(ObjectId(1)),
        }));

        scene.step(0.0, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_unsubscribed_body_raises_nothing() {
        let mut scene = HeadlessScene::new(&still_physics());
        scene.register_object(&cube_at(0, Vec3::zeros())).expect("register");
        register(&mut scene, &cube_at(1, Vec3::new(0.5, 0.0, 0.0)));
        let mut events = EventQueue::new();
        scene.step(0.0, &mut events);
        let raised: Vec<_> = events.drain().collect();
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].target(), ObjectId(1));
    }

    #[test]
    fn test_head_on_velocities_exchange() {
        let mut scene = HeadlessScene::new(&still_physics());
        let a = register(&mut scene, &cube_at(0, Vec3::zeros()));
        let b = register(&mut scene, &cube_at(1, Vec3::new(0.9, 0.0, 0.0)));
        scene.set_velocity(a, Vec3::new(1.0, 0.0, 0.0)).expect("live");
        scene.set_velocity(b, Vec3::new(-1.0, 0.0, 0.0)).expect("live");
        scene.step(0.0, &mut EventQueue::new());
        assert_relative_eq!(scene.read_velocity(a).expect("live").x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(scene.read_velocity(b).expect("live").x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pick_nearest_and_queue_click() {
        let mut scene = HeadlessScene::new(&still_physics());
        register(&mut scene, &cube_at(0, Vec3::new(0.0, 0.0, -10.0)));
        register(&mut scene, &cube_at(1, Vec3::new(0.0, 0.0, -5.0)));
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.pick(&ray), Some(ObjectId(1)));

        let mut events = EventQueue::new();
        scene.step(0.0, &mut events);
        assert_eq!(events.drain().next(), Some(SceneEvent::Clicked { id: ObjectId(1) }));
    }

    #[test]
    fn test_pick_ignores_unclickable() {
        let mut scene = HeadlessScene::new(&still_physics());
        scene.register_object(&cube_at(0, Vec3::new(0.0, 0.0, -5.0))).expect("register");
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.pick(&ray), None);
    }

    #[test]
    fn test_stale_handle_after_clear() {
        let mut scene = HeadlessScene::new(&still_physics());
        let handle = register(&mut scene, &cube_at(0, Vec3::zeros()));
        scene.clear();
        assert!(matches!(
            scene.set_velocity(handle, Vec3::zeros()),
            Err(SceneError::StaleHandle(_))
        ));
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_write_transform_updates_edge() {
        let mut scene = HeadlessScene::new(&still_physics());
        let mut object = cube_at(0, Vec3::zeros());
        let handle = register(&mut scene, &object);
        object.scale = 2.0;
        object.rotation = Vec3::new(0.1, 0.2, 0.0);
        scene.write_transform(handle, &object).expect("live");
        let snapshot = scene.snapshot(handle).expect("live");
        assert_eq!(snapshot.edge, 2.0);
        assert_eq!(snapshot.rotation, object.rotation);
    }
}
