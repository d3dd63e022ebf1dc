/// Solar System: interactive 3D orrery with a follow camera.
///
/// Owns the whole application state. Input arrives one event at a time
/// through `handle_input`; `update` advances orbits, chases the tracked body
/// and mirrors the registry into scene entities.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{BodyId, BodyKind, BodyRegistry, SUN};
use crate::follow::{CameraFollow, FollowConfig};
use crate::info::InfoCatalog;
use crate::selection;
use crate::speed::{SpeedLimits, DEFAULT_GLOBAL_MULTIPLIER};

const BUILTIN_MANIFEST: &str = include_str!("../assets/manifest.json");

// ── Camera ───────────────────────────────────────────────────────────

const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 80.0, 180.0);
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 1.0;
const CAMERA_FAR: f32 = 5000.0;

/// Pointer travel (CSS px) after which a press counts as a drag, not a click.
const CLICK_DRAG_THRESHOLD: f32 = 5.0;

// ── Orbit paths ──────────────────────────────────────────────────────

const ORBIT_PATH_COLOR: Color = Color::new(0.667, 0.667, 0.667);
const ORBIT_PATH_OPACITY: f32 = 0.3;

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_TOGGLE_PAUSE: u32 = 1;
const CUSTOM_RESET: u32 = 2;
/// a = steps (+1 faster, -1 slower)
const CUSTOM_STEP_GLOBAL: u32 = 3;
/// a = body index, b = steps
const CUSTOM_STEP_BODY: u32 = 4;
/// a = multiplier
const CUSTOM_SET_GLOBAL: u32 = 5;
/// a = body index, b = speed
const CUSTOM_SET_BODY: u32 = 6;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = tracked body index, b = 1 while following
pub const EVENT_TRACKING: f32 = 1.0;
/// a = body index
pub const EVENT_SHOW_INFO: f32 = 2.0;
pub const EVENT_HIDE_INFO: f32 = 3.0;
/// a = hovered body index, or -1 to hide the tooltip
pub const EVENT_HOVER: f32 = 4.0;
/// a = 1 while paused
pub const EVENT_PAUSE: f32 = 5.0;
/// a = global multiplier
pub const EVENT_GLOBAL_SPEED: f32 = 6.0;
/// a = body index, b = speed
pub const EVENT_BODY_SPEED: f32 = 7.0;
/// a = body index or -1 for the multiplier, b = value to display again
pub const EVENT_SPEED_REJECTED: f32 = 8.0;

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

pub struct SolarSystem {
    bodies: BodyRegistry,
    follow: CameraFollow,
    controls: OrbitControls,
    limits: SpeedLimits,
    info: InfoCatalog,
    global_speed: f32,
    paused: bool,
    hovered: Option<BodyId>,
    orbit_paths: Vec<EntityId>,

    // Click vs drag
    press_origin: Option<Vec2>,
    press_travelled: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        let info = InfoCatalog::builtin().unwrap_or_else(|e| {
            log::error!("{e:#}");
            InfoCatalog::default()
        });

        Self {
            bodies: BodyRegistry::solar_system(),
            follow: CameraFollow::new(FollowConfig::default()),
            controls: OrbitControls::new(OrbitControlsConfig::default()),
            limits: SpeedLimits::default(),
            info,
            global_speed: DEFAULT_GLOBAL_MULTIPLIER,
            paused: false,
            hovered: None,
            orbit_paths: Vec::new(),
            press_origin: None,
            press_travelled: false,
        }
    }

    // ── Queries for the page ───────────────────────────────────────

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn body_name(&self, id: BodyId) -> Option<String> {
        self.bodies.name(id).map(str::to_owned)
    }

    pub fn info_json(&self, id: BodyId) -> Option<String> {
        self.info.to_json(self.bodies.name(id)?)
    }

    /// True while wheel events belong to the follow camera (page must not scroll).
    pub fn is_following(&self) -> bool {
        self.follow.is_following()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn global_speed(&self) -> f32 {
        self.global_speed
    }

    pub fn tracked(&self) -> Option<BodyId> {
        self.follow.tracked()
    }

    fn body_from_index(&self, index: f32) -> Option<BodyId> {
        if index < 0.0 || index.fract() != 0.0 || index as usize >= self.bodies.len() {
            return None;
        }
        Some(BodyId(index as usize))
    }

    // ── Scene ──────────────────────────────────────────────────────

    fn spawn_bodies(&mut self, ctx: &mut EngineContext) {
        let ids: Vec<BodyId> = self.bodies.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(body) = self.bodies.get(id) else { continue };
            let mesh = match body.kind {
                BodyKind::Ring => MeshComponent::ring(body.inner_radius, body.radius, body.color),
                BodyKind::Sun | BodyKind::Planet | BodyKind::Moon => {
                    MeshComponent::sphere(body.radius, body.color)
                }
            }
            .with_texture(body.texture)
            .with_emissive(body.emissive)
            .with_opacity(body.opacity);

            let entity_id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(entity_id)
                    .with_tag(body.name)
                    .with_tilt(body.tilt)
                    .with_mesh(mesh),
            );
            if let Some(body) = self.bodies.get_mut(id) {
                body.entity = Some(entity_id);
            }
        }

        for planet in self.bodies.planets() {
            let Some(body) = self.bodies.get(planet) else { continue };
            let Some(orbit) = body.orbit else { continue };
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(format!("{} orbit", body.name))
                    .with_mesh(
                        MeshComponent::orbit_path(orbit.restore_radius, ORBIT_PATH_COLOR)
                            .with_opacity(ORBIT_PATH_OPACITY),
                    ),
            );
            self.orbit_paths.push(id);
        }
    }

    /// Mirror world positions and orientations into the scene.
    fn sync_entities(&self, ctx: &mut EngineContext) {
        for (id, body) in self.bodies.iter() {
            let Some(entity_id) = body.entity else { continue };
            let Some(entity) = ctx.scene.get_mut(entity_id) else { continue };
            if let Some(pos) = self.bodies.world_position(id) {
                entity.pos = pos;
            }
            entity.spin = self.bodies.world_spin(id);
            entity.tilt = body.tilt;
        }
    }

    fn place_initial_camera(camera: &mut Camera3D) {
        camera.position = INITIAL_CAMERA_POSITION;
        camera.fov_y = CAMERA_FOV_DEGREES.to_radians();
        camera.near = CAMERA_NEAR;
        camera.far = CAMERA_FAR;
        camera.look_at(Vec3::ZERO);
    }

    // ── Events ─────────────────────────────────────────────────────

    fn emit_tracking(&self, ctx: &mut EngineContext) {
        let tracked = self.follow.tracked().map_or(-1.0, |id| id.0 as f32);
        ctx.emit_event(GameEvent::new(EVENT_TRACKING, tracked, flag(self.follow.is_following()), 0.0));
    }

    fn emit_pause(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(EVENT_PAUSE, flag(self.paused), 0.0, 0.0));
    }

    fn emit_global_speed(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(EVENT_GLOBAL_SPEED, self.global_speed, 0.0, 0.0));
    }

    fn emit_body_speed(&self, ctx: &mut EngineContext, id: BodyId) {
        if let Some(speed) = self.bodies.speed(id) {
            ctx.emit_event(GameEvent::new(EVENT_BODY_SPEED, id.0 as f32, speed, 0.0));
        }
    }

    // ── Selection ──────────────────────────────────────────────────

    fn click(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        // A drag swallows exactly the click that ends it.
        if std::mem::take(&mut self.press_travelled) {
            return;
        }
        let ray = ctx.camera.screen_ray(pos);
        let hits = selection::raycast(&ray, &self.bodies);
        let Some(choice) = selection::resolve_click(&hits, &self.bodies) else { return };

        self.follow.select(choice.track, &self.bodies, &ctx.camera, &mut self.controls);
        log::info!(
            "tracking {} (info: {})",
            self.bodies.name(choice.track).unwrap_or("?"),
            self.bodies.name(choice.info).unwrap_or("?"),
        );
        self.emit_tracking(ctx);
        ctx.emit_event(GameEvent::new(EVENT_SHOW_INFO, choice.info.0 as f32, 0.0, 0.0));
    }

    fn double_click(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        let ray = ctx.camera.screen_ray(pos);
        if !selection::raycast(&ray, &self.bodies).is_empty() {
            return;
        }
        self.follow.go_home(SUN, &mut self.controls);
        log::info!("background double-click: back to the Sun");
        self.emit_tracking(ctx);
        ctx.emit_event(GameEvent::new(EVENT_HIDE_INFO, 0.0, 0.0, 0.0));
    }

    fn hover(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        let ray = ctx.camera.screen_ray(pos);
        let hovered = selection::resolve_hover(&selection::raycast(&ray, &self.bodies));
        if hovered != self.hovered {
            self.hovered = hovered;
            ctx.emit_event(GameEvent::new(EVENT_HOVER, hovered.map_or(-1.0, |id| id.0 as f32), 0.0, 0.0));
        }
    }

    // ── Pointer ────────────────────────────────────────────────────

    fn pointer_down(&mut self, pos: Vec2) {
        self.press_origin = Some(pos);
        self.press_travelled = false;
        self.follow.pointer_down(pos);
        self.controls.pointer_down(pos);
    }

    fn pointer_move(&mut self, ctx: &mut EngineContext, pos: Vec2) {
        if let Some(origin) = self.press_origin {
            if origin.distance(pos) > CLICK_DRAG_THRESHOLD {
                self.press_travelled = true;
            }
        }
        if !self.follow.is_dragging() {
            self.hover(ctx, pos);
        }
        self.follow.pointer_move(pos, &self.bodies, &mut ctx.camera);
        let height = ctx.camera.viewport().y;
        self.controls.pointer_move(pos, height);
    }

    fn pointer_up(&mut self) {
        self.press_origin = None;
        self.follow.pointer_up();
        self.controls.pointer_up();
    }

    fn wheel(&mut self, ctx: &mut EngineContext, delta_y: f32) {
        if !self.follow.wheel(delta_y, &self.bodies, &mut ctx.camera) {
            self.controls.wheel(delta_y);
        }
    }

    // ── Pause / reset ──────────────────────────────────────────────

    fn toggle_pause(&mut self, ctx: &mut EngineContext) {
        self.paused = !self.paused;
        log::info!("simulation {}", if self.paused { "paused" } else { "resumed" });
        self.emit_pause(ctx);
    }

    /// Orbits, camera and follow state back to their initial values. Speeds are kept.
    pub fn reset(&mut self, ctx: &mut EngineContext) {
        self.bodies.reset();
        Self::place_initial_camera(&mut ctx.camera);
        self.controls.reset(Vec3::ZERO);
        self.follow.reset(SUN, &mut self.controls);
        self.paused = false;
        self.press_origin = None;
        self.press_travelled = false;
        self.sync_entities(ctx);

        log::info!("simulation reset");
        self.emit_tracking(ctx);
        self.emit_pause(ctx);
        if self.hovered.take().is_some() {
            ctx.emit_event(GameEvent::new(EVENT_HOVER, -1.0, 0.0, 0.0));
        }
    }

    // ── Speeds ─────────────────────────────────────────────────────

    fn set_global_speed(&mut self, ctx: &mut EngineContext, value: f32) {
        if !value.is_finite() {
            log::warn!("ignoring non-finite global speed");
            self.emit_global_speed(ctx);
            return;
        }
        self.global_speed = self.limits.clamp_global(value);
        self.emit_global_speed(ctx);
    }

    fn step_global_speed(&mut self, ctx: &mut EngineContext, steps: i32) {
        self.global_speed = self.limits.step_global(self.global_speed, steps);
        self.emit_global_speed(ctx);
    }

    /// Only planets carry editable speeds; moons follow their planet.
    fn editable_speed(&self, id: BodyId) -> Option<f32> {
        if self.bodies.kind(id) != Some(BodyKind::Planet) {
            log::warn!("body {} has no editable speed", id.0);
            return None;
        }
        self.bodies.speed(id)
    }

    fn set_body_speed(&mut self, ctx: &mut EngineContext, id: BodyId, value: f32) {
        let Some(current) = self.editable_speed(id) else { return };
        if !value.is_finite() {
            log::warn!("ignoring non-finite speed for body {}", id.0);
            ctx.emit_event(GameEvent::new(EVENT_SPEED_REJECTED, id.0 as f32, current, 0.0));
            return;
        }
        self.bodies.set_speed(id, self.limits.clamp_body(value));
        self.emit_body_speed(ctx, id);
    }

    fn step_body_speed(&mut self, ctx: &mut EngineContext, id: BodyId, steps: i32) {
        let Some(current) = self.editable_speed(id) else { return };
        self.bodies.set_speed(id, self.limits.step_body(current, steps));
        self.emit_body_speed(ctx, id);
    }

    /// Text typed into the multiplier field. Bad text restores the shown value.
    pub fn submit_global_speed(&mut self, ctx: &mut EngineContext, text: &str) {
        match self.limits.parse_global(text) {
            Ok(value) => {
                self.global_speed = value;
                self.emit_global_speed(ctx);
            }
            Err(e) => {
                log::warn!("rejected global speed: {e:?}");
                ctx.emit_event(GameEvent::new(EVENT_SPEED_REJECTED, -1.0, self.global_speed, 0.0));
            }
        }
    }

    /// Text typed into a planet's speed field.
    pub fn submit_body_speed(&mut self, ctx: &mut EngineContext, id: BodyId, text: &str) {
        let Some(current) = self.editable_speed(id) else { return };
        match self.limits.parse_body(text) {
            Ok(value) => {
                self.bodies.set_speed(id, value);
                self.emit_body_speed(ctx, id);
            }
            Err(e) => {
                log::warn!("rejected speed for {}: {e:?}", self.bodies.name(id).unwrap_or("?"));
                ctx.emit_event(GameEvent::new(EVENT_SPEED_REJECTED, id.0 as f32, current, 0.0));
            }
        }
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_TOGGLE_PAUSE => self.toggle_pause(ctx),
            CUSTOM_RESET => self.reset(ctx),
            CUSTOM_STEP_GLOBAL => self.step_global_speed(ctx, a.round() as i32),
            CUSTOM_SET_GLOBAL => self.set_global_speed(ctx, a),
            CUSTOM_STEP_BODY | CUSTOM_SET_BODY => {
                let Some(id) = self.body_from_index(a) else {
                    log::warn!("custom event {kind}: no body at index {a}");
                    return;
                };
                if kind == CUSTOM_STEP_BODY {
                    self.step_body_speed(ctx, id, b.round() as i32);
                } else {
                    self.set_body_speed(ctx, id, b);
                }
            }
            _ => log::warn!("unknown custom event {kind}"),
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_instances: 64,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match AssetManifest::from_json(BUILTIN_MANIFEST) {
            Ok(manifest) => ctx.textures = TextureRegistry::from_manifest(&manifest),
            Err(e) => log::error!("built-in manifest: {e:#}"),
        }

        self.spawn_bodies(ctx);
        Self::place_initial_camera(&mut ctx.camera);
        self.controls.reset(Vec3::ZERO);
        self.follow.reset(SUN, &mut self.controls);
        self.sync_entities(ctx);

        self.emit_tracking(ctx);
        self.emit_pause(ctx);
        self.emit_global_speed(ctx);
        let planets: Vec<BodyId> = self.bodies.planets().collect();
        for id in planets {
            self.emit_body_speed(ctx, id);
        }
        log::info!("solar system: {} bodies, {} orbit paths", self.bodies.len(), self.orbit_paths.len());
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(ctx, Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::Wheel { delta_y } => self.wheel(ctx, delta_y),
            InputEvent::Click { x, y } => self.click(ctx, Vec2::new(x, y)),
            InputEvent::DoubleClick { x, y } => self.double_click(ctx, Vec2::new(x, y)),
            InputEvent::Custom { kind, a, b, .. } => self.handle_custom(ctx, kind, a, b),
            // The runner already resized the camera.
            InputEvent::Resize { .. } => {}
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, dt: f32) {
        if !self.paused {
            self.bodies.advance(dt, self.global_speed);
            self.follow.chase(&self.bodies, &mut ctx.camera);
        }
        self.controls.update(&mut ctx.camera);
        self.sync_entities(ctx);
    }
}
