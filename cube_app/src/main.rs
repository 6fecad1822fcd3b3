//! Headless cube scene demo
//!
//! Runs a cube scene for a fixed number of ticks, clicking on a random cube
//! through the orbit camera every few ticks, and logs what happened.
//!
//! ```text
//! cube_demo                 # default scene
//! cube_demo gallery         # built-in preset (cluster | gallery | default)
//! cube_demo scenes/demo.toml
//! ```

use cube_engine::camera::{MouseState, OrbitCamera};
use cube_engine::config::{Config, ConfigError, SceneConfig};
use cube_engine::foundation::logging;
use cube_engine::foundation::rng::SceneRng;
use cube_engine::headless::HeadlessScene;
use cube_engine::scene::{CubeScene, SceneError};
use serde::{Deserialize, Serialize};

/// Demo run settings wrapping a scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    /// Number of fixed-step ticks to run
    ticks: u64,
    /// Ticks between pointer clicks (0 disables clicking)
    click_interval: u64,
    /// Viewport size used for picking
    viewport: (u32, u32),
    /// The scene itself
    scene: SceneConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            click_interval: 45,
            viewport: (1280, 720),
            scene: SceneConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("scene: {0}")]
    Scene(#[from] SceneError),
}

fn load_config(arg: Option<String>) -> Result<DemoConfig, DemoError> {
    let Some(arg) = arg else {
        return Ok(DemoConfig::default());
    };
    if let Some(scene) = SceneConfig::preset(&arg) {
        return Ok(DemoConfig {
            scene,
            ..DemoConfig::default()
        });
    }
    Ok(DemoConfig::load_from_file(&arg)?)
}

fn run(config: DemoConfig) -> Result<(), DemoError> {
    let mut mouse = MouseState::new(config.viewport.0, config.viewport.1);
    let mut camera = OrbitCamera::from_config(&config.scene.camera, mouse.aspect());
    let dt = config.scene.physics.fixed_timestep;

    let adapter = HeadlessScene::new(&config.scene.physics);
    let mut scene = CubeScene::build(config.scene, adapter)?;
    let mut pointer = SceneRng::seeded(scene.seed().rotate_left(17));

    let (mut clicks, mut hits) = (0_u64, 0_u64);
    let (mut spawned, mut collisions, mut capped) = (0_usize, 0_usize, 0_usize);
    for tick in 0..config.ticks {
        camera.orbit(dt);

        if config.click_interval > 0 && tick % config.click_interval == 0 {
            clicks += 1;
            if click_random_cube(&mut scene, &camera, &mut mouse, &mut pointer) {
                hits += 1;
            }
        }

        let report = scene.tick(dt)?;
        spawned += report.spawned.len();
        collisions += report.collisions;
        capped += report.cap_reached;
    }

    log::info!(
        "Ran {} ticks ({:.1}s simulated), seed {:#x}",
        scene.clock().frame_count(),
        scene.clock().elapsed_seconds(),
        scene.seed()
    );
    log::info!(
        "Pointer clicks: {} ({} on a cube), spawned: {}, collisions: {}",
        clicks,
        hits,
        spawned,
        collisions
    );
    if capped > 0 {
        log::info!("{} spawns skipped at the population cap", capped);
    }
    if let Some(stats) = scene.population().stats() {
        log::info!(
            "{} cubes alive, scale min {:.3} / mean {:.3} / max {:.3}",
            stats.count,
            stats.min_scale,
            stats.mean_scale,
            stats.max_scale
        );
    }
    Ok(())
}

/// Aim the pointer at a random cube's center and click
///
/// The ray may land on a cube in front of the chosen one; picking decides.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn click_random_cube(
    scene: &mut CubeScene<HeadlessScene>,
    camera: &OrbitCamera,
    mouse: &mut MouseState,
    pointer: &mut SceneRng,
) -> bool {
    let objects = scene.population().objects();
    if objects.is_empty() {
        return false;
    }
    let index = (pointer.range(0.0, objects.len() as f32) as usize).min(objects.len() - 1);
    let Some((ndc_x, ndc_y)) = camera.project_to_ndc(&objects[index].position) else {
        log::debug!("Chosen cube is behind the camera");
        return false;
    };

    let (x, y) = mouse.ndc_to_screen(ndc_x, ndc_y);
    mouse.update_position(x, y);
    mouse.set_left_click(true);
    let (ndc_x, ndc_y) = mouse.screen_to_ndc();
    let ray = camera.screen_to_world_ray(ndc_x, ndc_y);
    mouse.clear_clicks();

    scene.adapter_mut().pick(&ray).is_some()
}

fn main() {
    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cube_demo: {e}");
            std::process::exit(2);
        }
    };
    logging::init(&config.scene.log_level);

    if let Err(e) = run(config) {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_engine::config::{ClickAction, Format};

    fn bundled(name: &str) -> String {
        format!("{}/scenes/{name}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_preset_argument() {
        let config = load_config(Some("gallery".to_string())).expect("preset");
        assert_eq!(config.scene, SceneConfig::gallery());
        assert_eq!(config.ticks, 600);
    }

    #[test]
    fn test_demo_config_from_toml() {
        let text = r#"
            ticks = 120
            click_interval = 10

            [scene]
            seed = 5
            initial_count = 3
        "#;
        let config = DemoConfig::from_str_as(text, Format::Toml).expect("parse");
        assert_eq!(config.ticks, 120);
        assert_eq!(config.scene.initial_count, 3);
        assert_eq!(config.scene.seed, Some(5));
    }

    #[test]
    fn test_bundled_cluster_scene_loads() {
        let config = load_config(Some(bundled("cluster.toml"))).expect("load");
        assert_eq!(config.ticks, 1800);
        assert_eq!(config.viewport, (1920, 1080));
        assert_eq!(config.scene.seed, Some(20_240_611));
        assert_eq!(config.scene.initial_count, 15);
        assert_eq!(config.scene.click.action, ClickAction::Spawn);
        assert_eq!(config.scene.collision.spawn_probability, 0.0);
        assert!(config.scene.validate().is_ok());
    }

    #[test]
    fn test_bundled_gallery_scene_loads() {
        let config = load_config(Some(bundled("gallery.ron"))).expect("load");
        assert_eq!(config.ticks, 300);
        assert_eq!(config.click_interval, 20);
        assert_eq!(config.scene.initial_count, 10);
        assert_eq!(config.scene.click.action, ClickAction::Recolor);
        assert!(!config.scene.collision.enabled);
        assert_eq!(config.scene.physics.floor_height, None);
        assert!(config.scene.validate().is_ok());
    }

    #[test]
    fn test_short_run_succeeds() {
        let config = DemoConfig {
            ticks: 90,
            click_interval: 15,
            scene: SceneConfig::cluster().with_seed(21),
            ..DemoConfig::default()
        };
        assert!(run(config).is_ok());
    }

    #[test]
    fn test_invalid_scene_is_reported() {
        let mut config = DemoConfig::default();
        config.scene.click.spawn_probability = 2.0;
        assert!(matches!(run(config), Err(DemoError::Scene(SceneError::Config(_)))));
    }
}
