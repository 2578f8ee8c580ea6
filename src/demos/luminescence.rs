//! A glTF model playing its first animation under a bloom pass.

use super::SceneContext;
use crate::adapter::{AnimatedModelAdapter, RigidBodyAdapter, SceneMount};
use crate::frame::FrameDriver;
use crate::loader::{load_gltf, spawn_load};
use crate::palette::Rgb;
use crate::physics::{PhysicsWorld, RigidBodyDesc, Shape};
use crate::stage::Stage;
use crate::target::TintTarget;
use glamx::Vec3;
use kiss3d::scene::SceneNode3d;
use std::path::PathBuf;

/// Eye position of the camera.
pub const CAMERA_EYE: Vec3 = Vec3::new(4.0, 2.0, 2.0);
/// Where the directional light shines from.
pub const LIGHT_POSITION: Vec3 = Vec3::new(7.0, 10.0, -2.0);
/// Intensity of the directional light.
pub const LIGHT_INTENSITY: f32 = 0.3;
/// Ambient light intensity.
pub const AMBIENT: f32 = 0.9;
/// Length of the drawn axes.
pub const AXES_LENGTH: f32 = 25.0;

/// Where the ground plane lies.
pub const GROUND_POSITION: Vec3 = Vec3::new(0.0, -2.0, 0.0);
/// Side of the ground quad.
pub const GROUND_SIZE: f32 = 100.0;
/// Half of a human box side.
pub const HUMAN_HALF_EXTENT: f32 = 0.5;
/// Mass of a human, in kg.
pub const HUMAN_MASS: f32 = 5.0;
/// Rows of the crowd, three humans each.
pub const CROWD_ROWS: usize = 20;

const GROUND_COLOR: Rgb = Rgb::from_u32(0x080808);
const HUMAN_COLOR: Rgb = Rgb::from_u32(0xa2c26b);

/// What the luminescence scene contains.
#[derive(Clone, Debug, PartialEq)]
pub struct LuminescenceOptions {
    /// The glTF or GLB file to show.
    pub model: PathBuf,
    /// Adds a static ground plane.
    pub with_ground: bool,
    /// Drops [`CROWD_ROWS`] rows of humans.
    pub crowd: bool,
}

impl LuminescenceOptions {
    /// Shows `model` alone.
    pub fn new(model: impl Into<PathBuf>) -> Self {
        LuminescenceOptions {
            model: model.into(),
            with_ground: false,
            crowd: false,
        }
    }

    fn needs_physics(&self) -> bool {
        self.with_ground || self.crowd
    }
}

/// Spawn positions of a crowd of `rows` rows: row `i` puts one human at `(0, i, 0)`, one
/// at `(0, i + 1, -2)` and one at `(-2, i + 2, 0)`.
pub fn crowd_positions(rows: usize) -> Vec<Vec3> {
    (0..rows)
        .flat_map(|i| {
            let y = i as f32;
            [
                Vec3::new(0.0, y, 0.0),
                Vec3::new(0.0, y + 1.0, -2.0),
                Vec3::new(-2.0, y + 2.0, 0.0),
            ]
        })
        .collect()
}

fn add_ground(scene: &mut SceneNode3d) -> SceneNode3d {
    let mut mesh = scene.add_quad(GROUND_SIZE, GROUND_SIZE, 1, 1);
    mesh.set_tint(GROUND_COLOR);
    mesh
}

/// A cone body under a sphere head, standing on its local origin.
fn add_human(scene: &mut SceneNode3d) -> SceneNode3d {
    let mut human = scene.add_group();
    let _ = human.add_sphere(0.4).set_position(Vec3::new(0.0, 1.8, 0.0));
    let _ = human.add_cone(0.5, 2.0).set_position(Vec3::new(0.0, 1.0, 0.0));
    human.set_tint(HUMAN_COLOR);
    human
}

/// Opens the window and runs the scene until it is closed.
pub async fn run(ctx: &SceneContext, options: &LuminescenceOptions) {
    log::info!("luminescence: showing {}", options.model.display());

    let mut stage = Stage::new(&ctx.window).await;
    stage.set_ambient(AMBIENT);
    let _light = stage.add_directional_light(-LIGHT_POSITION, LIGHT_INTENSITY);
    stage.show_axes(AXES_LENGTH);
    stage.enable_bloom(ctx.bloom);

    let mut camera = ctx.orbit_camera(CAMERA_EYE);
    let _viewport = camera.track_viewport(stage.resize_observer());

    let mut driver = FrameDriver::new(ctx.policy);
    if options.needs_physics() {
        driver = driver.with_physics(PhysicsWorld::new(ctx.physics.gravity), ctx.physics);
    }

    let mut bodies = Vec::new();
    if let Some(world) = driver.physics_mut() {
        if options.with_ground {
            let mesh = add_ground(stage.scene_mut());
            bodies.push(RigidBodyAdapter::spawn(
                "ground",
                world,
                RigidBodyDesc::ground(GROUND_POSITION),
                mesh,
            ));
        }

        if options.crowd {
            let h = HUMAN_HALF_EXTENT;
            for (i, position) in crowd_positions(CROWD_ROWS).into_iter().enumerate() {
                let mesh = add_human(stage.scene_mut());
                bodies.push(RigidBodyAdapter::spawn(
                    format!("human-{}", i),
                    world,
                    RigidBodyDesc::new(position, HUMAN_MASS, Shape::cuboid(h, h, h)),
                    mesh,
                ));
            }
        }
    }
    for body in bodies {
        driver.add_adapter(body);
    }

    let path = options.model.clone();
    let pending = spawn_load(path.display().to_string(), move || load_gltf(&path));
    let parent = stage.scene_mut().add_group();
    driver.add_adapter(AnimatedModelAdapter::new(pending, SceneMount::new(parent)));

    stage.run(&mut driver, &mut camera).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crowd_has_three_humans_per_row() {
        let positions = crowd_positions(CROWD_ROWS);
        assert_eq!(positions.len(), 3 * CROWD_ROWS);
        assert_eq!(positions[3], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(positions[4], Vec3::new(0.0, 2.0, -2.0));
        assert_eq!(positions[5], Vec3::new(-2.0, 3.0, 0.0));
        assert!(crowd_positions(0).is_empty());
    }

    #[test]
    fn crowd_boxes_do_not_overlap_and_start_above_the_ground() {
        let positions = crowd_positions(CROWD_ROWS);
        let side = 2.0 * HUMAN_HALF_EXTENT;

        for (i, a) in positions.iter().enumerate() {
            assert!(a.y - HUMAN_HALF_EXTENT > GROUND_POSITION.y);
            for b in &positions[i + 1..] {
                let d = (*a - *b).abs();
                assert!(d.max_element() >= side - 1.0e-5, "{} overlaps {}", a, b);
            }
        }
    }

    #[test]
    fn physics_only_when_bodies_are_requested() {
        let mut options = LuminescenceOptions::new("model.glb");
        assert!(!options.needs_physics());
        options.crowd = true;
        assert!(options.needs_physics());
    }
}
