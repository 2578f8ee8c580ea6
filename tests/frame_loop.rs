use glamx::{Quat, Vec3};
use lumina::adapter::{Adapter, AnimatedModelAdapter, ModelMount, RigidBodyAdapter};
use lumina::animation::{AnimationClip, Interpolation, KeyframeTrack, Track, TrackData};
use lumina::config::PhysicsSettings;
use lumina::error::Error;
use lumina::frame::{FaultPolicy, FrameContext, FrameDriver};
use lumina::loader::{self, ModelData, ModelNode};
use lumina::physics::{PhysicsWorld, RigidBodyDesc, Shape};
use lumina::target::PoseTarget;
use lumina::Result;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

const FRAME_MS: f64 = 16.0;

#[derive(Clone, Default)]
struct DeltaLog {
    deltas: Rc<RefCell<Vec<f32>>>,
}

impl Adapter for DeltaLog {
    fn label(&self) -> &str {
        "delta log"
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        self.deltas.borrow_mut().push(frame.delta);
        Ok(())
    }
}

#[test]
fn delta_only_depends_on_the_previous_timestamp() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let t1 = rng.random_range(0.0..10_000.0);
        let t2 = t1 + rng.random_range(1.0..100.0);
        let t3 = t2 + rng.random_range(1.0..100.0);

        let log = DeltaLog::default();
        let mut driver = FrameDriver::default();
        let _ = driver.add_adapter(log.clone());

        for t in [t1, t2, t3] {
            driver.tick(t, None).unwrap();
        }

        let deltas = log.deltas.borrow();
        assert_eq!(deltas.len(), 2, "the first frame must not update adapters");
        let expected = ((t3 - t2) / 1000.0) as f32;
        assert!((deltas[1] - expected).abs() < 1.0e-5);
    }
}

#[test]
fn first_tick_neither_steps_nor_updates() {
    let log = DeltaLog::default();
    let mut world = PhysicsWorld::default();
    let _ = world.add_body(RigidBodyDesc::new(Vec3::Y, 1.0, Shape::cuboid(0.5, 0.5, 0.5)));

    let mut driver =
        FrameDriver::new(FaultPolicy::Halt).with_physics(world, PhysicsSettings::default());
    let _ = driver.add_adapter(log.clone());

    let report = driver.tick(1234.0, None).unwrap();
    assert_eq!(report.delta, None);
    assert_eq!(report.sub_steps, 0);
    assert!(log.deltas.borrow().is_empty());
    assert_eq!(driver.physics().unwrap().steps(), 0);
}

#[test]
fn sub_steps_never_exceed_the_maximum() {
    let mut rng = rand::rng();
    let settings = PhysicsSettings::default();
    let mut driver = FrameDriver::default().with_physics(PhysicsWorld::default(), settings);

    let mut time = 0.0;
    for _ in 0..500 {
        time += rng.random_range(0.0..250.0);
        let report = driver.tick(time, None).unwrap();
        assert!(report.sub_steps <= settings.max_sub_steps);
    }
}

#[derive(Clone, Default)]
struct RecordedNode {
    translations: Rc<RefCell<Vec<Vec3>>>,
}

impl PoseTarget for RecordedNode {
    fn set_translation(&mut self, translation: Vec3) {
        self.translations.borrow_mut().push(translation);
    }

    fn set_rotation(&mut self, _rotation: Quat) {}

    fn set_scale(&mut self, _scale: Vec3) {}
}

#[derive(Clone, Default)]
struct RecordingMount {
    nodes: Rc<RefCell<Vec<RecordedNode>>>,
    mounts: Rc<Cell<u32>>,
}

impl ModelMount for RecordingMount {
    type Node = RecordedNode;

    fn mount(&mut self, model: &ModelData) -> Result<Vec<RecordedNode>> {
        let nodes: Vec<_> = model.nodes.iter().map(|_| RecordedNode::default()).collect();
        *self.nodes.borrow_mut() = nodes.clone();
        self.mounts.set(self.mounts.get() + 1);
        Ok(nodes)
    }
}

fn sliding_model() -> ModelData {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
        Interpolation::Linear,
    )
    .unwrap();
    let clip = AnimationClip::new(
        "slide",
        vec![Track {
            node: 0,
            data: TrackData::Translation(track),
        }],
    );

    ModelData {
        nodes: vec![ModelNode::default()],
        roots: vec![0],
        clips: vec![Arc::new(clip)],
    }
}

#[test]
fn model_resolving_at_frame_five_is_mounted_then_animated() {
    let (sender, pending) = loader::channel::<ModelData>("slide.glb");
    let mount = RecordingMount::default();
    let mut driver = FrameDriver::new(FaultPolicy::Halt);
    let _ = driver.add_adapter(AnimatedModelAdapter::new(pending, mount.clone()));

    for frame in 1..=4u32 {
        let report = driver.tick(frame as f64 * FRAME_MS, None).unwrap();
        assert_eq!(report.frame, frame as u64);
        assert!(mount.nodes.borrow().is_empty());
        assert_eq!(driver.ready_count(), 0);
    }

    sender.send(Ok(sliding_model()));

    driver.tick(5.0 * FRAME_MS, None).unwrap();
    assert_eq!(driver.ready_count(), 1);
    let node = mount.nodes.borrow()[0].clone();
    assert_eq!(node.translations.borrow().last().copied(), Some(Vec3::ZERO));

    for frame in 6..=10 {
        driver.tick(frame as f64 * FRAME_MS, None).unwrap();
    }

    let x = node.translations.borrow().last().unwrap().x;
    let expected = (5.0 * FRAME_MS / 1000.0) as f32;
    assert!((x - expected).abs() < 1.0e-4, "{} != {}", x, expected);
    assert_eq!(mount.mounts.get(), 1);
}

#[test]
fn failed_model_load_stays_not_ready() {
    let (sender, pending) = loader::channel::<ModelData>("broken.glb");
    let mount = RecordingMount::default();
    let mut driver = FrameDriver::new(FaultPolicy::Halt);
    let _ = driver.add_adapter(AnimatedModelAdapter::new(pending, mount.clone()));

    driver.tick(FRAME_MS, None).unwrap();
    sender.send(Err(Error::Canceled("broken.glb".to_owned())));

    for frame in 2..=8u32 {
        let report = driver.tick(frame as f64 * FRAME_MS, None).unwrap();
        assert_eq!(report.faults, 0);
        assert_eq!(driver.ready_count(), 0);
    }

    assert_eq!(mount.mounts.get(), 0);
    assert!(mount.nodes.borrow().is_empty());
}

#[test]
fn failed_model_load_is_reported_by_the_adapter() {
    let (sender, pending) = loader::channel::<ModelData>("broken.glb");
    let mount = RecordingMount::default();
    let mut adapter = AnimatedModelAdapter::new(pending, mount.clone());
    let frame = FrameContext {
        delta: (FRAME_MS / 1000.0) as f32,
        elapsed: 0.0,
        frame: 2,
        physics: None,
    };

    adapter.update(&frame).unwrap();
    assert!(!adapter.has_failed());

    sender.send(Err(Error::Canceled("broken.glb".to_owned())));
    for _ in 0..5 {
        adapter.update(&frame).unwrap();
    }

    assert!(adapter.has_failed());
    assert!(!adapter.is_ready());
    assert!(adapter.nodes().is_none());
    assert_eq!(mount.mounts.get(), 0);
}

#[test]
fn static_body_never_moves() {
    let mut world = PhysicsWorld::default();
    let node = RecordedNode::default();
    let ground = RigidBodyAdapter::spawn(
        "ground",
        &mut world,
        RigidBodyDesc::new(Vec3::ZERO, 0.0, Shape::cuboid(5.0, 0.1, 5.0)),
        node.clone(),
    );
    let handle = ground.body();

    let mut driver = FrameDriver::default().with_physics(world, PhysicsSettings::default());
    let _ = driver.add_adapter(ground);

    let mut rng = rand::rng();
    let mut time = 0.0;
    for _ in 0..300 {
        time += rng.random_range(1.0..50.0);
        driver.tick(time, None).unwrap();
    }

    let body = driver.physics().unwrap().body(handle).unwrap();
    assert_eq!(body.position(), Vec3::ZERO);
    assert!(node.translations.borrow().iter().all(|t| *t == Vec3::ZERO));
}

#[test]
fn falling_body_lands_on_the_ground() {
    let mut world = PhysicsWorld::default();
    let _ = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
    let node = RecordedNode::default();
    let crate_box = RigidBodyAdapter::spawn(
        "crate",
        &mut world,
        RigidBodyDesc::new(Vec3::new(0.0, 3.0, 0.0), 10.0, Shape::cuboid(0.5, 0.5, 0.5)),
        node.clone(),
    );

    let mut driver = FrameDriver::default().with_physics(world, PhysicsSettings::default());
    let _ = driver.add_adapter(crate_box);

    for frame in 0..600 {
        driver.tick(frame as f64 * FRAME_MS, None).unwrap();
    }

    let rest = *node.translations.borrow().last().unwrap();
    assert!((rest.y - 0.5).abs() < 1.0e-2, "resting at {}", rest.y);
}

#[test]
fn stacked_boxes_do_not_interpenetrate() {
    let mut world = PhysicsWorld::default();
    let _ = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
    let shape = Shape::cuboid(0.5, 0.5, 0.5);
    let lower = RecordedNode::default();
    let upper = RecordedNode::default();
    let lower_box = RigidBodyAdapter::spawn(
        "lower",
        &mut world,
        RigidBodyDesc::new(Vec3::new(0.0, 0.5, 0.0), 5.0, shape),
        lower.clone(),
    );
    let upper_box = RigidBodyAdapter::spawn(
        "upper",
        &mut world,
        RigidBodyDesc::new(Vec3::new(0.0, 2.0, 0.0), 5.0, shape),
        upper.clone(),
    );

    let mut driver = FrameDriver::default().with_physics(world, PhysicsSettings::default());
    let _ = driver.add_adapter(lower_box);
    let _ = driver.add_adapter(upper_box);

    for frame in 0..600 {
        driver.tick(frame as f64 * FRAME_MS, None).unwrap();
    }

    let lower = *lower.translations.borrow().last().unwrap();
    let upper = *upper.translations.borrow().last().unwrap();
    assert!((lower.y - 0.5).abs() < 2.0e-2, "lower box at {}", lower.y);
    assert!((upper.y - lower.y - 1.0).abs() < 2.0e-2, "gap {}", upper.y - lower.y);
}
