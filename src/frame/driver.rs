use super::FrameClock;
use crate::adapter::Adapter;
use crate::config::PhysicsSettings;
use crate::error::Result;
use crate::physics::PhysicsWorld;

/// What the driver does when an adapter fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultPolicy {
    /// Log the fault and keep updating the remaining adapters and later frames.
    #[default]
    LogAndContinue,
    /// Stop the tick and hand the fault to the caller.
    Halt,
}

/// Per-frame data handed to every adapter.
#[derive(Copy, Clone, Debug)]
pub struct FrameContext<'a> {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the first frame.
    pub elapsed: f64,
    /// Index of the frame, starting at 1 for the first timestamp.
    pub frame: u64,
    /// The simulated world, if the scene has one.
    pub physics: Option<&'a PhysicsWorld>,
}

/// Camera controls updated once per frame, after the adapters.
pub trait Controls {
    /// Integrates damping and automatic motion over `delta` seconds.
    fn update(&mut self, delta: f32);
}

/// Summary of one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Index of the frame.
    pub frame: u64,
    /// Seconds since the previous frame; `None` on the first one.
    pub delta: Option<f32>,
    /// Physics sub-steps taken.
    pub sub_steps: u32,
    /// Adapters that failed and were skipped.
    pub faults: usize,
}

/// Runs the per-frame cycle of a scene.
///
/// Each [`FrameDriver::tick`] turns a refresh timestamp into a delta, steps the physics
/// world with a fixed sub-step, updates every adapter in registration order, then the
/// camera controls. The first tick only records the timestamp.
pub struct FrameDriver {
    clock: FrameClock,
    physics: Option<PhysicsWorld>,
    settings: PhysicsSettings,
    adapters: Vec<Box<dyn Adapter>>,
    policy: FaultPolicy,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(FaultPolicy::default())
    }
}

impl FrameDriver {
    /// A driver without physics nor adapters.
    pub fn new(policy: FaultPolicy) -> Self {
        FrameDriver {
            clock: FrameClock::new(),
            physics: None,
            settings: PhysicsSettings::default(),
            adapters: Vec::new(),
            policy,
        }
    }

    /// Attaches a physics world stepped with `settings`.
    pub fn with_physics(mut self, world: PhysicsWorld, settings: PhysicsSettings) -> Self {
        self.physics = Some(world);
        self.settings = settings;
        self
    }

    /// The physics world, if any.
    pub fn physics(&self) -> Option<&PhysicsWorld> {
        self.physics.as_ref()
    }

    /// The physics world, if any, for adding bodies.
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsWorld> {
        self.physics.as_mut()
    }

    /// The fault policy.
    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Changes the fault policy.
    pub fn set_policy(&mut self, policy: FaultPolicy) {
        self.policy = policy;
    }

    /// The clock turning timestamps into deltas.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Registers an adapter; adapters are updated in registration order.
    pub fn add_adapter(&mut self, adapter: impl Adapter + 'static) -> usize {
        self.adapters.push(Box::new(adapter));
        self.adapters.len() - 1
    }

    /// Registered adapters.
    pub fn adapters(&self) -> &[Box<dyn Adapter>] {
        &self.adapters
    }

    /// Number of registered adapters reporting ready.
    pub fn ready_count(&self) -> usize {
        self.adapters.iter().filter(|a| a.is_ready()).count()
    }

    /// Runs one frame for the refresh timestamp `time`, in milliseconds.
    ///
    /// With [`FaultPolicy::Halt`], the first adapter error is returned and the rest of the
    /// frame (remaining adapters and controls) is skipped.
    pub fn tick(&mut self, time: f64, controls: Option<&mut dyn Controls>) -> Result<FrameReport> {
        let Some(delta) = self.clock.advance(time) else {
            log::debug!("first frame at {:.1}ms, nothing to update", time);
            return Ok(FrameReport {
                frame: self.clock.frames(),
                ..FrameReport::default()
            });
        };

        let mut report = FrameReport {
            frame: self.clock.frames(),
            delta: Some(delta),
            ..FrameReport::default()
        };

        if let Some(world) = &mut self.physics {
            report.sub_steps = world.step(
                self.settings.fixed_time_step,
                delta,
                self.settings.max_sub_steps,
            );
            log::trace!("frame {}: {} physics sub-steps", report.frame, report.sub_steps);
        }

        let frame = FrameContext {
            delta,
            elapsed: self.clock.elapsed(),
            frame: report.frame,
            physics: self.physics.as_ref(),
        };

        for adapter in &mut self.adapters {
            if let Err(err) = adapter.update(&frame) {
                match self.policy {
                    FaultPolicy::Halt => return Err(err),
                    FaultPolicy::LogAndContinue => {
                        log::error!("frame {}: {} (continuing)", report.frame, err);
                        report.faults += 1;
                    }
                }
            }
        }

        if let Some(controls) = controls {
            controls.update(delta);
        }

        Ok(report)
    }
}
