//! Short sprite motions (tilts, bounces, recoils) advanced per frame.

use super::face::Pose;

/// One step of a motion sequence. `secs` is the step duration.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionStep {
    /// Rotate by `angle` radians.
    RotateBy {
        /// Relative rotation.
        angle: f32,
        /// Duration.
        secs: f64,
    },
    /// Translate by `(dx, dy)`.
    MoveBy {
        /// Relative x.
        dx: f32,
        /// Relative y.
        dy: f32,
        /// Duration.
        secs: f64,
    },
    /// Scale uniformly to an absolute value.
    ScaleTo {
        /// Target scale.
        scale: f32,
        /// Duration.
        secs: f64,
    },
    /// Scale vertically to an absolute value.
    ScaleYTo {
        /// Target vertical scale.
        scale: f32,
        /// Duration.
        secs: f64,
    },
    /// Do nothing for a while.
    Wait(f64),
    /// Run the children in parallel; lasts as long as the longest.
    Group(Vec<MotionStep>),
}

/// Shorthand for [`MotionStep::RotateBy`].
#[must_use]
pub fn rotate(angle: f32, secs: f64) -> MotionStep {
    MotionStep::RotateBy { angle, secs }
}

/// Shorthand for [`MotionStep::MoveBy`].
#[must_use]
pub fn move_by(dx: f32, dy: f32, secs: f64) -> MotionStep {
    MotionStep::MoveBy { dx, dy, secs }
}

/// Shorthand for [`MotionStep::ScaleTo`].
#[must_use]
pub fn scale_to(scale: f32, secs: f64) -> MotionStep {
    MotionStep::ScaleTo { scale, secs }
}

/// Shorthand for [`MotionStep::ScaleYTo`].
#[must_use]
pub fn scale_y_to(scale: f32, secs: f64) -> MotionStep {
    MotionStep::ScaleYTo { scale, secs }
}

/// Shorthand for [`MotionStep::Wait`].
#[must_use]
pub fn wait(secs: f64) -> MotionStep {
    MotionStep::Wait(secs)
}

impl MotionStep {
    /// Duration of the step.
    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            Self::RotateBy { secs, .. }
            | Self::MoveBy { secs, .. }
            | Self::ScaleTo { secs, .. }
            | Self::ScaleYTo { secs, .. }
            | Self::Wait(secs) => secs.max(0.0),
            Self::Group(children) => children.iter().map(Self::duration).fold(0.0, f64::max),
        }
    }

    /// Apply the portion of this step between local times `t0` and `t1`.
    fn apply(&self, pose: &mut Pose, t0: f64, t1: f64) {
        if let Self::Group(children) = self {
            for child in children {
                child.apply(pose, t0, t1);
            }
            return;
        }
        let secs = self.duration();
        let (p0, p1) = if secs <= 0.0 {
            // Instant steps land once, on the first slice.
            if t0 > 0.0 { return } else { (0.0, 1.0) }
        } else {
            ((t0 / secs).min(1.0), (t1 / secs).min(1.0))
        };
        if p1 <= p0 {
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        let span = (p1 - p0) as f32;
        match self {
            Self::RotateBy { angle, .. } => pose.rotation += angle * span,
            Self::MoveBy { dx, dy, .. } => {
                pose.x += dx * span;
                pose.y += dy * span;
            }
            Self::ScaleTo { scale, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let frac = ((p1 - p0) / (1.0 - p0)) as f32;
                pose.scale_x += (scale - pose.scale_x) * frac;
                pose.scale_y += (scale - pose.scale_y) * frac;
            }
            Self::ScaleYTo { scale, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let frac = ((p1 - p0) / (1.0 - p0)) as f32;
                pose.scale_y += (scale - pose.scale_y) * frac;
            }
            Self::Wait(_) | Self::Group(_) => {}
        }
    }
}

/// A sequence of motion steps playing against one sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionTrack {
    steps: Vec<MotionStep>,
    index: usize,
    step_elapsed: f64,
}

impl MotionTrack {
    /// Play `steps` once.
    #[must_use]
    pub fn new(steps: Vec<MotionStep>) -> Self {
        Self {
            steps,
            index: 0,
            step_elapsed: 0.0,
        }
    }

    /// Play `steps` back to back `count` times.
    #[must_use]
    pub fn repeated(steps: &[MotionStep], count: u32) -> Self {
        let mut all = Vec::with_capacity(steps.len() * count as usize);
        for _ in 0..count {
            all.extend_from_slice(steps);
        }
        Self::new(all)
    }

    /// Total length of the track.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.steps.iter().map(MotionStep::duration).sum()
    }

    /// Whether every step has played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Advance by `dt` seconds, mutating `pose`. Returns `true` once the
    /// track has finished.
    pub fn advance(&mut self, pose: &mut Pose, mut dt: f64) -> bool {
        while let Some(step) = self.steps.get(self.index) {
            let duration = step.duration();
            let used = dt.min(duration - self.step_elapsed).max(0.0);
            if used > 0.0 || duration <= 0.0 {
                step.apply(pose, self.step_elapsed, self.step_elapsed + used);
            }
            self.step_elapsed += used;
            dt -= used;
            if self.step_elapsed + 1e-9 >= duration {
                self.index += 1;
                self.step_elapsed = 0.0;
            } else {
                break;
            }
        }
        self.is_finished()
    }
}
