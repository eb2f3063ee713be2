use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Local transform of one model node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePose {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for NodePose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Step,
    Linear,
}

/// Keyframe values for one animated node property.
#[derive(Clone, Debug, PartialEq)]
pub enum Keyframes {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

impl Keyframes {
    pub fn len(&self) -> usize {
        match self {
            Keyframes::Translation(v) | Keyframes::Scale(v) => v.len(),
            Keyframes::Rotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub node: usize,
    pub interpolation: Interpolation,
    pub times: Vec<f32>,
    pub values: Keyframes,
}

impl Channel {
    /// Key times are finite and never decrease.
    pub fn has_ordered_times(&self) -> bool {
        self.times.iter().all(|t| t.is_finite()) && self.times.windows(2).all(|w| w[0] <= w[1])
    }

    /// Locate the keyframe pair around `t` and the blend factor between them.
    fn locate(&self, t: f32) -> Option<(usize, usize, f32)> {
        let n = self.times.len().min(self.values.len());
        if n == 0 {
            return None;
        }
        if n == 1 || t <= self.times[0] {
            return Some((0, 0, 0.0));
        }
        if t >= self.times[n - 1] {
            return Some((n - 1, n - 1, 0.0));
        }
        let hi = self.times[..n].partition_point(|&k| k <= t).min(n - 1);
        if hi == 0 {
            return None;
        }
        let lo = hi - 1;
        let span = self.times[hi] - self.times[lo];
        let f = if span > 0.0 {
            ((t - self.times[lo]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self.interpolation {
            Interpolation::Step => Some((lo, lo, 0.0)),
            Interpolation::Linear => Some((lo, hi, f)),
        }
    }

    pub fn apply(&self, t: f32, pose: &mut NodePose) {
        let Some((a, b, f)) = self.locate(t) else {
            return;
        };
        match &self.values {
            Keyframes::Translation(v) => pose.translation = v[a].lerp(v[b], f),
            Keyframes::Rotation(v) => pose.rotation = v[a].slerp(v[b], f).normalize(),
            Keyframes::Scale(v) => pose.scale = v[a].lerp(v[b], f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub channels: SmallVec<[Channel; 4]>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, channels: SmallVec<[Channel; 4]>) -> Self {
        let duration = channels
            .iter()
            .filter_map(|c| c.times.last().copied())
            .fold(0.0_f32, f32::max);
        Self {
            name: name.into(),
            duration,
            channels,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MixerError {
    #[error("animation channel targets node {node} but the model has {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },
}

struct ClipAction {
    clip: AnimationClip,
    time: f32,
}

/// Plays every clip at once in repeat mode.
///
/// Clips are applied in order; when two clips animate the same property of
/// the same node, the later one wins.
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
}

impl AnimationMixer {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        Self {
            actions: clips
                .into_iter()
                .map(|clip| ClipAction { clip, time: 0.0 })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clip_times(&self) -> impl Iterator<Item = f32> + '_ {
        self.actions.iter().map(|a| a.time)
    }

    /// Advance all clips by `delta` seconds and write sampled values.
    ///
    /// Channels targeting a node outside `poses` are skipped and reported
    /// through the first such error; all other channels are still applied.
    pub fn update(&mut self, delta: f32, poses: &mut [NodePose]) -> Result<(), MixerError> {
        let nodes = poses.len();
        let mut first_err = None;
        for action in &mut self.actions {
            let duration = action.clip.duration;
            action.time = if duration > 0.0 {
                (action.time + delta.max(0.0)).rem_euclid(duration)
            } else {
                0.0
            };
            for channel in &action.clip.channels {
                match poses.get_mut(channel.node) {
                    Some(pose) => channel.apply(action.time, pose),
                    None => {
                        first_err.get_or_insert(MixerError::NodeOutOfRange {
                            node: channel.node,
                            nodes,
                        });
                    }
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
