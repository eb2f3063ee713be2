// Host-side tests for keyframe sampling and clip playback.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod mixer {
    include!("../src/core/mixer.rs");
}

use glam::{Quat, Vec3};
use mixer::*;
use smallvec::smallvec;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

fn slide(node: usize, interpolation: Interpolation) -> Channel {
    Channel {
        node,
        interpolation,
        times: vec![0.0, 1.0, 2.0],
        values: Keyframes::Translation(vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 0.0),
        ]),
    }
}

#[test]
fn linear_translation_interpolates() {
    let ch = slide(0, Interpolation::Linear);
    let mut pose = NodePose::default();
    ch.apply(0.5, &mut pose);
    assert!(approx_vec(pose.translation, Vec3::new(1.0, 0.0, 0.0)));
    ch.apply(1.5, &mut pose);
    assert!(approx_vec(pose.translation, Vec3::new(2.0, 2.0, 0.0)));
}

#[test]
fn step_holds_previous_key() {
    let ch = slide(0, Interpolation::Step);
    let mut pose = NodePose::default();
    ch.apply(0.99, &mut pose);
    assert_eq!(pose.translation, Vec3::ZERO);
    ch.apply(1.0, &mut pose);
    assert_eq!(pose.translation, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn sampling_outside_keys_clamps_to_ends() {
    let ch = slide(0, Interpolation::Linear);
    let mut pose = NodePose::default();
    ch.apply(-1.0, &mut pose);
    assert_eq!(pose.translation, Vec3::ZERO);
    ch.apply(10.0, &mut pose);
    assert_eq!(pose.translation, Vec3::new(2.0, 4.0, 0.0));
}

#[test]
fn rotation_uses_slerp() {
    let ch = Channel {
        node: 0,
        interpolation: Interpolation::Linear,
        times: vec![0.0, 1.0],
        values: Keyframes::Rotation(vec![
            Quat::IDENTITY,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        ]),
    };
    let mut pose = NodePose::default();
    ch.apply(0.5, &mut pose);
    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
    assert!(pose.rotation.angle_between(expected) < 1e-3);
}

#[test]
fn empty_channel_leaves_pose_alone() {
    let ch = Channel {
        node: 0,
        interpolation: Interpolation::Linear,
        times: vec![],
        values: Keyframes::Scale(vec![]),
    };
    let mut pose = NodePose::default();
    ch.apply(0.3, &mut pose);
    assert_eq!(pose, NodePose::default());
}

#[test]
fn clip_duration_is_last_key_time() {
    let clip = AnimationClip::new("walk", smallvec![slide(0, Interpolation::Linear)]);
    assert_eq!(clip.duration, 2.0);
    let empty = AnimationClip::new("idle", smallvec![]);
    assert_eq!(empty.duration, 0.0);
}

#[test]
fn mixer_loops_clips() {
    let clip = AnimationClip::new("walk", smallvec![slide(0, Interpolation::Linear)]);
    let mut mixer = AnimationMixer::new(vec![clip]);
    let mut poses = vec![NodePose::default()];
    mixer.update(2.5, &mut poses).unwrap();
    assert!((mixer.clip_times().next().unwrap() - 0.5).abs() < 1e-5);
    assert!(approx_vec(poses[0].translation, Vec3::new(1.0, 0.0, 0.0)));
    mixer.update(-1.0, &mut poses).unwrap();
    assert!((mixer.clip_times().next().unwrap() - 0.5).abs() < 1e-5);
}

#[test]
fn out_of_range_channel_is_reported_but_others_apply() {
    let clip = AnimationClip::new(
        "broken",
        smallvec![slide(5, Interpolation::Linear), slide(0, Interpolation::Linear)],
    );
    let mut mixer = AnimationMixer::new(vec![clip]);
    let mut poses = vec![NodePose::default()];
    let err = mixer.update(1.0, &mut poses).unwrap_err();
    assert_eq!(err, MixerError::NodeOutOfRange { node: 5, nodes: 1 });
    assert!(approx_vec(poses[0].translation, Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn later_clip_wins_on_shared_property() {
    let a = AnimationClip::new("a", smallvec![slide(0, Interpolation::Linear)]);
    let b = AnimationClip::new(
        "b",
        smallvec![Channel {
            node: 0,
            interpolation: Interpolation::Step,
            times: vec![0.0, 2.0],
            values: Keyframes::Translation(vec![Vec3::splat(9.0), Vec3::splat(9.0)]),
        }],
    );
    let mut mixer = AnimationMixer::new(vec![a, b]);
    let mut poses = vec![NodePose::default()];
    mixer.update(0.5, &mut poses).unwrap();
    assert_eq!(poses[0].translation, Vec3::splat(9.0));
}

#[test]
fn nan_key_time_leaves_pose_untouched() {
    let ch = Channel {
        times: vec![f32::NAN, 1.0, 2.0],
        ..slide(0, Interpolation::Linear)
    };
    assert!(!ch.has_ordered_times());
    let mut pose = NodePose::default();
    ch.apply(0.5, &mut pose);
    assert_eq!(pose, NodePose::default());

    let mut mixer = AnimationMixer::new(vec![AnimationClip::new("bad", smallvec![ch])]);
    let mut poses = vec![NodePose::default()];
    mixer.update(0.5, &mut poses).unwrap();
    assert_eq!(poses[0], NodePose::default());
}

#[test]
fn decreasing_key_times_are_rejected() {
    let ch = Channel {
        times: vec![0.0, 2.0, 1.0],
        ..slide(0, Interpolation::Step)
    };
    assert!(!ch.has_ordered_times());
    assert!(slide(0, Interpolation::Step).has_ordered_times());
}
