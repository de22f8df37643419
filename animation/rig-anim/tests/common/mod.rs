//! Shared fixtures for integration tests

#![allow(dead_code)]

use glam::{Mat4, Quat, Vec3};
use rig_anim::{
    AnimationClip, AnimatorConfig, Bone, Keyframe, ManualClock, NodeChannel, SkeletalAnimator,
    Skeleton, SkeletonNode,
};
use std::sync::Arc;

/// Three-node arm: root, shoulder (bone 0), elbow (bone 1)
///
/// Clips:
/// - 0 "swing": shoulder rotates 0..90 degrees about Z over 10 ticks at 1 tick/s,
///   elbow slides along X from 0 to 10
/// - 1 "hold": shoulder holds a single position sample
pub fn arm_skeleton() -> Skeleton {
    let nodes = vec![
        SkeletonNode::root("root", Mat4::IDENTITY),
        SkeletonNode::child("shoulder", 0, Mat4::from_translation(Vec3::Y)).with_bone(0),
        SkeletonNode::child("elbow", 1, Mat4::from_translation(Vec3::Y)).with_bone(1),
    ];
    let bones = vec![
        Bone::from_bind_pose(Mat4::from_translation(Vec3::Y)),
        Bone::from_bind_pose(Mat4::from_translation(Vec3::Y * 2.0)),
    ];

    let swing = AnimationClip::new(
        "swing",
        1.0,
        10.0,
        vec![
            NodeChannel::empty(),
            NodeChannel {
                positions: vec![Keyframe::new(0.0, Vec3::Y)],
                rotations: vec![
                    Keyframe::new(0.0, Quat::IDENTITY),
                    Keyframe::new(10.0, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                ],
                ..NodeChannel::empty()
            },
            NodeChannel {
                positions: vec![
                    Keyframe::new(0.0, Vec3::ZERO),
                    Keyframe::new(10.0, Vec3::new(10.0, 0.0, 0.0)),
                ],
                ..NodeChannel::empty()
            },
        ],
    );

    let hold = AnimationClip::new(
        "hold",
        1.0,
        4.0,
        vec![
            NodeChannel::empty(),
            NodeChannel {
                positions: vec![Keyframe::new(2.0, Vec3::new(3.0, 4.0, 5.0))],
                ..NodeChannel::empty()
            },
        ],
    );

    Skeleton::new("arm", nodes, bones, vec![swing, hold], Mat4::IDENTITY)
        .expect("fixture skeleton is valid")
}

/// Single-bone skeleton used as an attachment (e.g. a sword)
pub fn sword_skeleton() -> Skeleton {
    let nodes = vec![SkeletonNode::root("blade", Mat4::IDENTITY).with_bone(0)];
    let bones = vec![Bone::from_bind_pose(Mat4::from_translation(Vec3::Z))];
    let clips = vec![AnimationClip::new("default", 1.0, 1.0, vec![])];
    Skeleton::new("sword", nodes, bones, clips, Mat4::IDENTITY).expect("fixture skeleton is valid")
}

/// Animator over `skeleton` driven by a manual clock
pub fn manual_animator(skeleton: Skeleton) -> (SkeletalAnimator, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let animator =
        SkeletalAnimator::with_config(Arc::new(skeleton), AnimatorConfig::default(), clock.clone());
    (animator, clock)
}

/// World-space origin of a transform
pub fn origin(m: Mat4) -> Vec3 {
    m.transform_point3(Vec3::ZERO)
}
