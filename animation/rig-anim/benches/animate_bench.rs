use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};
use rig_anim::{
    AnimationClip, AnimatorConfig, Bone, Keyframe, Loops, ManualClock, NodeChannel,
    SkeletalAnimator, Skeleton, SkeletonNode,
};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

fn create_test_skeleton(node_count: usize) -> Skeleton {
    let mut nodes = Vec::with_capacity(node_count);
    let mut bones = Vec::with_capacity(node_count);
    let mut channels = Vec::with_capacity(node_count);

    for i in 0..node_count {
        let rest = Mat4::from_translation(Vec3::Y);
        // Binary-tree layout, parents always precede children
        let node = if i == 0 {
            SkeletonNode::root("root", rest)
        } else {
            SkeletonNode::child(format!("node_{i}"), (i - 1) / 2, rest)
        };
        nodes.push(node.with_bone(i));
        bones.push(Bone::from_bind_pose(Mat4::from_translation(Vec3::Y * i as f32)));

        let keys = 30;
        channels.push(NodeChannel {
            positions: (0..keys)
                .map(|k| Keyframe::new(k as f32, Vec3::new(0.0, 1.0, k as f32 * 0.01)))
                .collect(),
            rotations: (0..keys)
                .map(|k| Keyframe::new(k as f32, Quat::from_rotation_x(k as f32 * 0.05)))
                .collect(),
            scales: vec![Keyframe::new(0.0, Vec3::ONE)],
        });
    }

    let clip = AnimationClip::new("cycle", 30.0, 29.0, channels);
    Skeleton::new("bench", nodes, bones, vec![clip], Mat4::IDENTITY).unwrap()
}

fn animate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("animate");

    for instances in [1usize, 16, 128] {
        let clock = Arc::new(ManualClock::new());
        let animator = SkeletalAnimator::with_config(
            Arc::new(create_test_skeleton(64)),
            AnimatorConfig::default().with_initial_capacity(instances),
            clock.clone(),
        );
        for _ in 0..instances {
            let slot = animator.add();
            animator.play(slot, 0, Loops::Infinite);
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(instances),
            &instances,
            |b, _| {
                b.iter(|| {
                    clock.advance(Duration::from_millis(16));
                    animator.animate();
                    black_box(animator.count());
                })
            },
        );
    }
    group.finish();

    let clock = Arc::new(ManualClock::new());
    let animator = SkeletalAnimator::with_config(
        Arc::new(create_test_skeleton(64)),
        AnimatorConfig::default(),
        clock.clone(),
    );
    for _ in 0..16 {
        let slot = animator.add();
        animator.play(slot, 0, Loops::Infinite);
    }
    animator.animate();

    c.bench_function("sync_16_instances", |b| {
        b.iter(|| {
            animator.sync();
            black_box(animator.snapshot(rig_anim::SlotId(0)));
        })
    });
}

criterion_group!(benches, animate_benchmark);
criterion_main!(benches);
