//! Skeletal animator: slot pool, animate pass and render snapshots
//!
//! The animator is shared between a simulation thread and a render thread.
//! Two independent locks keep them apart:
//!
//! - the instance lock covers the slot pool; `animate`, `add`, `erase`,
//!   `play`, `reset` and the per-slot setters take it
//! - the snapshot lock covers the published snapshots; `draw` and the
//!   snapshot getters take only this one
//!
//! `sync` is the handoff: it takes the instance lock, builds fresh
//! snapshots, then briefly takes the snapshot lock to swap them in. Locks
//! are always acquired in that order. Snapshot readers hold the snapshot
//! lock only long enough to clone `Arc` handles and never call out while
//! holding it, so a slow renderer never stalls `sync` or `animate`.

use std::sync::Arc;

use glam::Mat4;
use log::{debug, trace, warn};
use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::instance::AnimationInstance;
use super::interpolation::{clip_time, completed_cycles};
use super::render::RenderBinding;
use super::snapshot::SyncedSnapshot;
use super::types::{Loops, SlotId};
use crate::attachment::BoneAttachment;
use crate::config::AnimatorConfig;
use crate::skeleton::Skeleton;

#[derive(Debug, Default)]
struct InstancePool {
    instances: Vec<AnimationInstance>,
    active_count: usize,
}

impl InstancePool {
    fn get(&self, slot: SlotId) -> &AnimationInstance {
        assert!(
            slot.0 < self.instances.len(),
            "{slot} out of range ({} slots)",
            self.instances.len()
        );
        &self.instances[slot.0]
    }

    fn get_mut(&mut self, slot: SlotId) -> &mut AnimationInstance {
        assert!(
            slot.0 < self.instances.len(),
            "{slot} out of range ({} slots)",
            self.instances.len()
        );
        &mut self.instances[slot.0]
    }
}

/// Plays any number of animation instances against one shared skeleton
#[derive(Debug)]
pub struct SkeletalAnimator {
    skeleton: Arc<Skeleton>,
    clock: Arc<dyn Clock>,
    config: AnimatorConfig,
    instances: Mutex<InstancePool>,
    snapshots: Mutex<Vec<Arc<SyncedSnapshot>>>,
}

impl SkeletalAnimator {
    /// Create an animator driven by the system clock
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        Self::with_config(skeleton, AnimatorConfig::default(), Arc::new(SystemClock::new()))
    }

    /// Create an animator with explicit options and time source
    pub fn with_config(
        skeleton: Arc<Skeleton>,
        config: AnimatorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let pool = InstancePool {
            instances: Vec::with_capacity(config.initial_capacity),
            active_count: 0,
        };
        let snapshots = Vec::with_capacity(config.initial_capacity);

        Self {
            skeleton,
            clock,
            config,
            instances: Mutex::new(pool),
            snapshots: Mutex::new(snapshots),
        }
    }

    /// The skeleton every instance plays against
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Allocate a slot, reusing the first inactive one
    pub fn add(&self) -> SlotId {
        let now = self.clock.now();
        let mut pool = self.instances.lock();

        let slot = if let Some(index) = pool.instances.iter().position(|i| !i.active) {
            pool.instances[index].reset_state();
            SlotId(index)
        } else {
            pool.instances.push(AnimationInstance::new(&self.skeleton));
            SlotId(pool.instances.len() - 1)
        };
        pool.active_count += 1;

        let snapshot = Arc::new(SyncedSnapshot::capture(slot, pool.get(slot), now));
        let mut snapshots = self.snapshots.lock();
        if slot.0 < snapshots.len() {
            snapshots[slot.0] = snapshot;
        } else {
            snapshots.push(snapshot);
        }

        debug!("{}: added {slot}", self.skeleton.name());
        slot
    }

    /// Release a slot; its index stays reserved until reused by `add`
    ///
    /// Returns false if the slot is out of range or already inactive.
    pub fn erase(&self, slot: SlotId) -> bool {
        let now = self.clock.now();
        let mut pool = self.instances.lock();

        let Some(instance) = pool.instances.get_mut(slot.0) else {
            warn!("{}: cannot erase {slot}, out of range", self.skeleton.name());
            return false;
        };
        if !instance.active {
            return false;
        }
        instance.active = false;
        pool.active_count -= 1;

        let snapshot = Arc::new(SyncedSnapshot::capture(slot, pool.get(slot), now));
        self.snapshots.lock()[slot.0] = snapshot;

        debug!("{}: erased {slot}", self.skeleton.name());
        true
    }

    /// Number of active slots
    pub fn count(&self) -> usize {
        self.instances.lock().active_count
    }

    /// Number of slots ever allocated, active or not
    pub fn slot_count(&self) -> usize {
        self.instances.lock().instances.len()
    }

    /// Check if a slot exists and has a playable clip assigned
    pub fn can_animate(&self, slot: SlotId) -> bool {
        let pool = self.instances.lock();
        pool.instances
            .get(slot.0)
            .and_then(|i| i.clip)
            .is_some_and(|clip| clip < self.skeleton.animation_count())
    }

    /// Play a clip by index
    ///
    /// Does nothing if the slot already plays this clip, so calling it every
    /// frame does not restart the animation.
    ///
    /// # Panics
    /// Panics if `clip` is not a valid clip index or `slot` is out of range.
    pub fn play(&self, slot: SlotId, clip: usize, loops: Loops) {
        assert!(
            clip < self.skeleton.animation_count(),
            "clip {clip} out of range ({} clips on '{}')",
            self.skeleton.animation_count(),
            self.skeleton.name()
        );
        self.assign(slot, Some(clip), loops);
    }

    /// Play a clip by name
    ///
    /// An unknown name leaves the slot without a clip, so it stops animating.
    /// Returns whether the name resolved.
    pub fn play_named(&self, slot: SlotId, name: &str, loops: Loops) -> bool {
        let clip = self.skeleton.index_of_animation(name);
        if clip.is_none() {
            warn!("{}: no animation named '{name}'", self.skeleton.name());
        }
        self.assign(slot, clip, loops);
        clip.is_some()
    }

    fn assign(&self, slot: SlotId, clip: Option<usize>, loops: Loops) {
        let now = self.clock.now();
        let mut pool = self.instances.lock();
        let instance = pool.get_mut(slot);

        if instance.clip == clip {
            return;
        }
        instance.clip = clip;
        instance.loops = loops;
        instance.restart(now);

        debug!(
            "{}: {slot} plays {clip:?} ({loops:?})",
            self.skeleton.name()
        );
    }

    /// Restart the slot's clip from the beginning
    pub fn reset(&self, slot: SlotId) {
        let now = self.clock.now();
        self.instances.lock().get_mut(slot).restart(now);
        trace!("{}: reset {slot}", self.skeleton.name());
    }

    /// Check if the slot's playback has reached the end of its clip
    ///
    /// Editor tools use this to detect loop boundaries without touching
    /// playback state.
    pub fn will_be_reset(&self, slot: SlotId) -> bool {
        let now = self.clock.now();
        let pool = self.instances.lock();
        let instance = pool.get(slot);

        let Some(clip) = instance.clip.and_then(|c| self.skeleton.animation(c)) else {
            return false;
        };
        let ticks = instance.elapsed(now).as_secs_f64() * clip.ticks_per_second as f64;
        ticks >= clip.duration_ticks as f64
    }

    /// Advance every active slot and recompute its pose
    pub fn animate(&self) {
        let now = self.clock.now();
        let mut pool = self.instances.lock();

        for instance in pool.instances.iter_mut().filter(|i| i.active) {
            let Some(clip) = instance.clip.and_then(|c| self.skeleton.animation(c)) else {
                continue;
            };

            let elapsed = instance.elapsed(now);
            instance.time = clip_time(clip, elapsed);
            if self.config.track_loops {
                instance.loops_completed = completed_cycles(clip, elapsed);
            }

            let attachment = instance.is_attachment.then_some(&instance.attachment);
            instance.pose.update(
                &self.skeleton,
                clip,
                instance.time,
                instance.root_transform,
                attachment,
            );
        }

        trace!(
            "{}: animated {} slots",
            self.skeleton.name(),
            pool.active_count
        );
    }

    /// Publish the current results of every slot as snapshots
    pub fn sync(&self) {
        let now = self.clock.now();
        let pool = self.instances.lock();

        let fresh: Vec<Arc<SyncedSnapshot>> = pool
            .instances
            .iter()
            .enumerate()
            .map(|(index, instance)| Arc::new(SyncedSnapshot::capture(SlotId(index), instance, now)))
            .collect();

        *self.snapshots.lock() = fresh;
    }

    /// Draw every active slot from its latest snapshot
    ///
    /// The snapshot lock is held only while cloning the handles, so a slow
    /// `target` never delays `sync` or `animate`.
    pub fn draw<R: RenderBinding + ?Sized>(&self, target: &mut R) {
        let snapshots: Vec<Arc<SyncedSnapshot>> = self
            .snapshots
            .lock()
            .iter()
            .filter(|s| s.active)
            .cloned()
            .collect();

        target.bind_skeleton(&self.skeleton);
        for snapshot in &snapshots {
            target.set_model_transform(snapshot.model_transform);
            target.set_bone_matrices(&snapshot.bone_matrices);
            target.draw_skeleton(&self.skeleton);
        }
    }

    /// Latest published snapshot of a slot
    pub fn snapshot(&self, slot: SlotId) -> Arc<SyncedSnapshot> {
        let snapshots = self.snapshots.lock();
        assert!(
            slot.0 < snapshots.len(),
            "{slot} out of range ({} slots)",
            snapshots.len()
        );
        Arc::clone(&snapshots[slot.0])
    }

    /// World transform of a node in the slot's latest snapshot
    pub fn node_transform(&self, slot: SlotId, node: usize) -> Mat4 {
        let snapshot = self.snapshot(slot);
        assert!(
            node < snapshot.node_transforms.len(),
            "node {node} out of range ({} nodes)",
            snapshot.node_transforms.len()
        );
        snapshot.node_transforms[node]
    }

    /// Attachment descriptor in the slot's latest snapshot
    pub fn attachment(&self, slot: SlotId) -> BoneAttachment {
        self.snapshot(slot).attachment
    }

    /// World placement used when drawing the slot
    pub fn set_model_transform(&self, slot: SlotId, transform: Mat4) {
        self.instances.lock().get_mut(slot).model_transform = transform;
    }

    /// Transform the slot's skeleton roots are placed under
    pub fn set_root_transform(&self, slot: SlotId, transform: Mat4) {
        self.instances.lock().get_mut(slot).root_transform = transform;
    }

    /// Switch the slot between plain and attachment bone math
    pub fn set_is_attachment(&self, slot: SlotId, is_attachment: bool) {
        self.instances.lock().get_mut(slot).is_attachment = is_attachment;
    }

    /// Replace the slot's attachment descriptor
    pub fn set_attachment(&self, slot: SlotId, attachment: BoneAttachment) {
        self.instances.lock().get_mut(slot).attachment = attachment;
    }

    /// Attach the slot to a bone of another animator's slot
    ///
    /// Uses the attachment's parent node on `parent`'s latest snapshot as
    /// this slot's root transform. Call after `parent.sync()` each frame.
    pub fn follow_bone(
        &self,
        slot: SlotId,
        attachment: BoneAttachment,
        parent: &SkeletalAnimator,
        parent_slot: SlotId,
    ) {
        let root = attachment
            .parent
            .map_or(Mat4::IDENTITY, |node| parent.node_transform(parent_slot, node));

        let mut pool = self.instances.lock();
        let instance = pool.get_mut(slot);
        instance.is_attachment = true;
        instance.attachment = attachment;
        instance.root_transform = root;
    }

    /// Clip assigned to the slot
    pub fn clip(&self, slot: SlotId) -> Option<usize> {
        self.instances.lock().get(slot).clip
    }

    /// Full clip cycles played since the last play or reset
    pub fn loops_completed(&self, slot: SlotId) -> u32 {
        self.instances.lock().get(slot).loops_completed
    }

    /// Check if the slot has played its requested number of loops
    ///
    /// Advisory only: playback keeps looping regardless.
    pub fn is_finished(&self, slot: SlotId) -> bool {
        self.instances.lock().get(slot).is_finished()
    }

    /// Run `f` against the live instance while holding the instance lock
    pub fn inspect<T>(&self, slot: SlotId, f: impl FnOnce(&AnimationInstance) -> T) -> T {
        f(self.instances.lock().get(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clock::ManualClock;
    use crate::skeleton::{AnimationClip, SkeletonNode};
    use std::time::Duration;

    fn skeleton() -> Arc<Skeleton> {
        let nodes = vec![SkeletonNode::root("root", Mat4::IDENTITY)];
        let clips = vec![
            AnimationClip::new("idle", 1.0, 10.0, vec![]),
            AnimationClip::new("walk", 2.0, 4.0, vec![]),
        ];
        Arc::new(Skeleton::new("rig", nodes, vec![], clips, Mat4::IDENTITY).unwrap())
    }

    fn animator() -> (SkeletalAnimator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let animator =
            SkeletalAnimator::with_config(skeleton(), AnimatorConfig::default(), clock.clone());
        (animator, clock)
    }

    #[test]
    fn test_add_reuses_first_inactive_slot() {
        let (animator, _) = animator();
        let a = animator.add();
        let b = animator.add();
        let c = animator.add();
        assert_eq!((a, b, c), (SlotId(0), SlotId(1), SlotId(2)));

        assert!(animator.erase(b));
        assert_eq!(animator.count(), 2);
        assert_eq!(animator.add(), SlotId(1));
        assert_eq!(animator.add(), SlotId(3));
        assert_eq!(animator.count(), 4);
        assert_eq!(animator.slot_count(), 4);
    }

    #[test]
    fn test_erase_twice_keeps_count() {
        let (animator, _) = animator();
        let slot = animator.add();
        assert!(animator.erase(slot));
        assert!(!animator.erase(slot));
        assert!(!animator.erase(SlotId(9)));
        assert_eq!(animator.count(), 0);
    }

    #[test]
    fn test_reused_slot_is_reset() {
        let (animator, _) = animator();
        let slot = animator.add();
        animator.play(slot, 1, Loops::Count(2));
        animator.set_is_attachment(slot, true);
        animator.erase(slot);

        let again = animator.add();
        assert_eq!(again, slot);
        assert_eq!(animator.clip(again), None);
        assert!(!animator.inspect(again, |i| i.is_attachment));
    }

    #[test]
    fn test_can_animate() {
        let (animator, _) = animator();
        let slot = animator.add();
        assert!(!animator.can_animate(slot));
        animator.play(slot, 0, Loops::Infinite);
        assert!(animator.can_animate(slot));
        assert!(!animator.can_animate(SlotId(5)));
    }

    #[test]
    fn test_play_named_unknown_clears_clip() {
        let (animator, _) = animator();
        let slot = animator.add();
        assert!(animator.play_named(slot, "walk", Loops::Infinite));
        assert_eq!(animator.clip(slot), Some(1));
        assert!(!animator.play_named(slot, "swim", Loops::Infinite));
        assert_eq!(animator.clip(slot), None);
        assert!(!animator.can_animate(slot));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_play_invalid_clip_panics() {
        let (animator, _) = animator();
        let slot = animator.add();
        animator.play(slot, 7, Loops::Infinite);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_setter_on_invalid_slot_panics() {
        let (animator, _) = animator();
        animator.set_root_transform(SlotId(3), Mat4::IDENTITY);
    }

    #[test]
    fn test_will_be_reset() {
        let (animator, clock) = animator();
        let slot = animator.add();
        assert!(!animator.will_be_reset(slot));

        animator.play(slot, 1, Loops::Infinite);
        clock.advance(Duration::from_millis(1500));
        assert!(!animator.will_be_reset(slot));
        clock.advance(Duration::from_millis(500));
        assert!(animator.will_be_reset(slot));

        animator.reset(slot);
        assert!(!animator.will_be_reset(slot));
    }

    #[test]
    fn test_loop_counter_is_advisory() {
        let (animator, clock) = animator();
        let slot = animator.add();
        animator.play(slot, 1, Loops::Count(2));

        clock.advance(Duration::from_secs(5));
        animator.animate();
        assert_eq!(animator.loops_completed(slot), 2);
        assert!(animator.is_finished(slot));
        assert!(animator.inspect(slot, |i| (i.time - 2.0).abs() < 1e-5));
    }

    #[test]
    fn test_loop_tracking_disabled() {
        let clock = Arc::new(ManualClock::new());
        let config = AnimatorConfig::default().with_loop_tracking(false);
        let animator = SkeletalAnimator::with_config(skeleton(), config, clock.clone());
        let slot = animator.add();
        animator.play(slot, 1, Loops::Count(1));
        clock.advance(Duration::from_secs(5));
        animator.animate();
        assert_eq!(animator.loops_completed(slot), 0);
    }
}
