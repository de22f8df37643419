//! Keyframe search and interpolation for clip channels

use std::time::Duration;

use glam::{Mat4, Quat, Vec3};

use super::types::Interpolate;
use crate::skeleton::{AnimationClip, Keyframe, NodeChannel};

/// Find the index of the earlier keyframe of the bracketing pair
///
/// Returns the first index `i` with `track[i + 1].time > time`. When no
/// such pair exists the last index is returned. Returns None if the
/// track has no keyframes.
pub fn find_keyframe_index<T>(track: &[Keyframe<T>], time: f32) -> Option<usize> {
    if track.is_empty() {
        return None;
    }

    // Number of samples at or before `time`
    let at_or_before = track.partition_point(|k| k.time <= time);
    Some(at_or_before.saturating_sub(1).min(track.len() - 1))
}

/// Interpolate a track at the given in-clip time
///
/// Returns None if the track is empty. A single-sample track always
/// yields that sample.
pub fn sample_track<T: Interpolate>(track: &[Keyframe<T>], time: f32) -> Option<T> {
    let index = find_keyframe_index(track, time)?;
    let current = &track[index];

    let Some(next) = track.get(index + 1) else {
        return Some(current.value);
    };

    let span = next.time - current.time;
    let factor = if span > 0.0 {
        ((time - current.time) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(current.value.interpolate(&next.value, factor))
}

/// Convert elapsed playback time to in-clip ticks
///
/// Looping comes from the modulo against the clip duration.
pub fn clip_time(clip: &AnimationClip, elapsed: Duration) -> f32 {
    let ticks = elapsed.as_secs_f64() * clip.ticks_per_second as f64;
    (ticks % clip.duration_ticks as f64) as f32
}

/// Number of full clip cycles contained in the elapsed playback time
pub fn completed_cycles(clip: &AnimationClip, elapsed: Duration) -> u32 {
    let ticks = elapsed.as_secs_f64() * clip.ticks_per_second as f64;
    (ticks / clip.duration_ticks as f64).floor() as u32
}

/// Compute a node's local transform from its channel
///
/// Tracks without samples contribute identity for their component. The
/// result is `translation * rotation * scale`.
pub fn channel_transform(channel: &NodeChannel, time: f32) -> Mat4 {
    let translation = sample_track(&channel.positions, time).unwrap_or(Vec3::ZERO);
    let rotation = sample_track(&channel.rotations, time).unwrap_or(Quat::IDENTITY);
    let scale = sample_track(&channel.scales, time).unwrap_or(Vec3::ONE);

    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}
