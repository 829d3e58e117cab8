// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot play mode.
//!
//! While play mode is on, playback only shows enabled shots of the current
//! take: reaching the end of a shot jumps to the start of the next enabled
//! shot, and the last one loops back to the first.

use crate::events::{EventListener, HostEvent};
use crate::host::Host;
use shotman_sequencer::Scene;

/// Name of the frame change listener
pub const PLAY_MODE_LISTENER: &str = "shot_manager.jump_to_shot";

/// Frame change listener keeping playback inside shots
#[derive(Debug, Default)]
pub struct JumpToShot;

impl EventListener for JumpToShot {
    fn on_event(&mut self, event: &HostEvent, host: &mut dyn Host) {
        let HostEvent::FrameChangePre { scene } = *event else {
            return;
        };
        if let Some(scene) = host.document_mut().scene_mut(scene) {
            if let Some(frame) = jump_to_shot(scene) {
                tracing::trace!("Play mode jumped to frame {}", frame);
            }
        }
    }
}

/// Move the current frame of `scene` back inside an enabled shot.
///
/// Returns the new frame if the frame was changed.
pub fn jump_to_shot(scene: &mut Scene) -> Option<i64> {
    let frame = scene.frame_current;
    let props = scene.shot_manager.as_mut()?;
    let take = props.current_take()?;

    let current = props
        .current_shot_index
        .filter(|i| take.shot(*i).is_some_and(|s| s.enabled));

    let (index, target) = match current.and_then(|i| take.shot(i).map(|s| (i, s))) {
        Some((_, shot)) if shot.contains_frame(frame) => return None,
        Some((i, shot)) if frame > shot.end() => {
            let next = take.next_enabled_shot(i)?;
            (next, take.shot(next)?.start())
        }
        _ => match take.enabled_shot_at_frame(frame) {
            Some(i) => (i, frame),
            None => {
                let next = match current {
                    Some(i) => take.next_enabled_shot(i)?,
                    None => take.enabled_shots().next()?.0,
                };
                (next, take.shot(next)?.start())
            }
        },
    };

    props.current_shot_index = Some(index);
    if target == frame {
        return None;
    }
    scene.frame_current = target;
    Some(target)
}

/// Make the enabled shot under the current frame the current shot
pub fn select_shot_at_current_frame(scene: &mut Scene) -> Option<usize> {
    let frame = scene.frame_current;
    let props = scene.shot_manager.as_mut()?;
    let index = props.current_take()?.enabled_shot_at_frame(frame)?;
    props.current_shot_index = Some(index);
    Some(index)
}
