//! Play-mode policy
//!
//! Maps (mode, queue length, cursor, direction) to the next cursor position.
//! Stateless: shuffle draws a fresh uniform index on every call and may land
//! on the current song again.

use crate::types::{Direction, PlayMode};
use rand::Rng;

/// Resolve the cursor position a navigation step should move to
///
/// Returns `None` when the step is a no-op: empty queue, or the sequential
/// boundary was reached.
pub fn resolve_index<R>(
    mode: PlayMode,
    len: usize,
    current: Option<usize>,
    direction: Direction,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if len == 0 {
        return None;
    }

    let target = match (mode, direction) {
        (PlayMode::Shuffle, _) => Some(rng.gen_range(0..len)),

        (PlayMode::Sequential, Direction::Forward) => Some(current.map_or(0, |i| i + 1)),
        (PlayMode::Sequential, Direction::Backward) => current.and_then(|i| i.checked_sub(1)),

        (PlayMode::Repeat, Direction::Forward) => match current {
            Some(i) if i == len - 1 => Some(0),
            Some(i) => Some(i + 1),
            None => Some(0),
        },
        (PlayMode::Repeat, Direction::Backward) => match current {
            Some(0) => Some(len - 1),
            Some(i) => Some(i - 1),
            None => None,
        },
    };

    target.filter(|&i| i < len)
}
