use uuid::Uuid;

use crate::models::{Match, Swipe, SwipeDirection};

/// Swipe log and match set the reconciler works against
///
/// Implementors own both collections; [`record_swipe`] holds `&mut` access for
/// the whole scan-and-insert so no other writer can interleave.
pub trait SwipeLedger {
    fn append_swipe(&mut self, swipe: Swipe);

    fn swipe_log(&self) -> &[Swipe];

    /// True if any match, active or not, exists for the unordered pair
    fn match_exists_between(&self, a: Uuid, b: Uuid) -> bool;

    fn insert_match(&mut self, m: Match);
}

/// Relationship of an unordered user pair as seen from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    NoLike,
    OneSidedLike,
    Matched,
}

/// Log a swipe and create a match if it completes a mutual like
///
/// The swipe is always appended. A `like` whose reverse like is already in the
/// log produces a new [`Match`] unless one already exists between the pair,
/// including deactivated ones. Self-swipes are logged but never match.
pub fn record_swipe<L: SwipeLedger + ?Sized>(ledger: &mut L, swipe: Swipe) -> Option<Match> {
    let actor = swipe.from_user();
    let target = swipe.to_user();
    let direction = swipe.direction();

    ledger.append_swipe(swipe);

    if direction != SwipeDirection::Like || actor == target {
        return None;
    }

    // Linear scan of the log; an index keyed by (actor, target) would make this O(1)
    let reciprocated = ledger
        .swipe_log()
        .iter()
        .any(|s| s.is_like_between(target, actor));
    if !reciprocated {
        return None;
    }

    if ledger.match_exists_between(actor, target) {
        tracing::debug!(%actor, %target, "mutual like already matched");
        return None;
    }

    let m = Match::new(actor, target);
    ledger.insert_match(m.clone());
    tracing::debug!(match_id = %m.match_id, user_a = %actor, user_b = %target, "match created");
    Some(m)
}

/// Where the pair stands: matched, liked by one side, or neither
pub fn pair_state<L: SwipeLedger + ?Sized>(ledger: &L, a: Uuid, b: Uuid) -> PairState {
    if ledger.match_exists_between(a, b) {
        return PairState::Matched;
    }

    let liked = ledger
        .swipe_log()
        .iter()
        .any(|s| s.is_like_between(a, b) || s.is_like_between(b, a));
    if liked {
        PairState::OneSidedLike
    } else {
        PairState::NoLike
    }
}
