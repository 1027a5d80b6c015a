// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod reconciler;
pub mod scoring;

pub use distance::equirectangular_distance;
pub use filters::{age_shortfall, matches_gender, shared_interests};
pub use matcher::{Matcher, DEFAULT_TOP_K};
pub use reconciler::{pair_state, record_swipe, PairState, SwipeLedger};
pub use scoring::{calculate_match_score, UNSCOREABLE};
