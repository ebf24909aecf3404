//! Per-batch diagnosis: why the grade came out as it did and what to change.

mod explanation;
mod recommendation;
mod root_cause;

pub use explanation::{explain, ExplanationItem, FactorImpact};
pub use recommendation::{recommend, Recommendation, RecommendationImpact};
pub use root_cause::{rank_root_causes, CauseImpact, RootCause};
