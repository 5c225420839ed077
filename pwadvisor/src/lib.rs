//! Live password advice: a strength estimate with plain-language explanations, plus
//! a debounced k-anonymity breach lookup.
//!
//! [`Advisor`] is the input boundary. Feed it the field's value on every change; it
//! answers with the strength [`Assessment`] straight away and arms a breach check
//! whose outcome arrives later through the pipeline's listener.

pub mod advisor;
pub mod error;
pub mod insights;
pub mod status;
pub mod strength;

pub use advisor::{Advisor, Assessment};
pub use error::Error;
pub use insights::{insight, insights};
pub use status::{BreachStatus, group_thousands};
pub use strength::{
    PatternKind, PatternMatch, StrengthLevel, StrengthOracle, StrengthReport, ZxcvbnOracle,
};
