//! CPU scheduling domain models.
//!
//! Provides the data types shared by every algorithm: the static process
//! description, the per-run process record, and the execution timeline.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated |
//! |------|---------|---------|
//! | Process | once, by the parser | never |
//! | ProcessRecord | per algorithm run | by that run only |
//! | Timeline | per algorithm run | by that run only |

mod process;
mod timeline;

pub use process::{Process, ProcessRecord};
pub use timeline::{IdleGap, Segment, Timeline};
