//! Cycle segmentation.
//!
//! Turns the flat, date-sorted observation list into numbered cycle days and
//! groups them into [`CycleSegment`]s.

mod segment;
mod segmenter;

pub use segment::{
    build_cycle_segments, cycle_day_on, group_into_segments, CycleEntry, CycleSegment,
};
pub use segmenter::{assign_cycle_days, CycleDayAssignment, NOISE_GATE_DAYS};
