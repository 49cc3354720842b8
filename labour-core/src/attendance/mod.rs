//! Attendance Recorder
//!
//! One check-in and one check-out per worker per calendar day, with
//! working hours derived from two time-of-day samples.

mod recorder;
mod reports;

pub use recorder::AttendanceRecorder;
