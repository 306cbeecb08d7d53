//! Request frames and their lazy sequencing

pub mod frames;
pub mod sequencer;

pub use frames::{Frame, Inbound};
pub use sequencer::{FrameSequence, FrameSequencer};
