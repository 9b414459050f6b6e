//! The billiards table itself: rack, composition, injection and cue.

pub mod composer;
pub mod cue;
pub mod injector;
pub mod rack;
