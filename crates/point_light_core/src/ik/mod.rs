mod two_bone;

pub use two_bone::*;
