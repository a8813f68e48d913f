pub mod compose;
pub mod options;
