pub mod editor;
pub mod merge;

pub use editor::{EditorAction, EditorState, show_editor};
pub use merge::{MergeAction, MergeState, show_merge};
