pub mod list;
pub mod preview;
pub mod simulate;
