//! Scroll-driven motion engine and the terminal preview of the landing page.

pub mod app;
pub mod event;
pub mod input;
pub mod motion;
pub mod page;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
