pub mod config;
pub mod content;
pub mod error;
pub mod form;
pub mod navigation;

pub use config::{AppConfig, ContentSource, EasingType, MotionConfig, SpringConfig};
pub use error::{Error, Result};
pub use navigation::{Anchor, CallToAction};
