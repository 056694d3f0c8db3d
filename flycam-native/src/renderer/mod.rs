mod core;
mod depth;
mod gui;
mod mesh;
mod uniform;

pub use self::core::{Frame, Renderer};
pub use self::gui::HudInfo;
