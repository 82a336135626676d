// Template rendering: one parameterized renderer, five theme presets.
// The renderer is pure and infallible; themes are static data tables.

pub mod html;
pub mod renderer;
pub mod sample;
pub mod theme;
pub mod tree;

pub use html::to_html;
pub use renderer::{render, RenderOptions};
pub use theme::Theme;
