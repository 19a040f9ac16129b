// Presentation layer - Rendering and terminal interaction
pub mod render;
pub mod terminal;
