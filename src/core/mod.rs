pub mod color;
pub mod params;
pub mod preview;
pub mod registry;
pub mod renderer;
pub mod share;
pub mod svg;
