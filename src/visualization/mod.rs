pub mod canvas;
pub mod projector;
pub mod driver;
pub mod headless;
pub mod vis2d;
