pub mod app;
pub mod backdrop;
pub mod confetti;
pub mod gallery;
pub mod shapes;
pub mod theme;
pub mod window;
