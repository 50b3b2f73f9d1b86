pub mod gamepad;
pub mod input;
pub mod mapper;
pub mod renderer;
pub mod surface;
pub mod terminal;
