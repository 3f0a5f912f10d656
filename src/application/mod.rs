mod camera;
mod clock;
mod command;
mod controller;

pub use camera::Camera;
pub use clock::TickClock;
pub use command::{Command, Flow, PointerButton};
pub use controller::SimulationController;
