//! Navigation state and simulation

mod camera;
mod controller;
mod impulse;
mod lamp;
mod navigation;

pub use camera::*;
pub use controller::*;
pub use impulse::*;
pub use lamp::*;
pub use navigation::*;
