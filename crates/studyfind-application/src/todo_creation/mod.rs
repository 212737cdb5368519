//! The to-do creation screen.

mod controller;
mod view;

pub use controller::TodoCreationController;
pub use view::{CreationGate, CreationPhase, CreationView};
