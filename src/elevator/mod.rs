pub mod guard;
pub mod physics;
pub mod state;
pub mod ticker;

mod state_tests;

pub use guard::SharedElevator;
pub use state::Elevator;
pub use ticker::TickDriver;
