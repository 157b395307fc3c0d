pub mod error;
pub mod macros;
pub mod structs;


pub use error::ElevatorError;
pub use structs::ButtonKind;
pub use structs::ButtonType;
pub use structs::Direction;
