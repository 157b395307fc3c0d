/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::error::Error;
use std::fmt;
use std::io;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ButtonType;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Every failure a state accessor, a connection or the web facade can report.
#[derive(Debug)]
pub enum ElevatorError {
    /// Floor index outside `[0, n_floors)`.
    OutOfRange { floor: i64, n_floors: usize },
    /// No such button on this floor: "up" at the top floor, "down" at the ground floor.
    NoButton { button: ButtonType, floor: usize },
    InvalidArgument(String),
    /// The connection could not be read from or written to.
    TransportClosed(io::Error),
    /// A request body could not be decoded.
    DecodeFailure(String),
    /// A response body could not be encoded.
    EncodeFailure(String),
}

impl fmt::Display for ElevatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorError::OutOfRange { floor, n_floors } => write!(
                f,
                "floor {} out of range, the elevator has {} floors",
                floor, n_floors
            ),
            ElevatorError::NoButton { button, floor } => {
                write!(f, "there is no {} button on floor {}", button, floor)
            }
            ElevatorError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ElevatorError::TransportClosed(e) => write!(f, "connection closed: {}", e),
            ElevatorError::DecodeFailure(msg) => write!(f, "could not decode request: {}", msg),
            ElevatorError::EncodeFailure(msg) => write!(f, "could not encode response: {}", msg),
        }
    }
}

impl Error for ElevatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ElevatorError::TransportClosed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ElevatorError {
    fn from(e: io::Error) -> Self {
        ElevatorError::TransportClosed(e)
    }
}
