/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::SharedElevator;
use crate::shared::{ButtonKind, ElevatorError};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Body of `POST /api/button`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ButtonPress {
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    #[serde(default)]
    pub floor: i64,
    #[serde(default)]
    pub value: bool,
}

/// A failed web request, carrying the HTTP status to answer with.
#[derive(Debug)]
pub struct WebError {
    pub status: u16,
    pub message: &'static str,
    pub cause: ElevatorError,
}

/***************************************/
/*             Public API              */
/***************************************/

/// The whole elevator state as JSON.
pub fn total(elevator: &SharedElevator) -> Result<String, WebError> {
    elevator
        .with(|e| serde_json::to_string(&*e))
        .map_err(|e| WebError {
            status: 500,
            message: "Could not encode the elevator",
            cause: ElevatorError::EncodeFailure(e.to_string()),
        })
}

/// Decodes a button press and applies it to the elevator.
pub fn set_button(elevator: &SharedElevator, body: &[u8]) -> Result<(), WebError> {
    let press: ButtonPress = serde_json::from_slice(body).map_err(|e| WebError {
        status: 400,
        message: "Could not decode the request body",
        cause: ElevatorError::DecodeFailure(e.to_string()),
    })?;

    apply_press(elevator, &press).map_err(|cause| WebError {
        status: 400,
        message: "Invalid button configuration",
        cause,
    })
}

pub fn apply_press(elevator: &SharedElevator, press: &ButtonPress) -> Result<(), ElevatorError> {
    match press.kind.order_button() {
        Some(button) => {
            let floor = usize::try_from(press.floor).map_err(|_| ElevatorError::OutOfRange {
                floor: press.floor,
                n_floors: elevator.with(|e| e.n_floors()),
            })?;
            elevator.with(|e| e.set_button(button, floor, press.value))
        }
        None if press.kind == ButtonKind::Stop => {
            elevator.with(|e| e.set_stop_button(press.value));
            Ok(())
        }
        None => {
            elevator.with(|e| e.set_obstruction(press.value));
            Ok(())
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusCode: {}. msg: {}. Caused by: {}", self.status, self.message, self.cause)
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
