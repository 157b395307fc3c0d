/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ElevatorError;

/***************************************/
/*       Public data structures        */
/***************************************/

/// Motor direction. Serialized as its signed unit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Stop,
    Up,
}

impl Direction {
    pub fn sign(&self) -> i8 {
        match *self {
            Direction::Down => -1,
            Direction::Stop => 0,
            Direction::Up => 1,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Stop
    }
}

impl TryFrom<i8> for Direction {
    type Error = ElevatorError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Down),
            0 => Ok(Direction::Stop),
            1 => Ok(Direction::Up),
            other => Err(ElevatorError::InvalidArgument(format!(
                "direction must be one of the following: 1 0 -1, got {}",
                other
            ))),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.sign())
    }
}

/**
 * The three order button classes, each with a paired lamp.
 *
 * The discriminants are the subtype bytes used on the wire.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    HallUp = 0,
    HallDown = 1,
    Cab = 2,
}

impl TryFrom<u8> for ButtonType {
    type Error = ElevatorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ButtonType::HallUp),
            1 => Ok(ButtonType::HallDown),
            2 => Ok(ButtonType::Cab),
            other => Err(ElevatorError::InvalidArgument(format!(
                "unknown order button type {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonType::HallUp => write!(f, "up"),
            ButtonType::HallDown => write!(f, "down"),
            ButtonType::Cab => write!(f, "cabin"),
        }
    }
}

/// Every physical input a user can press through the web facade.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Up,
    Down,
    Cabin,
    Stop,
    Obstruction,
}

impl ButtonKind {
    /// The order button class, if this input is an order button.
    pub fn order_button(&self) -> Option<ButtonType> {
        match *self {
            ButtonKind::Up => Some(ButtonType::HallUp),
            ButtonKind::Down => Some(ButtonType::HallDown),
            ButtonKind::Cabin => Some(ButtonType::Cab),
            ButtonKind::Stop | ButtonKind::Obstruction => None,
        }
    }
}
