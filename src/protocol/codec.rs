/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;
use std::io::{self, ErrorKind, Read, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ButtonType;

/***************************************/
/*             Constants               */
/***************************************/
pub const FRAME_SIZE: usize = 4;

pub const NO_OP: u8 = 0;
pub const SET_MOTOR_DIRECTION: u8 = 1;
pub const SET_ORDER_BUTTON_LAMP: u8 = 2;
pub const SET_FLOOR_INDICATOR: u8 = 3;
pub const SET_DOOR_OPEN_LAMP: u8 = 4;
pub const SET_STOP_BUTTON_LAMP: u8 = 5;
pub const GET_ORDER_BUTTON: u8 = 6;
pub const GET_FLOOR_SENSOR: u8 = 7;
pub const GET_STOP_BUTTON: u8 = 8;
pub const GET_OBSTRUCTION_SWITCH: u8 = 9;

// Motor direction bytes
pub const MOTOR_DOWN: u8 = 255;
pub const MOTOR_STOP: u8 = 0;
pub const MOTOR_UP: u8 = 1;

/// One request or response on the wire: `[opcode, arg1, arg2, arg3]`.
pub type Frame = [u8; FRAME_SIZE];

/***************************************/
/*       Public data structures        */
/***************************************/

/// A decoded client request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    NoOp,
    SetMotorDirection(i8),
    SetOrderButtonLamp { button: ButtonType, floor: u8, on: bool },
    SetFloorIndicator(u8),
    SetDoorOpenLamp(bool),
    SetStopButtonLamp(bool),
    GetOrderButton { button: ButtonType, floor: u8 },
    GetFloorSensor,
    GetStopButton,
    GetObstructionSwitch,
}

/// The answer to a read command. Write commands have no reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    OrderButton(bool),
    FloorSensor(Option<u8>),
    StopButton(bool),
    ObstructionSwitch(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeError {
    UnknownOpcode(u8),
    InvalidMotorDirection(u8),
    InvalidButtonType { opcode: u8, value: u8 },
}

/***************************************/
/*             Public API              */
/***************************************/
impl Command {
    pub fn decode(frame: Frame) -> Result<Command, DecodeError> {
        let [opcode, arg1, arg2, arg3] = frame;
        let command = match opcode {
            NO_OP => Command::NoOp,
            SET_MOTOR_DIRECTION => match arg1 {
                MOTOR_STOP => Command::SetMotorDirection(0),
                MOTOR_UP => Command::SetMotorDirection(1),
                MOTOR_DOWN => Command::SetMotorDirection(-1),
                other => return Err(DecodeError::InvalidMotorDirection(other)),
            },
            SET_ORDER_BUTTON_LAMP => Command::SetOrderButtonLamp {
                button: decode_button(opcode, arg1)?,
                floor: arg2,
                on: arg3 == 1,
            },
            SET_FLOOR_INDICATOR => Command::SetFloorIndicator(arg1),
            SET_DOOR_OPEN_LAMP => Command::SetDoorOpenLamp(arg1 == 1),
            SET_STOP_BUTTON_LAMP => Command::SetStopButtonLamp(arg1 == 1),
            GET_ORDER_BUTTON => Command::GetOrderButton {
                button: decode_button(opcode, arg1)?,
                floor: arg2,
            },
            GET_FLOOR_SENSOR => Command::GetFloorSensor,
            GET_STOP_BUTTON => Command::GetStopButton,
            GET_OBSTRUCTION_SWITCH => Command::GetObstructionSwitch,
            other => return Err(DecodeError::UnknownOpcode(other)),
        };
        Ok(command)
    }

    pub fn encode(&self) -> Frame {
        match *self {
            Command::NoOp => [NO_OP, 0, 0, 0],
            Command::SetMotorDirection(direction) => {
                let byte = match direction {
                    d if d < 0 => MOTOR_DOWN,
                    0 => MOTOR_STOP,
                    _ => MOTOR_UP,
                };
                [SET_MOTOR_DIRECTION, byte, 0, 0]
            }
            Command::SetOrderButtonLamp { button, floor, on } => {
                [SET_ORDER_BUTTON_LAMP, button as u8, floor, on as u8]
            }
            Command::SetFloorIndicator(floor) => [SET_FLOOR_INDICATOR, floor, 0, 0],
            Command::SetDoorOpenLamp(on) => [SET_DOOR_OPEN_LAMP, on as u8, 0, 0],
            Command::SetStopButtonLamp(on) => [SET_STOP_BUTTON_LAMP, on as u8, 0, 0],
            Command::GetOrderButton { button, floor } => [GET_ORDER_BUTTON, button as u8, floor, 0],
            Command::GetFloorSensor => [GET_FLOOR_SENSOR, 0, 0, 0],
            Command::GetStopButton => [GET_STOP_BUTTON, 0, 0, 0],
            Command::GetObstructionSwitch => [GET_OBSTRUCTION_SWITCH, 0, 0, 0],
        }
    }
}

impl Reply {
    pub fn encode(&self) -> Frame {
        match *self {
            Reply::OrderButton(value) => [GET_ORDER_BUTTON, value as u8, 0, 0],
            Reply::FloorSensor(None) => [GET_FLOOR_SENSOR, 0, 0, 0],
            Reply::FloorSensor(Some(floor)) => [GET_FLOOR_SENSOR, 1, floor, 0],
            Reply::StopButton(value) => [GET_STOP_BUTTON, value as u8, 0, 0],
            Reply::ObstructionSwitch(value) => [GET_OBSTRUCTION_SWITCH, value as u8, 0, 0],
        }
    }

    /// The zero-valued reply for a read opcode, sent when the read itself failed.
    /// `None` for opcodes that never reply.
    pub fn fallback(opcode: u8) -> Option<Reply> {
        match opcode {
            GET_ORDER_BUTTON => Some(Reply::OrderButton(false)),
            GET_FLOOR_SENSOR => Some(Reply::FloorSensor(None)),
            GET_STOP_BUTTON => Some(Reply::StopButton(false)),
            GET_OBSTRUCTION_SWITCH => Some(Reply::ObstructionSwitch(false)),
            _ => None,
        }
    }
}

impl DecodeError {
    pub fn opcode(&self) -> u8 {
        match *self {
            DecodeError::UnknownOpcode(opcode) => opcode,
            DecodeError::InvalidMotorDirection(_) => SET_MOTOR_DIRECTION,
            DecodeError::InvalidButtonType { opcode, .. } => opcode,
        }
    }
}

/// Reads one frame. `Ok(None)` when the peer closed the connection between
/// frames, an `UnexpectedEof` error when it closed in the middle of one.
pub fn read_frame<R: Read>(reader: &mut R) -> io::Result<Option<Frame>> {
    let mut frame = [0u8; FRAME_SIZE];
    let mut filled = 0;
    while filled < FRAME_SIZE {
        match reader.read(&mut frame[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("connection closed after {} of {} bytes", filled, FRAME_SIZE),
                ))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(Some(frame))
}

pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> io::Result<()> {
    writer.write_all(frame)?;
    writer.flush()
}

/***************************************/
/*          Private functions          */
/***************************************/
fn decode_button(opcode: u8, value: u8) -> Result<ButtonType, DecodeError> {
    ButtonType::try_from(value).map_err(|_| DecodeError::InvalidButtonType { opcode, value })
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownOpcode(opcode) => write!(f, "unknown opcode {}", opcode),
            DecodeError::InvalidMotorDirection(value) => {
                write!(f, "invalid motor direction byte {}", value)
            }
            DecodeError::InvalidButtonType { opcode, value } => {
                write!(f, "invalid button type {} for opcode {}", value, opcode)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
