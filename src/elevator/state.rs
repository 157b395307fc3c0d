/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::physics;
use crate::shared::{ButtonType, Direction, ElevatorError};

/**
 * Physical and I/O state of the simulated elevator.
 *
 * Position and the derived floor sensor are only changed by `advance`. Buttons
 * are pressed by the web facade and read by clients, lamps are set by clients.
 * The struct serializes to the JSON document served on `/api/total`.
 *
 * # Fields
 * - `n_floors`:            Number of floors, fixed at construction.
 * - `position`:            Continuous cabin position in floors, within `[-0.5, n_floors - 0.5]`.
 * - `speed`:               Travel speed in floors per second.
 * - `direction`:           Current motor direction.
 * - `blocked`:             Set once the cabin has hit a travel limit. Never cleared.
 * - `margin`:              Floor sensor tolerance in floors.
 * - `current_floor`:       Floor whose sensor is active, `None` between floors.
 * - `obstruction_switch`:  Obstruction switch input.
 * - `stop_button`:         Stop button input.
 * - `up_buttons`, `down_buttons`, `cabin_buttons`: Order button inputs per floor.
 * - `stop_lamp`, `obstruction_lamp`, `door_lamp`: Single lamps.
 * - `up_lamps`, `down_lamps`, `cabin_lamps`: Order button lamps per floor.
 * - `floor_indicator`:     Last floor written to the floor indicator.
 */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Elevator {
    #[serde(rename = "nFloors")]
    n_floors: usize,
    position: f64,
    speed: f64,
    direction: Direction,
    blocked: bool,
    margin: f64,
    #[serde(rename = "currentFloor")]
    current_floor: Option<usize>,

    #[serde(rename = "obstructionButton")]
    obstruction_switch: bool,
    #[serde(rename = "stopButton")]
    stop_button: bool,

    #[serde(rename = "upButtons")]
    up_buttons: Vec<bool>,
    #[serde(rename = "downButtons")]
    down_buttons: Vec<bool>,
    #[serde(rename = "cabinButtons")]
    cabin_buttons: Vec<bool>,

    #[serde(rename = "stopLamp")]
    stop_lamp: bool,
    // No command drives it, it only fills the snapshot
    #[serde(rename = "obstructionLamp")]
    obstruction_lamp: bool,
    #[serde(rename = "doorLamp")]
    door_lamp: bool,
    #[serde(rename = "upLamps")]
    up_lamps: Vec<bool>,
    #[serde(rename = "downLamps")]
    down_lamps: Vec<bool>,
    #[serde(rename = "cabinLamps")]
    cabin_lamps: Vec<bool>,
    #[serde(rename = "indicatorLamp")]
    floor_indicator: usize,
}

impl Elevator {
    pub fn new(config: &ElevatorConfig) -> Result<Elevator, ElevatorError> {
        config.validate()?;
        let n_floors = config.n_floors as usize;

        let mut elevator = Elevator {
            n_floors,
            position: 0.0,
            speed: config.speed,
            direction: Direction::Stop,
            blocked: false,
            margin: config.margin,
            current_floor: None,
            obstruction_switch: false,
            stop_button: false,
            up_buttons: vec![false; n_floors],
            down_buttons: vec![false; n_floors],
            cabin_buttons: vec![false; n_floors],
            stop_lamp: false,
            obstruction_lamp: false,
            door_lamp: false,
            up_lamps: vec![false; n_floors],
            down_lamps: vec![false; n_floors],
            cabin_lamps: vec![false; n_floors],
            floor_indicator: 0,
        };
        elevator.current_floor = physics::floor_signal(elevator.position, elevator.margin, n_floors);
        Ok(elevator)
    }

    /***************************************/
    /*              Physics                */
    /***************************************/

    /// Moves the cabin `elapsed` seconds in the current direction and updates the floor sensor.
    pub fn advance(&mut self, elapsed: f64) {
        let (position, clamped) = physics::integrate(
            self.position,
            self.speed,
            self.direction.sign(),
            elapsed,
            self.n_floors,
        );
        if clamped {
            self.blocked = true;
        }
        self.position = position;
        self.current_floor = physics::floor_signal(self.position, self.margin, self.n_floors);
    }

    pub fn n_floors(&self) -> usize {
        self.n_floors
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn blocked(&self) -> bool {
        self.blocked
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Floor sensor reading as of the last `advance`.
    pub fn floor_signal(&self) -> Option<usize> {
        self.current_floor
    }

    /// Sets the motor direction. Only -1, 0 and 1 are accepted.
    pub fn set_direction(&mut self, direction: i8) -> Result<(), ElevatorError> {
        self.direction = Direction::try_from(direction)?;
        Ok(())
    }

    /***************************************/
    /*             Validation              */
    /***************************************/
    pub fn validate_floor(&self, floor: usize) -> Result<(), ElevatorError> {
        if floor >= self.n_floors {
            return Err(ElevatorError::OutOfRange {
                floor: floor as i64,
                n_floors: self.n_floors,
            });
        }
        Ok(())
    }

    // No up button on the top floor, no down button on the ground floor.
    fn validate_button(&self, button: ButtonType, floor: usize) -> Result<(), ElevatorError> {
        self.validate_floor(floor)?;
        let missing = match button {
            ButtonType::HallUp => floor == self.n_floors - 1,
            ButtonType::HallDown => floor == 0,
            ButtonType::Cab => false,
        };
        if missing {
            return Err(ElevatorError::NoButton { button, floor });
        }
        Ok(())
    }

    /***************************************/
    /*           Order buttons             */
    /***************************************/
    pub fn button(&self, button: ButtonType, floor: usize) -> Result<bool, ElevatorError> {
        self.validate_button(button, floor)?;
        let buttons = match button {
            ButtonType::HallUp => &self.up_buttons,
            ButtonType::HallDown => &self.down_buttons,
            ButtonType::Cab => &self.cabin_buttons,
        };
        Ok(buttons[floor])
    }

    pub fn set_button(&mut self, button: ButtonType, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.validate_button(button, floor)?;
        let buttons = match button {
            ButtonType::HallUp => &mut self.up_buttons,
            ButtonType::HallDown => &mut self.down_buttons,
            ButtonType::Cab => &mut self.cabin_buttons,
        };
        buttons[floor] = value;
        Ok(())
    }

    pub fn up_button(&self, floor: usize) -> Result<bool, ElevatorError> {
        self.button(ButtonType::HallUp, floor)
    }

    pub fn set_up_button(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button(ButtonType::HallUp, floor, value)
    }

    pub fn down_button(&self, floor: usize) -> Result<bool, ElevatorError> {
        self.button(ButtonType::HallDown, floor)
    }

    pub fn set_down_button(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button(ButtonType::HallDown, floor, value)
    }

    pub fn cabin_button(&self, floor: usize) -> Result<bool, ElevatorError> {
        self.button(ButtonType::Cab, floor)
    }

    pub fn set_cabin_button(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button(ButtonType::Cab, floor, value)
    }

    /***************************************/
    /*          Order button lamps         */
    /***************************************/
    pub fn button_lamp(&self, button: ButtonType, floor: usize) -> Result<bool, ElevatorError> {
        self.validate_button(button, floor)?;
        let lamps = match button {
            ButtonType::HallUp => &self.up_lamps,
            ButtonType::HallDown => &self.down_lamps,
            ButtonType::Cab => &self.cabin_lamps,
        };
        Ok(lamps[floor])
    }

    pub fn set_button_lamp(&mut self, button: ButtonType, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.validate_button(button, floor)?;
        let lamps = match button {
            ButtonType::HallUp => &mut self.up_lamps,
            ButtonType::HallDown => &mut self.down_lamps,
            ButtonType::Cab => &mut self.cabin_lamps,
        };
        lamps[floor] = value;
        Ok(())
    }

    pub fn set_up_button_lamp(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button_lamp(ButtonType::HallUp, floor, value)
    }

    pub fn set_down_button_lamp(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button_lamp(ButtonType::HallDown, floor, value)
    }

    pub fn set_cabin_button_lamp(&mut self, floor: usize, value: bool) -> Result<(), ElevatorError> {
        self.set_button_lamp(ButtonType::Cab, floor, value)
    }

    /***************************************/
    /*       Indicators and switches       */
    /***************************************/
    pub fn floor_indicator(&self) -> usize {
        self.floor_indicator
    }

    pub fn set_floor_indicator(&mut self, floor: usize) -> Result<(), ElevatorError> {
        self.validate_floor(floor)?;
        self.floor_indicator = floor;
        Ok(())
    }

    pub fn door_lamp(&self) -> bool {
        self.door_lamp
    }

    pub fn set_door_lamp(&mut self, value: bool) {
        self.door_lamp = value;
    }

    pub fn stop_lamp(&self) -> bool {
        self.stop_lamp
    }

    pub fn set_stop_lamp(&mut self, value: bool) {
        self.stop_lamp = value;
    }

    pub fn stop_button(&self) -> bool {
        self.stop_button
    }

    pub fn set_stop_button(&mut self, value: bool) {
        self.stop_button = value;
    }

    pub fn obstruction(&self) -> bool {
        self.obstruction_switch
    }

    pub fn set_obstruction(&mut self, value: bool) {
        self.obstruction_switch = value;
    }
}
