/*
 * Unit tests for the elevator state
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_elevator_initial_state
 * - test_elevator_rejects_invalid_config
 * - test_cabin_button_roundtrip
 * - test_out_of_range_floor_leaves_state_unchanged
 * - test_no_up_button_on_top_floor
 * - test_no_down_button_on_ground_floor
 * - test_button_lamps
 * - test_set_direction
 * - test_floor_indicator
 * - test_unvalidated_lamps_and_switches
 * - test_advance_reaches_floor
 * - test_advance_blocks_at_upper_limit
 * - test_advance_blocks_at_lower_limit
 * - test_snapshot_json
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod state_tests {
    use crate::config::ElevatorConfig;
    use crate::elevator::Elevator;
    use crate::shared::{ButtonType, Direction, ElevatorError};

    fn setup_elevator(n_floors: u8) -> Elevator {
        // Default configuration
        let config = ElevatorConfig {
            n_floors,
            speed: 0.4,
            margin: 0.05,
            update_period: 5,
        };
        Elevator::new(&config).unwrap()
    }

    #[test]
    fn test_elevator_initial_state() {
        // Arrange, Act
        let elevator = setup_elevator(4);

        // Assert
        assert_eq!(elevator.n_floors(), 4);
        assert_eq!(elevator.position(), 0.0);
        assert_eq!(elevator.direction(), Direction::Stop);
        assert!(!elevator.blocked());
        assert_eq!(elevator.floor_signal(), Some(0));
        assert_eq!(elevator.floor_indicator(), 0);
        assert!(!elevator.door_lamp());
        assert!(!elevator.stop_lamp());
        assert!(!elevator.stop_button());
        assert!(!elevator.obstruction());
        for floor in 0..4 {
            assert!(!elevator.cabin_button(floor).unwrap());
            assert!(!elevator.button_lamp(ButtonType::Cab, floor).unwrap());
        }
    }

    #[test]
    fn test_elevator_rejects_invalid_config() {
        let config = ElevatorConfig {
            n_floors: 1,
            ..ElevatorConfig::default()
        };

        assert!(matches!(
            Elevator::new(&config),
            Err(ElevatorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cabin_button_roundtrip() {
        for n_floors in 2..=8u8 {
            let mut elevator = setup_elevator(n_floors);
            for floor in 0..n_floors as usize {
                elevator.set_cabin_button(floor, true).unwrap();
                assert!(elevator.cabin_button(floor).unwrap());
                elevator.set_cabin_button(floor, false).unwrap();
                assert!(!elevator.cabin_button(floor).unwrap());
            }
        }
    }

    #[test]
    fn test_out_of_range_floor_leaves_state_unchanged() {
        // Arrange
        let mut elevator = setup_elevator(4);
        elevator.set_cabin_button(1, true).unwrap();
        let before = elevator.clone();

        // Act
        let cabin = elevator.set_cabin_button(4, true);
        let lamp = elevator.set_cabin_button_lamp(200, true);
        let indicator = elevator.set_floor_indicator(4);
        let read = elevator.cabin_button(4);

        // Assert
        assert!(matches!(cabin, Err(ElevatorError::OutOfRange { floor: 4, n_floors: 4 })));
        assert!(matches!(lamp, Err(ElevatorError::OutOfRange { floor: 200, .. })));
        assert!(matches!(indicator, Err(ElevatorError::OutOfRange { .. })));
        assert!(matches!(read, Err(ElevatorError::OutOfRange { .. })));
        assert_eq!(elevator, before);
    }

    #[test]
    fn test_no_up_button_on_top_floor() {
        for n_floors in 2..=6u8 {
            let mut elevator = setup_elevator(n_floors);
            let top = n_floors as usize - 1;

            assert!(matches!(
                elevator.set_up_button(top, true),
                Err(ElevatorError::NoButton { button: ButtonType::HallUp, .. })
            ));
            assert!(elevator.up_button(top).is_err());
            assert!(elevator.set_up_button_lamp(top, true).is_err());

            for floor in 0..top {
                elevator.set_up_button(floor, true).unwrap();
                assert!(elevator.up_button(floor).unwrap());
                elevator.set_up_button_lamp(floor, true).unwrap();
            }
        }
    }

    #[test]
    fn test_no_down_button_on_ground_floor() {
        for n_floors in 2..=6u8 {
            let mut elevator = setup_elevator(n_floors);

            assert!(matches!(
                elevator.set_down_button(0, true),
                Err(ElevatorError::NoButton { button: ButtonType::HallDown, floor: 0 })
            ));
            assert!(elevator.down_button(0).is_err());
            assert!(elevator.set_down_button_lamp(0, true).is_err());

            for floor in 1..n_floors as usize {
                elevator.set_down_button(floor, true).unwrap();
                assert!(elevator.down_button(floor).unwrap());
                elevator.set_down_button_lamp(floor, true).unwrap();
            }
        }
    }

    #[test]
    fn test_button_lamps() {
        // Arrange
        let mut elevator = setup_elevator(4);

        // Act
        elevator.set_up_button_lamp(1, true).unwrap();
        elevator.set_down_button_lamp(2, true).unwrap();
        elevator.set_cabin_button_lamp(3, true).unwrap();

        // Assert
        assert!(elevator.button_lamp(ButtonType::HallUp, 1).unwrap());
        assert!(elevator.button_lamp(ButtonType::HallDown, 2).unwrap());
        assert!(elevator.button_lamp(ButtonType::Cab, 3).unwrap());
        assert!(!elevator.button_lamp(ButtonType::Cab, 1).unwrap());
        // Lamps and buttons are independent
        assert!(!elevator.up_button(1).unwrap());
    }

    #[test]
    fn test_set_direction() {
        let mut elevator = setup_elevator(4);

        elevator.set_direction(-1).unwrap();
        assert_eq!(elevator.direction(), Direction::Down);
        elevator.set_direction(1).unwrap();
        assert_eq!(elevator.direction(), Direction::Up);

        assert!(matches!(
            elevator.set_direction(2),
            Err(ElevatorError::InvalidArgument(_))
        ));
        assert_eq!(elevator.direction(), Direction::Up);
    }

    #[test]
    fn test_floor_indicator() {
        let mut elevator = setup_elevator(4);

        elevator.set_floor_indicator(3).unwrap();

        assert_eq!(elevator.floor_indicator(), 3);
        // The indicator does not follow the cabin
        assert_eq!(elevator.floor_signal(), Some(0));
    }

    #[test]
    fn test_unvalidated_lamps_and_switches() {
        let mut elevator = setup_elevator(4);

        elevator.set_door_lamp(true);
        elevator.set_stop_lamp(true);
        elevator.set_stop_button(true);
        elevator.set_obstruction(true);

        assert!(elevator.door_lamp());
        assert!(elevator.stop_lamp());
        assert!(elevator.stop_button());
        assert!(elevator.obstruction());
    }

    #[test]
    fn test_advance_reaches_floor() {
        // Arrange
        let mut elevator = setup_elevator(4);
        elevator.set_direction(1).unwrap();

        // Act
        elevator.advance(2.5);

        // Assert
        assert!((elevator.position() - 1.0).abs() < 1e-9);
        assert_eq!(elevator.floor_signal(), Some(1));
        assert!(!elevator.blocked());

        // Act
        elevator.advance(1.25);

        // Assert
        assert!((elevator.position() - 1.5).abs() < 1e-9);
        assert_eq!(elevator.floor_signal(), None);
    }

    #[test]
    fn test_advance_blocks_at_upper_limit() {
        // Arrange
        let mut elevator = setup_elevator(4);
        elevator.set_direction(1).unwrap();
        let mut last = elevator.position();

        // Act, Assert
        for _ in 0..100 {
            elevator.advance(0.1);
            assert!(elevator.position() >= last);
            last = elevator.position();
        }
        assert_eq!(elevator.position(), 3.5);
        assert!(elevator.blocked());
        assert_eq!(elevator.floor_signal(), None);

        // The flag stays set after leaving the limit
        elevator.set_direction(-1).unwrap();
        elevator.advance(1.25);
        assert!((elevator.position() - 3.0).abs() < 1e-9);
        assert_eq!(elevator.floor_signal(), Some(3));
        assert!(elevator.blocked());
    }

    #[test]
    fn test_advance_blocks_at_lower_limit() {
        // Arrange
        let mut elevator = setup_elevator(4);
        elevator.set_direction(-1).unwrap();

        // Act
        elevator.advance(1.0);
        let between = elevator.position();
        elevator.advance(2.0);
        let position = elevator.position();
        elevator.advance(2.0);

        // Assert
        assert!((between + 0.4).abs() < 1e-9);
        assert_eq!(position, -0.5);
        assert_eq!(elevator.position(), -0.5);
        assert!(elevator.blocked());
    }

    #[test]
    fn test_snapshot_json() {
        // Arrange
        let mut elevator = setup_elevator(3);
        elevator.set_cabin_button(2, true).unwrap();
        elevator.set_down_button_lamp(1, true).unwrap();
        elevator.set_direction(-1).unwrap();
        elevator.set_floor_indicator(2).unwrap();

        // Act
        let json = serde_json::to_value(&elevator).unwrap();

        // Assert
        assert_eq!(json["nFloors"], 3);
        assert_eq!(json["position"], 0.0);
        assert_eq!(json["direction"], -1);
        assert_eq!(json["blocked"], false);
        assert_eq!(json["currentFloor"], 0);
        assert_eq!(json["cabinButtons"], serde_json::json!([false, false, true]));
        assert_eq!(json["downLamps"], serde_json::json!([false, true, false]));
        assert_eq!(json["indicatorLamp"], 2);
        assert_eq!(json["stopButton"], false);
        assert_eq!(json["obstructionButton"], false);
        assert_eq!(json["obstructionLamp"], false);

        // Between floors the sensor reads null
        elevator.set_direction(1).unwrap();
        elevator.advance(1.0);
        let json = serde_json::to_value(&elevator).unwrap();
        assert!(json["currentFloor"].is_null());
    }
}
