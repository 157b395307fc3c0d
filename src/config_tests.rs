/*
 * Unit tests for the configuration module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_config_defaults
 * - test_config_partial_file
 * - test_cli_overrides_file
 * - test_config_validation
 * - test_parse_log_level
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use crate::config::{parse_log_level, CliArgs, Config, ElevatorConfig};
    use clap::Parser;
    use log::LevelFilter;
    use std::time::Duration;

    #[test]
    fn test_config_defaults() {
        // Act
        let config = Config::default();

        // Assert
        assert_eq!(config.server.client_port, 15657);
        assert_eq!(config.web.web_port, 3001);
        assert!(config.web.enabled);
        assert_eq!(config.elevator.n_floors, 4);
        assert_eq!(config.elevator.speed, 0.4);
        assert_eq!(config.elevator.margin, 0.05);
        assert_eq!(config.elevator.tick_period(), Duration::from_millis(5));
        assert_eq!(config.logging.log_level, "INFO");
        assert!(!config.logging.shh);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_file() {
        // Arrange
        let config_str = r#"
            [elevator]
            n_floors = 9
            margin = 0.1

            [logging]
            shh = true
        "#;

        // Act
        let config: Config = toml::from_str(config_str).unwrap();

        // Assert
        assert_eq!(config.elevator.n_floors, 9);
        assert_eq!(config.elevator.margin, 0.1);
        assert_eq!(config.elevator.speed, 0.4);
        assert_eq!(config.server.client_port, 15657);
        assert!(config.logging.shh);
    }

    #[test]
    fn test_cli_overrides_file() {
        // Arrange
        let args = CliArgs::parse_from([
            "elevator-simulator",
            "-c",
            "20000",
            "--floors",
            "6",
            "-s",
            "1.5",
            "--no-web",
            "--shh",
            "-l",
            "debug",
        ]);

        // Act
        let config = args.apply(Config::default());

        // Assert
        assert_eq!(config.server.client_port, 20000);
        assert_eq!(config.elevator.n_floors, 6);
        assert_eq!(config.elevator.speed, 1.5);
        assert_eq!(config.elevator.margin, 0.05);
        assert!(!config.web.enabled);
        assert!(config.logging.shh);
        assert_eq!(config.logging.log_level, "debug");
    }

    #[test]
    fn test_config_validation() {
        let valid = ElevatorConfig::default();

        let one_floor = ElevatorConfig { n_floors: 1, ..valid.clone() };
        let negative_speed = ElevatorConfig { speed: -0.1, ..valid.clone() };
        let zero_margin = ElevatorConfig { margin: 0.0, ..valid.clone() };
        let no_period = ElevatorConfig { update_period: 0, ..valid.clone() };

        assert!(valid.validate().is_ok());
        assert!(one_floor.validate().is_err());
        assert!(negative_speed.validate().is_err());
        assert!(zero_margin.validate().is_err());
        assert!(no_period.validate().is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_log_level("Warning").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level("CRITICAL").unwrap(), LevelFilter::Error);
        assert!(parse_log_level("loud").is_err());
    }
}
