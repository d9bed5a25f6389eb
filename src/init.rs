//! Start-up: command line arguments and the optional JSON config file.
//!
//! Arguments use the `key::value` form, e.g.
//! `cargo r -- floors::8 mode::scan print_info::false`. They are applied left to right, so a
//! `config::<file>` argument is overridden by any key that comes after it.

use std::{env, fs, path::Path};

use anyhow::{bail, Context};

use crate::config::{self, SimConfig};
use crate::elevator_logic::scheduler::SchedulerKind;


/// Everything `main` needs to start the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    /// Controller parameters
    pub config: SimConfig,
    /// Dispatch policy to start with
    pub scheduler: SchedulerKind,
    /// `help` was given; print usage and exit
    pub show_help: bool,
}

impl Default for Startup {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            scheduler: SchedulerKind::Fifo,
            show_help: false,
        }
    }
}

/// Reads a [SimConfig] from a JSON file. Missing fields keep their defaults.
///
/// Speed and door times must be positive, same as on the command line.
pub fn load_config_file(path: &Path) -> anyhow::Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let cfg: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    check_positive("speed_fps", cfg.speed_fps)
        .and_then(|_| check_positive("door_open_time", cfg.door_open_time))
        .and_then(|_| check_positive("door_close_time", cfg.door_close_time))
        .and_then(|_| check_positive("dwell_time", cfg.dwell_time))
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(cfg)
}

fn check_positive(key: &str, value: f64) -> anyhow::Result<f64> {
    // NaN fails this too
    if !(value > 0.0) {
        bail!("{} must be positive, got {}", key, value);
    }
    Ok(value)
}

fn parse_positive(key: &str, value: &str) -> anyhow::Result<f64> {
    let parsed: f64 = value
        .parse()
        .with_context(|| format!("{} expects a number, got '{}'", key, value))?;
    check_positive(key, parsed)
}

/// Parses the process arguments (without the program name).
pub fn parse_args() -> anyhow::Result<Startup> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_arg_list(&args)
}

/// Parses a list of `key::value` arguments.
///
/// Print toggles (`print_err`, `print_warn`, `print_ok`, `print_info`, `print_event`,
/// `print_status`) are written straight into the flags in [config]. `debug` leaves only
/// errors and events on.
pub fn parse_arg_list(args: &[String]) -> anyhow::Result<Startup> {
    let mut startup = Startup::default();

    for arg in args {
        let parts: Vec<&str> = arg.splitn(2, "::").collect();
        if parts.len() == 2 {
            let key = parts[0].to_lowercase();
            let value = parts[1];
            let is_true = value.to_lowercase() == "true";

            match key.as_str() {
                "floors" => {
                    startup.config.floor_count = value
                        .parse()
                        .with_context(|| format!("floors expects a whole number, got '{}'", value))?;
                }
                "speed" => startup.config.speed_fps = parse_positive("speed", value)?,
                "door_open" => startup.config.door_open_time = parse_positive("door_open", value)?,
                "door_close" => startup.config.door_close_time = parse_positive("door_close", value)?,
                "dwell" => startup.config.dwell_time = parse_positive("dwell", value)?,
                "mode" => startup.scheduler = value.parse()?,
                "config" => startup.config = load_config_file(Path::new(value))?,
                "print_err" => config::set_print(&config::PRINT_ERR_ON, is_true),
                "print_warn" => config::set_print(&config::PRINT_WARN_ON, is_true),
                "print_ok" => config::set_print(&config::PRINT_OK_ON, is_true),
                "print_info" => config::set_print(&config::PRINT_INFO_ON, is_true),
                "print_event" => config::set_print(&config::PRINT_EVENT_ON, is_true),
                "print_status" => config::set_print(&config::PRINT_STATUS_ON, is_true),
                other => bail!("unknown argument '{}'", other),
            }
        } else {
            match arg.to_lowercase().as_str() {
                "help" => startup.show_help = true,
                "debug" => {
                    config::set_print(&config::PRINT_WARN_ON, false);
                    config::set_print(&config::PRINT_OK_ON, false);
                    config::set_print(&config::PRINT_INFO_ON, false);
                    config::set_print(&config::PRINT_STATUS_ON, false);
                }
                other => bail!("unknown argument '{}' (try 'help')", other),
            }
        }
    }

    Ok(startup)
}

/// Prints the start-up arguments.
pub fn print_usage() {
    println!("Available arguments:");
    println!("  floors::<n>             number of floors (min 2)");
    println!("  speed::<f>              floors per second");
    println!("  door_open::<f>          seconds to open the door");
    println!("  door_close::<f>         seconds to close the door");
    println!("  dwell::<f>              seconds the door stays open");
    println!("  mode::simple|fifo|scan  dispatch policy");
    println!("  config::<file.json>     load parameters from a JSON file");
    println!("  print_err::true/false");
    println!("  print_warn::true/false");
    println!("  print_ok::true/false");
    println!("  print_info::true/false");
    println!("  print_event::true/false");
    println!("  print_status::true/false");
    println!("  debug                   only errors and events");
    println!("  help");
}


#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_args_give_defaults() {
        assert_eq!(parse_arg_list(&[]).unwrap(), Startup::default());
    }

    #[test]
    fn parameters_are_applied() {
        let startup = parse_arg_list(&args(&["floors::10", "speed::2.5", "dwell::3", "mode::SCAN"])).unwrap();
        assert_eq!(startup.config.floor_count, 10);
        assert_eq!(startup.config.speed_fps, 2.5);
        assert_eq!(startup.config.dwell_time, 3.0);
        assert_eq!(startup.scheduler, SchedulerKind::Scan);
        assert!(!startup.show_help);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(parse_arg_list(&args(&["floors::lots"])).is_err());
        assert!(parse_arg_list(&args(&["speed::0"])).is_err());
        assert!(parse_arg_list(&args(&["speed::-1"])).is_err());
        assert!(parse_arg_list(&args(&["mode::elevatorish"])).is_err());
        assert!(parse_arg_list(&args(&["colour::blue"])).is_err());
        assert!(parse_arg_list(&args(&["nonsense"])).is_err());
    }

    #[test]
    fn help_flag() {
        assert!(parse_arg_list(&args(&["help"])).unwrap().show_help);
    }

    #[test]
    fn config_file_is_loaded_then_overridden() {
        let path = env::temp_dir().join(format!("elevatorsim-init-test-{}.json", std::process::id()));
        fs::write(&path, r#"{ "floor_count": 9, "speed_fps": 3.0 }"#).unwrap();

        let arg = format!("config::{}", path.display());
        let startup = parse_arg_list(&[arg, "speed::1.5".to_string()]).unwrap();
        assert_eq!(startup.config.floor_count, 9);
        assert_eq!(startup.config.speed_fps, 1.5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn config_file_with_non_positive_values_is_rejected() {
        for (n, body) in [
            r#"{ "speed_fps": -1.0 }"#,
            r#"{ "speed_fps": 0.0 }"#,
            r#"{ "door_open_time": -0.5 }"#,
            r#"{ "door_close_time": 0 }"#,
            r#"{ "dwell_time": -3 }"#,
        ]
        .iter()
        .enumerate()
        {
            let path = env::temp_dir().join(format!("elevatorsim-bad-config-{}-{}.json", std::process::id(), n));
            fs::write(&path, body).unwrap();

            let arg = format!("config::{}", path.display());
            let result = parse_arg_list(&[arg]);
            fs::remove_file(&path).unwrap();
            assert!(result.is_err(), "{} should be rejected", body);
        }
    }

    #[test]
    fn missing_config_file_mentions_path() {
        let err = load_config_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }
}
