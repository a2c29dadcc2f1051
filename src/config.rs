//! Command-line configuration.
//!
//! Every option can also be supplied through an environment variable:
//!
//! ```bash
//! roster-manager --roster employees --salary-threshold 4500
//! ROSTER_COURSES="Rust,Go" roster-manager
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use directories::BaseDirs;

use crate::error::RosterError;
use crate::roster::KNOWN_COURSES;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".roster-manager";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "roster.log";
/// Default cut-off for the "salary above" employee filter.
pub const DEFAULT_SALARY_THRESHOLD: f64 = 5000.0;

/// Which roster the application opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RosterKind {
    #[default]
    Students,
    Employees,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "roster-manager")]
#[command(about = "Manage student and employee rosters from the terminal")]
#[command(version)]
pub struct Cli {
    /// Roster shown at startup.
    #[arg(long, env = "ROSTER_START", value_enum, default_value_t = RosterKind::Students)]
    pub roster: RosterKind,

    /// Courses always listed in the per-course report, even when empty.
    #[arg(
        long,
        env = "ROSTER_COURSES",
        value_delimiter = ',',
        default_values_t = KNOWN_COURSES.map(String::from)
    )]
    pub courses: Vec<String>,

    /// Salary used by the "above threshold" employee filter.
    #[arg(long, env = "ROSTER_SALARY_THRESHOLD", default_value_t = DEFAULT_SALARY_THRESHOLD)]
    pub salary_threshold: f64,

    /// Log file path. Defaults to ~/.roster-manager/roster.log.
    #[arg(long, env = "ROSTER_LOG_FILE", conflicts_with = "no_log")]
    pub log_file: Option<PathBuf>,

    /// Disable logging entirely.
    #[arg(long, env = "ROSTER_NO_LOG")]
    pub no_log: bool,
}

impl Cli {
    /// Resolve the parsed arguments into application settings.
    pub fn into_settings(self) -> Result<Settings, RosterError> {
        let log_file = if self.no_log {
            None
        } else {
            Some(match self.log_file {
                Some(path) => path,
                None => default_log_path()?,
            })
        };

        Ok(Settings {
            start: self.roster,
            courses: self.courses,
            salary_threshold: self.salary_threshold,
            log_file,
        })
    }
}

/// Resolved configuration handed to the terminal application.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub start: RosterKind,
    pub courses: Vec<String>,
    pub salary_threshold: f64,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start: RosterKind::default(),
            courses: KNOWN_COURSES.map(String::from).to_vec(),
            salary_threshold: DEFAULT_SALARY_THRESHOLD,
            log_file: None,
        }
    }
}

/// Resolve the absolute path to the log file inside the user's home.
fn default_log_path() -> Result<PathBuf, RosterError> {
    let base_dirs = BaseDirs::new().ok_or(RosterError::HomeDirUnavailable)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
