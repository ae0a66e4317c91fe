use std::path::PathBuf;

use structopt::StructOpt;

use crate::log::{LevelFilter, LogConfig};

/// Collect console configuration into a struct.
pub fn from_args() -> anyhow::Result<ConsoleVars> {
    ConsoleVars::try_from(ConsoleVarsImpl::from_args())
}

/// Console variables collect from console commands.
#[derive(Debug, Clone)]
pub struct ConsoleVars {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl ConsoleVars {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            file: self.log_file.clone(),
        }
    }
}

impl TryFrom<ConsoleVarsImpl> for ConsoleVars {
    type Error = anyhow::Error;

    fn try_from(vars: ConsoleVarsImpl) -> Result<Self, Self::Error> {
        Ok(Self {
            level: parse_level(&vars.level)?,
            log_file: vars.log_file,
        })
    }
}

/// Parse a log level name (case insensitive).
pub fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    let level = match level.to_lowercase().trim() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        unknown => anyhow::bail!("Unknown log level: {unknown}"),
    };
    Ok(level)
}

#[derive(Debug, StructOpt)]
#[structopt(name = "vesper", about = "Cached dynamic member access.")]
struct ConsoleVarsImpl {
    /// log level (please choose from trace, debug, info, warn, error)
    #[structopt(short, long, default_value = "debug")]
    level: String,
    /// also write the log into this file
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels() {
        assert_eq!(parse_level("Trace").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::Warn);
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn console_vars_from_command_line() {
        let raw = ConsoleVarsImpl::from_iter(["vesper", "--level", "info", "--log-file", "out/log.txt"]);
        let vars = ConsoleVars::try_from(raw).unwrap();

        assert_eq!(vars.level, LevelFilter::Info);
        assert_eq!(vars.log_config().file, Some(PathBuf::from("out/log.txt")));
    }
}
