use super::*;
use log::LevelFilter;
use log4rs::{
  append::{
    console::{ConsoleAppender, Target},
    file::FileAppender,
  },
  config::{Appender, Root},
  encode::pattern::PatternEncoder,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

/// Stderr logging, plus a file when `log_file` is given.
pub fn config(level: LevelFilter, log_file: Option<&Path>) -> Result<log4rs::Config> {
  let stderr = ConsoleAppender::builder()
    .target(Target::Stderr)
    .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
    .build();

  let mut builder =
    log4rs::Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
  let mut root = Root::builder().appender("stderr");

  if let Some(path) = log_file {
    let file = FileAppender::builder()
      .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
      .build(path)
      .with_context(|| format!("failed to open log file `{}`", path.display()))?;
    builder = builder.appender(Appender::builder().build("file", Box::new(file)));
    root = root.appender("file");
  }

  builder
    .build(root.build(level))
    .context("invalid log configuration")
}

pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<log4rs::Handle> {
  log4rs::init_config(config(level, log_file)?).context("failed to install logger")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_with_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ordx.log");
    let config = config(LevelFilter::Debug, Some(path.as_path())).unwrap();
    assert_eq!(config.appenders().len(), 2);
    assert_eq!(config.root().level(), LevelFilter::Debug);
    assert!(path.exists());
  }

  #[test]
  fn test_config_without_file() {
    let config = config(LevelFilter::Info, None).unwrap();
    assert_eq!(config.appenders().len(), 1);
  }
}
