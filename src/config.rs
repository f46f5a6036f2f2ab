use super::*;
use crate::asset::params::{DEFAULT_DUST_LIMIT, DEFAULT_INSCRIPTION_FOOTPRINT};

pub(crate) static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Policy knobs of the engine. Everything else about the arithmetic is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Smallest value an output may keep and still be spendable.
  pub dust_limit: i64,
  /// Sats reserved behind an inscription-bound satoshi when carving it out.
  pub inscription_footprint: i64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      dust_limit: DEFAULT_DUST_LIMIT,
      inscription_footprint: DEFAULT_INSCRIPTION_FOOTPRINT,
    }
  }
}

impl Config {
  pub fn load(path: &Path) -> Result<Self> {
    let file = File::open(path)
      .with_context(|| format!("failed to open config file `{}`", path.display()))?;
    let config: Self = serde_yaml::from_reader(file)
      .with_context(|| format!("failed to deserialize config file `{}`", path.display()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_yaml(yaml: &str) -> Result<Self> {
    let config: Self = serde_yaml::from_str(yaml).context("failed to deserialize config")?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result {
    if self.dust_limit < 0 {
      bail!("dust limit must not be negative: {}", self.dust_limit);
    }
    if self.inscription_footprint <= 0 {
      bail!(
        "inscription footprint must be positive: {}",
        self.inscription_footprint
      );
    }
    Ok(())
  }
}
