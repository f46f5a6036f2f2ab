use super::{error::AssetError, params::*};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
  fmt::{Display, Formatter},
  str::FromStr,
};

/// Identity of an asset. The same ticker string under two protocols, or two
/// asset types, names two different assets.
///
/// Ordered by protocol, then asset type, then ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetName {
  pub protocol: String,
  pub asset_type: String,
  pub ticker: String,
}

impl AssetName {
  pub fn new(protocol: &str, asset_type: &str, ticker: &str) -> Self {
    Self {
      protocol: protocol.to_string(),
      asset_type: asset_type.to_string(),
      ticker: ticker.to_string(),
    }
  }

  /// Ordinary bitcoin value, no asset.
  pub fn plain_sat() -> Self {
    Self::default()
  }

  pub fn is_plain_sat(&self) -> bool {
    self.protocol.is_empty() && self.asset_type.is_empty() && self.ticker.is_empty()
  }

  pub fn ordinals(ticker: &str) -> Self {
    Self::new(PROTOCOL_NAME_ORDINALS, ASSET_TYPE_NFT, ticker)
  }

  pub fn ordx_ft(ticker: &str) -> Self {
    Self::new(PROTOCOL_NAME_ORDX, ASSET_TYPE_FT, ticker)
  }

  pub fn brc20(ticker: &str) -> Self {
    Self::new(PROTOCOL_NAME_BRC20, ASSET_TYPE_FT, ticker)
  }

  pub fn runes(ticker: &str) -> Self {
    Self::new(PROTOCOL_NAME_RUNES, ASSET_TYPE_FT, ticker)
  }
}

impl Display for AssetName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}{NAME_SEPARATOR}{}{NAME_SEPARATOR}{}",
      self.protocol, self.asset_type, self.ticker
    )
  }
}

impl FromStr for AssetName {
  type Err = AssetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.splitn(3, NAME_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
      (Some(protocol), Some(asset_type), Some(ticker)) => {
        Ok(Self::new(protocol, asset_type, ticker))
      }
      _ => Err(AssetError::InvalidAssetName(s.to_string())),
    }
  }
}

impl Serialize for AssetName {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    self.to_string().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for AssetName {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Self::from_str(&String::deserialize(deserializer)?)
      .map_err(|e| de::Error::custom(format!("deserialize asset name error: {}", e)))
  }
}
