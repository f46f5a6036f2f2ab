use super::{AssetName, Decimal};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecimalError {
  #[error("invalid number: {0}")]
  InvalidNum(String),

  #[error("precision {precision} exceeds the maximum of {max}")]
  PrecisionTooLarge { precision: u32, max: u32 },

  #[error("{op} overflow: original: {org}, other: {other}")]
  Overflow {
    op: String,
    org: String,
    other: String,
  },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssetError {
  #[error("invalid asset name '{0}'")]
  InvalidAssetName(String),

  #[error("invalid amount {0}")]
  InvalidAmount(Decimal),

  #[error("asset {0} not found")]
  AssetNotFound(AssetName),

  #[error("insufficient {name}: have {have}, need {need}")]
  InsufficientAsset {
    name: AssetName,
    have: Decimal,
    need: Decimal,
  },

  #[error("no offsets recorded for asset {0}")]
  OffsetNotFound(AssetName),

  #[error("offset {offset} is outside of output value {value}")]
  OffsetTooLarge { offset: i64, value: i64 },

  #[error("invalid offset {0}")]
  InvalidOffset(i64),

  #[error("splitting an output with {0} assets is not supported")]
  MultipleAssetsUnsupported(usize),

  #[error("output carries more than one unbound asset")]
  MultipleUnboundAssets,

  #[error("{amount} of {name} can not be split off at any valid cut point")]
  NoAccurateSplit { name: AssetName, amount: Decimal },

  #[error("asset {0} is marked invalid")]
  InvalidAssetState(AssetName),

  #[error("value {value} is below the dust limit {dust}")]
  BelowDustLimit { value: i64, dust: i64 },

  #[error("either a value or an amount must be given")]
  InvalidSplitRequest,

  #[error("output value overflow")]
  ValueOverflow,

  #[error("decimal error: {0}")]
  Decimal(DecimalError),
}

impl From<DecimalError> for AssetError {
  fn from(e: DecimalError) -> Self {
    Self::Decimal(e)
  }
}
