use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Packs `(height, tx index, output index)` into 64 bits:
/// `height << 32 | tx_index << 16 | vout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtxoId(u64);

impl UtxoId {
  pub fn new(height: u32, tx_index: u16, vout: u16) -> Self {
    Self(u64::from(height) << 32 | u64::from(tx_index) << 16 | u64::from(vout))
  }

  #[allow(clippy::cast_possible_truncation)]
  pub fn components(self) -> (u32, u16, u16) {
    (
      (self.0 >> 32) as u32,
      (self.0 >> 16) as u16,
      self.0 as u16,
    )
  }

  pub fn height(self) -> u32 {
    self.components().0
  }

  pub fn to_u64(self) -> u64 {
    self.0
  }
}

impl From<u64> for UtxoId {
  fn from(id: u64) -> Self {
    Self(id)
  }
}

impl Display for UtxoId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let (height, tx_index, vout) = self.components();
    write!(f, "{height}:{tx_index}:{vout}")
  }
}
