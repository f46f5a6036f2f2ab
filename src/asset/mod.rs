pub(super) mod decimal;
pub(super) mod display;
pub(super) mod error;
pub(super) mod info;
pub(super) mod name;
pub(super) mod offset;
pub mod params;
pub(super) mod pool;
pub(super) mod tx_assets;
pub(super) mod tx_output;
pub(super) mod utxo_id;

pub use self::{
  decimal::{assert_same_precision, Decimal},
  display::{DisplayAsset, SatAmount},
  error::{AssetError, DecimalError},
  info::AssetInfo,
  name::AssetName,
  offset::{AssetOffsets, OffsetRange},
  pool::TxPool,
  tx_assets::TxAssets,
  tx_output::{SatBindingMap, TxOutput},
  utxo_id::UtxoId,
};
