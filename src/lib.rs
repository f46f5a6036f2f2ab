#![allow(
  clippy::too_many_arguments,
  clippy::type_complexity,
  clippy::result_large_err
)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  anyhow::{bail, Context, Error},
  once_cell::sync::Lazy,
  serde::{Deserialize, Serialize},
  std::{fs::File, path::Path},
};

pub use crate::{
  asset::{
    AssetError, AssetInfo, AssetName, AssetOffsets, Decimal, DecimalError, DisplayAsset,
    OffsetRange, SatAmount, SatBindingMap, TxAssets, TxOutput, TxPool, UtxoId,
  },
  config::Config,
};

pub mod asset;
mod config;
pub mod logger;

type Result<T = (), E = Error> = std::result::Result<T, E>;
