use super::{AssetName, OffsetRange, TxOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatAmount {
  pub offset: i64,
  pub amount: String,
}

/// Flat, JSON-ready view of one asset on an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAsset {
  pub asset_name: AssetName,
  pub amount: String,
  pub binding_sat: u32,
  pub offsets: Vec<OffsetRange>,
  pub sat_amounts: Vec<SatAmount>,
  pub invalid: bool,
}

impl TxOutput {
  pub fn to_display(&self) -> Vec<DisplayAsset> {
    self
      .assets
      .iter()
      .map(|info| DisplayAsset {
        asset_name: info.name.clone(),
        amount: info.amount.to_string(),
        binding_sat: info.binding_sat,
        offsets: self
          .offsets
          .get(&info.name)
          .map(|offsets| offsets.ranges().to_vec())
          .unwrap_or_default(),
        sat_amounts: self
          .sat_binding_map
          .iter()
          .filter(|(_, bound)| bound.name == info.name)
          .map(|(offset, bound)| SatAmount {
            offset: *offset,
            amount: bound.amount.to_string(),
          })
          .collect(),
        invalid: self.is_invalid(&info.name),
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asset::{AssetInfo, AssetOffsets, Decimal};

  #[test]
  fn test_to_display() {
    let mut output = TxOutput::new(1000);
    output
      .add_bound_asset(
        AssetInfo::new(AssetName::ordx_ft("pearl"), Decimal::from_int(300, 0), 1),
        AssetOffsets::from_ranges([OffsetRange::new(0, 300)]),
      )
      .unwrap();
    output
      .bind_sat(
        500,
        AssetInfo::new(AssetName::brc20("ordi"), Decimal::from_int(1250, 2), 0),
      )
      .unwrap();
    output.mark_invalid(AssetName::brc20("ordi"));

    let display = output.to_display();
    assert_eq!(
      display,
      vec![
        DisplayAsset {
          asset_name: AssetName::brc20("ordi"),
          amount: "12.5".to_string(),
          binding_sat: 0,
          offsets: vec![OffsetRange::new(500, 501)],
          sat_amounts: vec![SatAmount {
            offset: 500,
            amount: "12.5".to_string(),
          }],
          invalid: true,
        },
        DisplayAsset {
          asset_name: AssetName::ordx_ft("pearl"),
          amount: "300".to_string(),
          binding_sat: 1,
          offsets: vec![OffsetRange::new(0, 300)],
          sat_amounts: Vec::new(),
          invalid: false,
        },
      ]
    );

    assert_eq!(
      serde_json::to_value(&display[0]).unwrap(),
      serde_json::json!({
        "asset_name": "brc20:f:ordi",
        "amount": "12.5",
        "binding_sat": 0,
        "offsets": [{ "start": 500, "end": 501 }],
        "sat_amounts": [{ "offset": 500, "amount": "12.5" }],
        "invalid": true
      })
    );
  }
}
