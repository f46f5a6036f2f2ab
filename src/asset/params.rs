pub const MAX_PRECISION: u32 = 18;

pub const DEFAULT_DUST_LIMIT: i64 = 330;
pub const DEFAULT_INSCRIPTION_FOOTPRINT: i64 = 330;

pub const PROTOCOL_NAME_ORDINALS: &str = "ordinals";
pub const PROTOCOL_NAME_ORDX: &str = "ordx";
pub const PROTOCOL_NAME_BRC20: &str = "brc20";
pub const PROTOCOL_NAME_RUNES: &str = "runes";

pub const ASSET_TYPE_NFT: &str = "n";
pub const ASSET_TYPE_FT: &str = "f";
pub const ASSET_TYPE_EXOTIC: &str = "e";
pub const ASSET_TYPE_NS: &str = "ns";

pub(super) const NAME_SEPARATOR: char = ':';
