use {
  serde::{de, Deserialize, Deserializer, Serialize, Serializer},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// Number of leading and trailing characters kept by [`Address::truncated`].
const TRUNCATED_EDGE: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid base58 encoding: {0}")]
  Encoding(#[from] bs58::decode::Error),

  #[error("expected a 32 byte account id, got {0} bytes")]
  InvalidLength(usize),
}

/// Represents an on-chain account id.
///
/// The same type is used for wallet accounts (the caller of a query, the
/// contributor recorded by the reward contract) and for deployed contracts.
/// Addresses are rendered and parsed as base58 strings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  /// Short form used wherever an address is shown to a person, for
  /// example `5Grwva…GKutQY` in toasts. Keeps the first and last
  /// few characters of the base58 rendering.
  pub fn truncated(&self) -> String {
    let full = self.to_string();
    if full.len() <= TRUNCATED_EDGE * 2 + 1 {
      return full;
    }
    // base58 output is ascii, slicing on byte offsets is safe.
    format!(
      "{}…{}",
      &full[..TRUNCATED_EDGE],
      &full[full.len() - TRUNCATED_EDGE..]
    )
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", bs58::encode(self.0).into_string())
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", bs58::encode(self.0).into_string())
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let decoded = bs58::decode(s.trim()).into_vec()?;
    let bytes: [u8; 32] = decoded
      .as_slice()
      .try_into()
      .map_err(|_| Error::InvalidLength(decoded.len()))?;
    Ok(Self(bytes))
  }
}

// Human readable formats (deployment files, snapshots) carry the base58
// string, binary formats (the contract abi) carry the raw 32 bytes.
impl Serialize for Address {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
      serializer.serialize_str(&self.to_string())
    } else {
      self.0.serialize(serializer)
    }
  }
}

impl<'de> Deserialize<'de> for Address {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    if deserializer.is_human_readable() {
      let s = String::deserialize(deserializer)?;
      s.parse().map_err(de::Error::custom)
    } else {
      <[u8; 32]>::deserialize(deserializer).map(Self)
    }
  }
}
