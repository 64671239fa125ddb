use {
  async_trait::async_trait,
  kudos_primitives::{
    decode_output,
    AbiError,
    Address,
    ContributionId,
    DecodedOutput,
  },
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("chain rpc failure: {0}")]
  Rpc(String),

  #[error("contract {0} is not deployed on this network")]
  UnknownContract(Address),

  #[error(transparent)]
  Abi(#[from] AbiError),
}

/// The wallet account currently selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub address: Address,

  /// Label given to the account by the wallet extension, if any.
  pub name: Option<String>,
}

impl Account {
  pub fn new(address: Address) -> Self {
    Self {
      address,
      name: None,
    }
  }
}

/// Proof that the wallet granted signing rights for the active account.
/// Read-only queries never use it, but a lookup is only meaningful
/// once the wallet session is fully established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
  pub source: String,
}

/// A live connection to a chain node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
  pub network: String,
  pub endpoint: String,
}

/// A deployed contract resolved by name for the connected network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
  pub name: String,
  pub address: Address,
}

/// Bytes returned from a dry-run contract call, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQueryResult(pub Vec<u8>);

/// Message options such as gas limit or storage deposit.
/// Lookups always use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {}

/// Everything the lookup workflow needs from a blockchain client and its
/// wallet session.
///
/// All session accessors may legitimately return `None` while the wallet
/// or the node connection are still being established. They resolve
/// independently of each other.
#[async_trait]
pub trait ChainClient: Send + Sync {
  async fn active_account(&self) -> Option<Account>;

  async fn active_signer(&self) -> Option<Signer>;

  async fn connection(&self) -> Option<Connection>;

  async fn contract(&self, name: &str) -> Option<ContractHandle>;

  /// Dry-runs a read-only contract message on behalf of `caller`.
  async fn query(
    &self,
    connection: &Connection,
    caller: &Address,
    contract: &ContractHandle,
    method: &str,
    options: QueryOptions,
    args: &[ContributionId],
  ) -> Result<RawQueryResult, Error>;

  /// Decodes a raw response using the contract abi for `method`.
  fn decode(
    &self,
    raw: &RawQueryResult,
    _contract: &ContractHandle,
    method: &str,
  ) -> Result<DecodedOutput, Error> {
    Ok(decode_output(&raw.0, method)?)
  }
}
