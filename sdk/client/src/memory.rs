use {
  crate::chain::{
    Account,
    ChainClient,
    Connection,
    ContractHandle,
    Error,
    QueryOptions,
    RawQueryResult,
    Signer,
  },
  async_trait::async_trait,
  kudos_primitives::{
    encode_response,
    Address,
    Contribution,
    ContributionId,
    DispatchError,
    GET_CONTRIBUTOR,
  },
  parking_lot::Mutex,
  std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
  },
  tracing::debug,
};

#[derive(Debug, Default)]
struct Session {
  account: Option<Account>,
  signer: Option<Signer>,
  connection: Option<Connection>,
}

#[derive(Debug, Default)]
struct Ledger {
  contracts: HashMap<String, ContractHandle>,
  contributions: HashMap<(Address, ContributionId), Contribution>,
  dispatch_errors: HashMap<(Address, ContributionId), DispatchError>,
  raw_overrides: HashMap<(Address, ContributionId), Vec<u8>>,
  rpc_failure: Option<String>,
}

/// A chain client that keeps the wallet session and the reward contract
/// records in memory.
///
/// Used for offline snapshots and tests. It answers queries from recorded
/// approvals only and does not run any contract code. Session pieces can
/// be set or cleared one at a time to mimic a wallet that connects
/// gradually.
#[derive(Debug, Default)]
pub struct MemoryChain {
  session: Mutex<Session>,
  ledger: Mutex<Ledger>,
  queries: AtomicUsize,
}

impl MemoryChain {
  pub fn set_account(&self, account: Option<Account>) {
    self.session.lock().account = account;
  }

  pub fn set_signer(&self, signer: Option<Signer>) {
    self.session.lock().signer = signer;
  }

  pub fn set_connection(&self, connection: Option<Connection>) {
    self.session.lock().connection = connection;
  }

  pub fn register_contract(&self, name: impl Into<String>, address: Address) {
    let name = name.into();
    self
      .ledger
      .lock()
      .contracts
      .insert(name.clone(), ContractHandle { name, address });
  }

  pub fn unregister_contract(&self, name: &str) {
    self.ledger.lock().contracts.remove(name);
  }

  pub fn record_contribution(
    &self,
    contract: Address,
    contribution: Contribution,
  ) {
    self
      .ledger
      .lock()
      .contributions
      .insert((contract, contribution.id), contribution);
  }

  /// Makes every query for `id` fail at the runtime level.
  pub fn fail_dispatch(
    &self,
    contract: Address,
    id: ContributionId,
    error: DispatchError,
  ) {
    self
      .ledger
      .lock()
      .dispatch_errors
      .insert((contract, id), error);
  }

  /// Replaces the encoded response for `id` with arbitrary bytes.
  pub fn respond_raw(&self, contract: Address, id: ContributionId, raw: Vec<u8>) {
    self.ledger.lock().raw_overrides.insert((contract, id), raw);
  }

  /// While set, every query fails before reaching the node.
  pub fn fail_rpc(&self, reason: Option<String>) {
    self.ledger.lock().rpc_failure = reason;
  }

  /// Number of `query` calls received so far, including failed ones.
  pub fn query_count(&self) -> usize {
    self.queries.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ChainClient for MemoryChain {
  async fn active_account(&self) -> Option<Account> {
    self.session.lock().account.clone()
  }

  async fn active_signer(&self) -> Option<Signer> {
    self.session.lock().signer.clone()
  }

  async fn connection(&self) -> Option<Connection> {
    self.session.lock().connection.clone()
  }

  async fn contract(&self, name: &str) -> Option<ContractHandle> {
    self.ledger.lock().contracts.get(name).cloned()
  }

  async fn query(
    &self,
    connection: &Connection,
    caller: &Address,
    contract: &ContractHandle,
    method: &str,
    _options: QueryOptions,
    args: &[ContributionId],
  ) -> Result<RawQueryResult, Error> {
    self.queries.fetch_add(1, Ordering::SeqCst);
    debug!(
      "dry-run {method}{args:?} on {} as {caller} via {}",
      contract.address, connection.endpoint
    );

    let ledger = self.ledger.lock();
    if let Some(reason) = &ledger.rpc_failure {
      return Err(Error::Rpc(reason.clone()));
    }

    if !ledger
      .contracts
      .values()
      .any(|c| c.address == contract.address)
    {
      return Err(Error::UnknownContract(contract.address));
    }

    if method != GET_CONTRIBUTOR {
      return Err(Error::Rpc(format!("contract has no message {method}")));
    }

    let id = match args {
      [id] => *id,
      _ => {
        return Err(Error::Rpc(format!(
          "{method} expects 1 argument, got {}",
          args.len()
        )))
      }
    };

    let key = (contract.address, id);
    if let Some(raw) = ledger.raw_overrides.get(&key) {
      return Ok(RawQueryResult(raw.clone()));
    }

    let response = match ledger.dispatch_errors.get(&key) {
      Some(error) => Err(error.clone()),
      None => Ok(Ok(ledger.contributions.get(&key).map(|c| c.contributor))),
    };

    Ok(RawQueryResult(encode_response(&response)?))
  }
}

#[cfg(test)]
mod tests {
  use {
    super::MemoryChain,
    crate::chain::{ChainClient, Connection, QueryOptions},
    kudos_primitives::{
      Address,
      Contribution,
      ContributionId,
      DispatchError,
      GET_CONTRIBUTOR,
    },
  };

  fn connection() -> Connection {
    Connection {
      network: "development".into(),
      endpoint: "memory://".into(),
    }
  }

  #[tokio::test]
  async fn answers_from_recorded_contributions() -> anyhow::Result<()> {
    let chain = MemoryChain::default();
    let demo = Address::new([1u8; 32]);
    let bob = Address::new([2u8; 32]);
    let id = ContributionId::new(5)?;
    chain.register_contract("demo", demo);
    chain.record_contribution(demo, Contribution {
      id,
      contributor: bob,
      claimed: false,
    });

    let contract = chain.contract("demo").await.unwrap();
    let raw = chain
      .query(
        &connection(),
        &bob,
        &contract,
        GET_CONTRIBUTOR,
        QueryOptions::default(),
        &[id],
      )
      .await?;
    let decoded = chain.decode(&raw, &contract, GET_CONTRIBUTOR)?;
    assert_eq!(decoded.output, Some(bob));

    let raw = chain
      .query(
        &connection(),
        &bob,
        &contract,
        GET_CONTRIBUTOR,
        QueryOptions::default(),
        &[ContributionId::new(6)?],
      )
      .await?;
    assert_eq!(chain.decode(&raw, &contract, GET_CONTRIBUTOR)?.output, None);
    assert_eq!(chain.query_count(), 2);
    Ok(())
  }

  #[tokio::test]
  async fn scripted_dispatch_errors_decode_as_errors() -> anyhow::Result<()> {
    let chain = MemoryChain::default();
    let demo = Address::new([1u8; 32]);
    let id = ContributionId::new(7)?;
    chain.register_contract("demo", demo);
    chain.fail_dispatch(demo, id, DispatchError::ContractTrapped);

    let contract = chain.contract("demo").await.unwrap();
    let raw = chain
      .query(
        &connection(),
        &demo,
        &contract,
        GET_CONTRIBUTOR,
        QueryOptions::default(),
        &[id],
      )
      .await?;
    let decoded = chain.decode(&raw, &contract, GET_CONTRIBUTOR)?;
    assert!(decoded.is_error);
    assert_eq!(decoded.decoded_output, "ContractTrapped");
    Ok(())
  }

  #[tokio::test]
  async fn rpc_failures_and_unknown_messages_are_errors() -> anyhow::Result<()>
  {
    let chain = MemoryChain::default();
    let demo = Address::new([1u8; 32]);
    let id = ContributionId::new(7)?;
    chain.register_contract("demo", demo);
    let contract = chain.contract("demo").await.unwrap();

    assert!(chain
      .query(&connection(), &demo, &contract, "claim", Default::default(), &[
        id
      ])
      .await
      .is_err());

    chain.fail_rpc(Some("node went away".into()));
    assert!(chain
      .query(
        &connection(),
        &demo,
        &contract,
        GET_CONTRIBUTOR,
        Default::default(),
        &[id]
      )
      .await
      .is_err());
    assert_eq!(chain.query_count(), 2);
    Ok(())
  }
}
