use {
  kudos_client::{Connection, MemoryChain},
  kudos_primitives::{Address, Contribution, ContributionId, DispatchError},
  serde::Deserialize,
  std::{collections::BTreeMap, path::Path},
};

/// Offline stand-in for a node: reward contract records captured from a
/// chain, plus the endpoint they were captured from.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
  pub network: String,
  pub endpoint: String,

  #[serde(default)]
  pub contributions: Vec<Contribution>,

  /// Issues whose queries fail at the runtime level, keyed by issue number.
  #[serde(default)]
  pub failures: BTreeMap<ContributionId, DispatchError>,
}

impl Snapshot {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
  }

  pub fn connection(&self) -> Connection {
    Connection {
      network: self.network.clone(),
      endpoint: self.endpoint.clone(),
    }
  }

  /// Loads the recorded state of the contract deployed at `contract`.
  pub fn populate(&self, chain: &MemoryChain, contract: Address) {
    for contribution in &self.contributions {
      chain.record_contribution(contract, *contribution);
    }
    for (id, error) in &self.failures {
      chain.fail_dispatch(contract, *id, error.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::Snapshot,
    kudos_client::{
      Account,
      ChainClient,
      MemoryChain,
      QueryOptions,
      Signer,
      CONTRACT_NAME,
    },
    kudos_primitives::{Address, ContributionId, GET_CONTRIBUTOR},
  };

  #[tokio::test]
  async fn populated_chain_answers_queries() -> anyhow::Result<()> {
    let bob = Address::new([2u8; 32]);
    let demo = Address::new([9u8; 32]);
    let json = format!(
      r#"{{
        "network": "development",
        "endpoint": "ws://127.0.0.1:9944",
        "contributions": [
          {{ "id": 42, "contributor": "{bob}", "claimed": false }}
        ],
        "failures": {{ "7": "ContractTrapped" }}
      }}"#
    );
    let snapshot: Snapshot = serde_json::from_str(&json)?;

    let chain = MemoryChain::default();
    chain.set_account(Some(Account::new(bob)));
    chain.set_signer(Some(Signer {
      source: "test".into(),
    }));
    chain.register_contract(CONTRACT_NAME, demo);
    snapshot.populate(&chain, demo);

    let contract = chain.contract(CONTRACT_NAME).await.unwrap();
    let query = |id: u64| {
      let contract = contract.clone();
      let chain = &chain;
      let connection = snapshot.connection();
      async move {
        let raw = chain
          .query(
            &connection,
            &bob,
            &contract,
            GET_CONTRIBUTOR,
            QueryOptions::default(),
            &[ContributionId::new(id)?],
          )
          .await?;
        anyhow::Ok(chain.decode(&raw, &contract, GET_CONTRIBUTOR)?)
      }
    };

    assert_eq!(query(42).await?.output, Some(bob));
    assert_eq!(query(43).await?.output, None);
    assert_eq!(query(7).await?.decoded_output, "ContractTrapped");
    Ok(())
  }
}
