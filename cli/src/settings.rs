use {
  clap::{Parser, Subcommand},
  humantime::Duration,
  kudos_client::{DEFAULT_DEPLOYMENTS_DIR, DEFAULT_NETWORK},
  kudos_primitives::Address,
  std::path::{Path, PathBuf},
  url::Url,
};

/// kudos ink! contribution checker
///
/// Checks whether a GitHub contribution has been approved by the kudos
/// reward contract and lists the bounties that are open for contributors.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct SystemSettings {
  /// Chain identifier that selects which deployment to talk to
  #[clap(short, long,
    env = "KUDOS_NETWORK",
    default_value = DEFAULT_NETWORK,
    value_name = "IDENTIFIER")]
  network: String,

  /// Directory holding `{contract}/{network}.json` deployment files
  #[clap(short, long,
    env = "KUDOS_DEPLOYMENTS",
    default_value = DEFAULT_DEPLOYMENTS_DIR,
    value_name = "DIR")]
  deployments: PathBuf,

  /// Offline chain snapshot (JSON) answering contract queries
  #[clap(short, long, env = "KUDOS_SNAPSHOT", value_name = "FILE")]
  snapshot: Option<PathBuf>,

  /// Wallet account performing the lookup
  #[clap(short, long, env = "KUDOS_ACCOUNT", value_name = "ADDRESS")]
  account: Option<Address>,

  /// Treat the account as watch-only, no signer is available for it
  #[clap(long)]
  watch_only: bool,

  /// How long notifications stay visible
  #[clap(long,
    value_name = "DURATION",
    default_value = "9s")]
  toast_duration: Duration,

  /// Print notifications as JSON lines instead of text
  #[clap(long)]
  json: bool,

  #[clap(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Check the approval status of a contribution
  Check {
    /// GitHub issue number, submitted explicitly
    contribution_id: Option<String>,

    /// Page address; its `contributionId` parameter is looked up on load
    #[clap(long,
      value_name = "URL",
      default_value = "https://kudos.ink/check")]
    url: Url,

    /// Name of the reward contract in the deployment registry
    #[clap(long, default_value = kudos_client::CONTRACT_NAME)]
    contract: String,
  },

  /// List open bounties with links to contribute
  Bounties,

  /// Print the public address filled into a bounty issue body
  ExtractAddress {
    /// Issue body text
    body: String,
  },

  /// Record the address of a deployed contract for the selected network
  RecordDeployment {
    /// Contract name
    #[clap(long, default_value = kudos_client::CONTRACT_NAME)]
    contract: String,

    /// Deployed contract address
    address: Address,
  },
}

impl SystemSettings {
  pub fn network(&self) -> &str {
    &self.network
  }

  pub fn deployments_dir(&self) -> &Path {
    &self.deployments
  }

  pub fn snapshot(&self) -> Option<&Path> {
    self.snapshot.as_deref()
  }

  pub fn account(&self) -> Option<Address> {
    self.account
  }

  /// A signer exists whenever an account is given, unless it is
  /// explicitly watch-only.
  pub fn has_signer(&self) -> bool {
    self.account.is_some() && !self.watch_only
  }

  pub fn toast_duration(&self) -> std::time::Duration {
    self.toast_duration.into()
  }

  pub fn json(&self) -> bool {
    self.json
  }

  pub fn subcommand(&self) -> &Command {
    &self.command
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{Command, SystemSettings},
    clap::{CommandFactory, Parser},
    std::time::Duration,
  };

  #[test]
  fn cli_definition_is_consistent() {
    SystemSettings::command().debug_assert();
  }

  #[test]
  fn defaults() {
    let settings = SystemSettings::parse_from(["kudos", "bounties"]);
    assert_eq!(settings.toast_duration(), Duration::from_secs(9));
    assert!(!settings.has_signer());
    assert!(matches!(settings.subcommand(), Command::Bounties));
  }

  #[test]
  fn check_with_explicit_id() {
    let account = kudos_primitives::Address::new([4u8; 32]).to_string();
    let settings = SystemSettings::parse_from([
      "kudos",
      "--account",
      account.as_str(),
      "check",
      "42",
    ]);
    assert!(settings.has_signer());
    match settings.subcommand() {
      Command::Check {
        contribution_id,
        url,
        contract,
      } => {
        assert_eq!(contribution_id.as_deref(), Some("42"));
        assert_eq!(url.as_str(), "https://kudos.ink/check");
        assert_eq!(contract, "demo");
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn watch_only_has_no_signer() {
    let account = kudos_primitives::Address::new([4u8; 32]).to_string();
    let settings = SystemSettings::parse_from([
      "kudos",
      "--account",
      account.as_str(),
      "--watch-only",
      "bounties",
    ]);
    assert!(!settings.has_signer());
  }

  #[test]
  fn check_against_another_contract() {
    let settings =
      SystemSettings::parse_from(["kudos", "check", "--contract", "rewards"]);
    match settings.subcommand() {
      Command::Check {
        contribution_id,
        contract,
        ..
      } => {
        assert_eq!(contribution_id, &None);
        assert_eq!(contract, "rewards");
      }
      other => panic!("unexpected command {other:?}"),
    }
  }
}
