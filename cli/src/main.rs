use {
  crate::{
    console::ConsoleToasts,
    settings::{Command, SystemSettings},
    snapshot::Snapshot,
  },
  clap::Parser,
  kudos_client::{
    Account,
    ContributionLookup,
    Deployments,
    MemoryChain,
    PageUrl,
    Signer,
  },
  kudos_primitives::{default_bounties, extract_address, Address},
  std::collections::BTreeMap,
  tracing::{info, subscriber::set_global_default, warn},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
  url::Url,
};

mod console;
mod settings;
mod snapshot;

/// Assembles the wallet session and contract view described by the
/// settings. Missing pieces stay missing, the lookup reports them.
fn connect(
  settings: &SystemSettings,
  contract: &str,
) -> anyhow::Result<MemoryChain> {
  let chain = MemoryChain::default();
  if let Some(address) = settings.account() {
    chain.set_account(Some(Account::new(address)));
    if settings.has_signer() {
      chain.set_signer(Some(Signer {
        source: "kudos-cli".into(),
      }));
    }
  }

  let Some(path) = settings.snapshot() else {
    warn!("no chain snapshot given, lookups have no node connection");
    return Ok(chain);
  };

  let snapshot = Snapshot::load(path)?;
  if snapshot.network != settings.network() {
    warn!(
      "snapshot was captured on {} but network {} is selected",
      snapshot.network,
      settings.network()
    );
  }
  chain.set_connection(Some(snapshot.connection()));

  let deployments = Deployments::open(settings.deployments_dir());
  match deployments.address(contract, settings.network())? {
    Some(address) => {
      info!("{contract} contract at {address}");
      chain.register_contract(contract, address);
      snapshot.populate(&chain, address);
    }
    None => warn!(
      "{contract} is not deployed on {} according to {}",
      settings.network(),
      deployments.dir().display()
    ),
  }

  Ok(chain)
}

async fn check(
  settings: &SystemSettings,
  contribution_id: Option<&str>,
  url: &Url,
  contract: &str,
) -> anyhow::Result<()> {
  let lookup = ContributionLookup::new(
    connect(settings, contract)?,
    ConsoleToasts::new(settings.json()),
    PageUrl::new(url.clone()),
  )
  .with_contract_name(contract)
  .with_notification_duration(settings.toast_duration());

  // the whole session is resolved before mounting, so a single
  // evaluation settles the url-seeded lookup.
  lookup.on_inputs_changed().await;

  if let Some(input) = contribution_id {
    lookup.submit_input(input).await?;
  } else if !lookup.state().has_auto_triggered {
    info!("nothing to check, pass an issue number or a url with one");
  }

  println!("{}", lookup.url().current());
  Ok(())
}

fn bounties(account: Option<Address>) -> anyhow::Result<()> {
  for bounty in default_bounties() {
    println!("{}", bounty.title());
    println!("  project:    {}", bounty.project_link()?);
    println!("  task:       {}", bounty.issue_title);
    println!("  contribute: {}", bounty.contribute_url(account.as_ref())?);
  }
  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  // configure logging, stdout is reserved for command output
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_writer(std::io::stderr)
      .finish(),
  )?;

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  match settings.subcommand() {
    Command::Check {
      contribution_id,
      url,
      contract,
    } => check(&settings, contribution_id.as_deref(), url, contract).await,
    Command::Bounties => bounties(settings.account()),
    Command::ExtractAddress { body } => {
      println!("{}", extract_address(body).unwrap_or("No address found"));
      Ok(())
    }
    Command::RecordDeployment { contract, address } => {
      Deployments::open(settings.deployments_dir()).write(
        settings.network(),
        &BTreeMap::from([(contract.clone(), *address)]),
      )?;
      Ok(())
    }
  }
}
