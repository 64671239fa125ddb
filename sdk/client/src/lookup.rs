use {
  crate::{
    chain::{
      Account,
      ChainClient,
      Connection,
      ContractHandle,
      Error as ChainError,
      QueryOptions,
    },
    form::LookupForm,
    location::{UrlState, CONTRIBUTION_PARAM},
    notify::{Notification, NotificationSink, DEFAULT_DURATION},
    trigger::{AutoTrigger, Fire, Readiness},
  },
  kudos_primitives::{
    Address,
    ContributionId,
    DecodedOutput,
    ValidationError,
    GET_CONTRIBUTOR,
  },
  metrics::increment_counter,
  std::{cell::Cell, time::Duration},
  tracing::{debug, error, info, warn},
};

/// Name under which the reward contract is registered for each network.
pub const CONTRACT_NAME: &str = "demo";

/// Classification of a completed contribution status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The query succeeded but no contributor is recorded for the issue.
  NotYetApproved,

  /// A contributor is recorded. `is_self` is true when it is the account
  /// that asked.
  Approved { contributor: Address, is_self: bool },

  /// The runtime or the contract reported an error.
  QueryFailed { message: String },
}

impl Outcome {
  pub fn classify(decoded: DecodedOutput, caller: &Address) -> Self {
    if decoded.is_error {
      return Outcome::QueryFailed {
        message: decoded.decoded_output,
      };
    }

    match decoded.output {
      None => Outcome::NotYetApproved,
      Some(contributor) => Outcome::Approved {
        is_self: &contributor == caller,
        contributor,
      },
    }
  }

  fn label(&self) -> &'static str {
    match self {
      Outcome::NotYetApproved => "not_yet_approved",
      Outcome::Approved { .. } => "approved",
      Outcome::QueryFailed { .. } => "query_failed",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRequest {
  pub contribution_id: ContributionId,
}

impl LookupRequest {
  pub fn new(contribution_id: ContributionId) -> Self {
    Self { contribution_id }
  }
}

/// Observable UI state of a lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupState {
  pub is_loading: bool,
  pub has_auto_triggered: bool,
}

/// What started a lookup. Only explicit submissions are written back to
/// the page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
  Submitted,
  Auto,
}

enum Cycle {
  /// A prerequisite was missing, the chain was not called.
  ShortCircuited,
  Completed(Option<Outcome>),
}

struct Prerequisites {
  account: Account,
  connection: Connection,
  contract: ContractHandle,
}

/// Sets the loading flag for as long as it is alive. Clearing happens on
/// drop so it also covers early returns and futures dropped mid-flight.
struct Loading<'a>(&'a Cell<bool>);

impl<'a> Loading<'a> {
  fn start(flag: &'a Cell<bool>) -> Self {
    flag.set(true);
    Self(flag)
  }
}

impl Drop for Loading<'_> {
  fn drop(&mut self) {
    self.0.set(false);
  }
}

/// Checks whether a contribution has been approved by the reward contract
/// and reports the answer through the notification sink.
///
/// One instance corresponds to one mounted check page. Creating it reads
/// the contribution id from the page URL; [`Self::on_inputs_changed`] must
/// then be called whenever the wallet session or contract availability
/// changes so that this id gets looked up once everything is in place.
///
/// Lookups take `&self`. Two lookups started on the same instance are not
/// serialized: whichever finishes last determines the loading flag and
/// the form contents.
pub struct ContributionLookup<C, N, U> {
  chain: C,
  sink: N,
  url: U,
  contract_name: String,
  duration: Duration,
  form: LookupForm,
  loading: Cell<bool>,
  auto: Cell<AutoTrigger>,
}

impl<C, N, U> ContributionLookup<C, N, U>
where
  C: ChainClient,
  N: NotificationSink,
  U: UrlState,
{
  pub fn new(chain: C, sink: N, url: U) -> Self {
    let auto = AutoTrigger::on_mount(url.param(CONTRIBUTION_PARAM).as_deref());
    debug!("mounted contribution lookup, auto trigger: {auto:?}");

    Self {
      chain,
      sink,
      url,
      contract_name: CONTRACT_NAME.into(),
      duration: DEFAULT_DURATION,
      form: LookupForm::default(),
      loading: Cell::new(false),
      auto: Cell::new(auto),
    }
  }

  pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
    self.contract_name = name.into();
    self
  }

  pub fn with_notification_duration(mut self, duration: Duration) -> Self {
    self.duration = duration;
    self
  }

  pub fn chain(&self) -> &C {
    &self.chain
  }

  pub fn sink(&self) -> &N {
    &self.sink
  }

  pub fn url(&self) -> &U {
    &self.url
  }

  pub fn form(&self) -> &LookupForm {
    &self.form
  }

  pub fn state(&self) -> LookupState {
    LookupState {
      is_loading: self.loading.get(),
      has_auto_triggered: self.auto.get().has_fired(),
    }
  }

  /// The submit control is enabled only for a valid id and while no
  /// lookup is in flight.
  pub fn can_submit(&self) -> bool {
    !self.loading.get() && self.form.is_valid()
  }

  /// Submits whatever is currently typed in the form.
  pub async fn submit(&self) -> Result<Option<Outcome>, ValidationError> {
    let id = self.form.validate()?;
    Ok(self.run(LookupRequest::new(id), Trigger::Submitted).await)
  }

  /// Types `input` into the form and submits it.
  pub async fn submit_input(
    &self,
    input: &str,
  ) -> Result<Option<Outcome>, ValidationError> {
    self.form.set_input(input);
    self.submit().await
  }

  /// Runs one lookup cycle.
  ///
  /// Returns `None` when no outcome was produced, either because a
  /// prerequisite was missing (a connectivity notification is shown) or
  /// because the query failed unexpectedly (logged only).
  pub async fn run(
    &self,
    request: LookupRequest,
    trigger: Trigger,
  ) -> Option<Outcome> {
    match self.cycle(request, trigger).await {
      Cycle::ShortCircuited => None,
      Cycle::Completed(outcome) => outcome,
    }
  }

  /// Re-evaluates the auto trigger against the current session and runs
  /// the URL-seeded lookup if it fires.
  pub async fn on_inputs_changed(&self) -> Option<Outcome> {
    let readiness = self.readiness().await;
    let (next, fire) = self.auto.get().transition(readiness);
    self.auto.set(next);

    let Fire(id) = fire?;
    info!("auto-triggering lookup of contribution {id} from page url");
    match self.cycle(LookupRequest::new(id), Trigger::Auto).await {
      Cycle::ShortCircuited => {
        // the session changed under us, try again on the next change.
        self.auto.set(AutoTrigger::Waiting(id));
        None
      }
      Cycle::Completed(outcome) => outcome,
    }
  }

  async fn readiness(&self) -> Readiness {
    Readiness {
      account: self.chain.active_account().await.is_some(),
      signer: self.chain.active_signer().await.is_some(),
      connection: self.chain.connection().await.is_some(),
      contract: self.chain.contract(&self.contract_name).await.is_some(),
    }
  }

  async fn prerequisites(&self) -> Option<Prerequisites> {
    let account = self.chain.active_account().await;
    let signer = self.chain.active_signer().await;
    let connection = self.chain.connection().await;
    let contract = self.chain.contract(&self.contract_name).await;

    match (account, signer, connection, contract) {
      (Some(account), Some(_), Some(connection), Some(contract)) => {
        Some(Prerequisites {
          account,
          connection,
          contract,
        })
      }
      (account, signer, connection, contract) => {
        warn!(
          "lookup prerequisites missing: account={} signer={} \
           connection={} contract={}",
          account.is_some(),
          signer.is_some(),
          connection.is_some(),
          contract.is_some()
        );
        None
      }
    }
  }

  async fn query(
    &self,
    prereqs: &Prerequisites,
    id: ContributionId,
  ) -> Result<DecodedOutput, ChainError> {
    let raw = self
      .chain
      .query(
        &prereqs.connection,
        &prereqs.account.address,
        &prereqs.contract,
        GET_CONTRIBUTOR,
        QueryOptions::default(),
        &[id],
      )
      .await?;
    self.chain.decode(&raw, &prereqs.contract, GET_CONTRIBUTOR)
  }

  async fn cycle(&self, request: LookupRequest, trigger: Trigger) -> Cycle {
    let id = request.contribution_id;
    let Some(prereqs) = self.prerequisites().await else {
      self
        .sink
        .show(Notification::connectivity().with_duration(self.duration));
      return Cycle::ShortCircuited;
    };

    let _loading = Loading::start(&self.loading);
    let outcome = match self.query(&prereqs, id).await {
      Ok(decoded) => Outcome::classify(decoded, &prereqs.account.address),
      Err(e) => {
        error!("lookup of contribution {id} failed: {e}");
        increment_counter!("kudos_lookups_total", "outcome" => "unexpected");
        return Cycle::Completed(None);
      }
    };

    info!("contribution {id} lookup outcome: {outcome:?}");
    increment_counter!("kudos_lookups_total", "outcome" => outcome.label());

    self.sink.show(
      Notification::for_outcome(id, &outcome).with_duration(self.duration),
    );
    self.form.reset();

    if trigger == Trigger::Submitted {
      self.url.set_param(CONTRIBUTION_PARAM, &id.to_string());
    }

    Cycle::Completed(Some(outcome))
  }
}
