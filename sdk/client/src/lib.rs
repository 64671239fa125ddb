mod chain;
mod deployments;
mod form;
mod location;
mod lookup;
mod memory;
mod notify;
mod trigger;

pub use {
  chain::{
    Account,
    ChainClient,
    Connection,
    ContractHandle,
    Error as ChainError,
    QueryOptions,
    RawQueryResult,
    Signer,
  },
  deployments::{
    Deployments,
    Error as DeploymentError,
    DEFAULT_DIR as DEFAULT_DEPLOYMENTS_DIR,
    DEFAULT_NETWORK,
  },
  form::LookupForm,
  location::{PageUrl, UrlState, CONTRIBUTION_PARAM},
  lookup::{
    ContributionLookup,
    LookupRequest,
    LookupState,
    Outcome,
    Trigger,
    CONTRACT_NAME,
  },
  memory::MemoryChain,
  notify::{Notification, NotificationSink, Status, DEFAULT_DURATION},
  trigger::{AutoTrigger, Fire, Readiness},
};
