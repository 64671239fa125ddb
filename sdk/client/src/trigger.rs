//! One-shot lookup of the contribution id found in the page URL.
//!
//! Wallet account, signer, node connection and contract handle all resolve
//! asynchronously and in no particular order. The machine is re-evaluated
//! every time any of them changes and fires exactly once, as soon as all
//! of them are present.

use kudos_primitives::ContributionId;

/// Which lookup prerequisites are currently available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
  pub account: bool,
  pub signer: bool,
  pub connection: bool,
  pub contract: bool,
}

impl Readiness {
  pub fn all(&self) -> bool {
    self.account && self.signer && self.connection && self.contract
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTrigger {
  /// Nothing to look up on mount, never fires.
  Idle,

  /// A valid id was found on mount, waiting for prerequisites.
  Waiting(ContributionId),

  /// Already fired for this mount.
  Triggered,
}

/// Emitted by [`AutoTrigger::transition`] when the lookup should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fire(pub ContributionId);

impl AutoTrigger {
  /// Initial state from the URL parameter seen on mount. Missing or
  /// invalid ids are ignored.
  pub fn on_mount(param: Option<&str>) -> Self {
    match param.map(str::parse::<ContributionId>) {
      Some(Ok(id)) => AutoTrigger::Waiting(id),
      _ => AutoTrigger::Idle,
    }
  }

  pub fn transition(self, readiness: Readiness) -> (Self, Option<Fire>) {
    match self {
      AutoTrigger::Waiting(id) if readiness.all() => {
        (AutoTrigger::Triggered, Some(Fire(id)))
      }
      state => (state, None),
    }
  }

  pub fn has_fired(&self) -> bool {
    matches!(self, AutoTrigger::Triggered)
  }
}
