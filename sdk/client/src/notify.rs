use {
  crate::lookup::Outcome,
  kudos_primitives::ContributionId,
  serde::Serialize,
  std::{fmt::Display, time::Duration},
};

/// How long a toast stays on screen unless dismissed earlier.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(9000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Warning,
  Success,
  Error,
}

impl Display for Status {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Status::Warning => "warning",
      Status::Success => "success",
      Status::Error => "error",
    })
  }
}

/// A transient message shown to the user after a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
  pub title: String,
  pub description: String,
  pub status: Status,
  pub duration: Duration,
  pub dismissible: bool,
}

impl Notification {
  fn new(
    title: impl Into<String>,
    description: impl Into<String>,
    status: Status,
  ) -> Self {
    Self {
      title: title.into(),
      description: description.into(),
      status,
      duration: DEFAULT_DURATION,
      dismissible: true,
    }
  }

  /// Shown instead of running a lookup when the wallet session or the
  /// contract is not available yet.
  pub fn connectivity() -> Self {
    Self::new(
      "Wallet not connected. Try again…",
      "Connect a wallet and retry the lookup",
      Status::Error,
    )
  }

  pub fn for_outcome(id: ContributionId, outcome: &Outcome) -> Self {
    match outcome {
      Outcome::NotYetApproved => Self::new(
        format!("Issue #{id} not yet approved"),
        "No contributor has been found for this issue number",
        Status::Warning,
      ),
      Outcome::Approved { is_self: true, .. } => Self::new(
        format!("Issue #{id} approved"),
        "Congratulations! Your contribution has been approved",
        Status::Success,
      ),
      Outcome::Approved { contributor, .. } => Self::new(
        format!("Issue #{id} approved"),
        format!(
          "{} has made a contribution which has been approved",
          contributor.truncated()
        ),
        Status::Success,
      ),
      Outcome::QueryFailed { message } => {
        Self::new("Something went wrong", message.clone(), Status::Error)
      }
    }
  }

  pub fn with_duration(mut self, duration: Duration) -> Self {
    self.duration = duration;
    self
  }
}

/// Renders notifications to the user, e.g. as toasts.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
  fn show(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
  use {
    super::{Notification, Status, DEFAULT_DURATION},
    crate::lookup::Outcome,
    kudos_primitives::{Address, ContributionId},
  };

  #[test]
  fn not_yet_approved_copy() {
    let n = Notification::for_outcome(
      ContributionId::new(42).unwrap(),
      &Outcome::NotYetApproved,
    );
    assert_eq!(n.title, "Issue #42 not yet approved");
    assert_eq!(n.status, Status::Warning);
    assert_eq!(n.duration, DEFAULT_DURATION);
    assert!(n.dismissible);
  }

  #[test]
  fn approved_copy_depends_on_caller() {
    let id = ContributionId::new(3).unwrap();
    let bob = Address::new([2u8; 32]);

    let mine = Notification::for_outcome(id, &Outcome::Approved {
      contributor: bob,
      is_self: true,
    });
    assert_eq!(mine.title, "Issue #3 approved");
    assert!(mine.description.starts_with("Congratulations"));
    assert_eq!(mine.status, Status::Success);

    let theirs = Notification::for_outcome(id, &Outcome::Approved {
      contributor: bob,
      is_self: false,
    });
    assert_eq!(
      theirs.description,
      format!(
        "{} has made a contribution which has been approved",
        bob.truncated()
      )
    );
    assert!(!theirs.description.contains(&bob.to_string()));
  }

  #[test]
  fn failure_copy_carries_decoder_message() {
    let n = Notification::for_outcome(
      ContributionId::new(7).unwrap(),
      &Outcome::QueryFailed {
        message: "ContractTrapped".into(),
      },
    );
    assert_eq!(n.status, Status::Error);
    assert_eq!(n.description, "ContractTrapped");
  }
}
