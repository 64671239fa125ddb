use {
  crate::Address,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
  url::Url,
};

/// Contribute links are relative to GitHub unless they say otherwise.
const GITHUB_BASE: &str = "https://github.com";

/// Raised when a user-provided contribution id is not a positive integer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("contribution id is required")]
  Empty,

  #[error("contribution id must be numeric, got {0:?}")]
  NotNumeric(String),

  #[error("contribution id {0} is too large")]
  OutOfRange(String),

  #[error("contribution id must be greater than zero")]
  Zero,
}

/// Identifies a contribution by its GitHub issue number.
///
/// The reward contract keys approvals by this number, so it is the only
/// thing a lookup needs to know.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct ContributionId(u64);

impl ContributionId {
  pub fn new(value: u64) -> Result<Self, ValidationError> {
    match value {
      0 => Err(ValidationError::Zero),
      v => Ok(Self(v)),
    }
  }

  pub fn get(&self) -> u64 {
    self.0
  }
}

impl FromStr for ContributionId {
  type Err = ValidationError;

  /// Only plain decimal digits are accepted. Signs, decimal points and
  /// exponents are rejected rather than coerced.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() {
      return Err(ValidationError::Empty);
    }

    if !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(ValidationError::NotNumeric(s.to_owned()));
    }

    let value = s
      .parse::<u64>()
      .map_err(|_| ValidationError::OutOfRange(s.to_owned()))?;
    Self::new(value)
  }
}

impl TryFrom<u64> for ContributionId {
  type Error = ValidationError;

  fn try_from(value: u64) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<ContributionId> for u64 {
  fn from(id: ContributionId) -> Self {
    id.0
  }
}

impl Display for ContributionId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for ContributionId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// An approved contribution as recorded by the reward contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
  /// The GitHub issue number this contribution closed.
  pub id: ContributionId,

  /// Account allowed to claim the reward.
  pub contributor: Address,

  pub claimed: bool,
}

/// An open issue listed as a bounty that contributors can pick up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
  pub organization: String,
  pub project: String,
  pub project_url: String,
  pub issue_title: String,
  pub issue_url: String,
}

impl Bounty {
  pub fn title(&self) -> String {
    format!("{} / {}", self.organization, self.project)
  }

  pub fn project_link(&self) -> Result<Url, url::ParseError> {
    Url::parse(GITHUB_BASE)?.join(&self.project_url)
  }

  /// Link to the issue form where a contributor claims this bounty.
  ///
  /// When a wallet is connected its address is prefilled through the
  /// `address` query parameter, which the approval workflow later reads
  /// back out of the issue body.
  pub fn contribute_url(
    &self,
    active_account: Option<&Address>,
  ) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(GITHUB_BASE)?.join(&self.issue_url)?;
    if let Some(address) = active_account {
      let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "address")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
      url
        .query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("address", &address.to_string());
    }
    Ok(url)
  }
}

/// Bounties shown when no other listing source is configured.
pub fn default_bounties() -> Vec<Bounty> {
  vec![Bounty {
    organization: "Kudos Ink!".into(),
    project: "Demo".into(),
    project_url: "/kudos-ink/demo".into(),
    issue_title: "Open an issue by filling in your substrate address".into(),
    issue_url: "/kudos-ink/demo/issues/new?assignees=&labels=demo&projects=&\
                template=demo.yml&title=Trigger+demo"
      .into(),
  }]
}
