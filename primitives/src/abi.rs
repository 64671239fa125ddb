//! Wire format of the reward contract's read-only messages.
//!
//! A dry-run call of `getContributor` produces two nested results: the outer
//! one reports whether the runtime managed to dispatch the call at all, the
//! inner one is the contract's own `Result` return value.

use {
  crate::Address,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

/// Message that returns the contributor recorded for an issue number.
pub const GET_CONTRIBUTOR: &str = "getContributor";

/// Response shape of [`GET_CONTRIBUTOR`] before decoding.
pub type ContributorResponse =
  Result<Result<Option<Address>, ContractError>, DispatchError>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contract has no message named {0:?}")]
  UnknownMethod(String),

  #[error("malformed {method} response: {source}")]
  Malformed {
    method: String,
    #[source]
    source: rmp_serde::decode::Error,
  },

  #[error("failed to encode response: {0}")]
  Encode(#[from] rmp_serde::encode::Error),
}

#[derive(
  Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum OwnableError {
  #[error("CallerIsNotOwner")]
  CallerIsNotOwner,

  #[error("NewOwnerIsZero")]
  NewOwnerIsZero,
}

/// Errors the reward contract returns from its messages.
#[derive(
  Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum ContractError {
  #[error("OwnableError({0})")]
  OwnableError(OwnableError),

  /// An aspiring contributor identity is already registered.
  #[error("IdentityAlreadyRegistered")]
  IdentityAlreadyRegistered,

  #[error("ContributionAlreadyApproved")]
  ContributionAlreadyApproved,

  #[error("NoContributionApprovedYet")]
  NoContributionApprovedYet,

  /// Contributor identity is not registered.
  #[error("UnknownContributor")]
  UnknownContributor,

  #[error("UnknownContribution")]
  UnknownContribution,

  /// Reward payment to a contributor failed.
  #[error("PaymentFailed")]
  PaymentFailed,

  #[error("CallerIsNotContributor")]
  CallerIsNotContributor,

  #[error("ContributionAlreadyClaimed")]
  ContributionAlreadyClaimed,
}

/// Errors raised by the runtime while dispatching a contract call, before
/// the contract gets a chance to return anything.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchError {
  #[error("ContractTrapped")]
  ContractTrapped,

  #[error("ContractReverted")]
  ContractReverted,

  #[error("OutOfGas")]
  OutOfGas,

  #[error("{0}")]
  Module(String),
}

/// A decoded contract response.
///
/// `output` is only meaningful when `is_error` is false. `decoded_output`
/// is the human readable rendering of whatever came back, which for errors
/// is the error name reported by the contract or the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOutput {
  pub output: Option<Address>,
  pub is_error: bool,
  pub decoded_output: String,
}

impl DecodedOutput {
  pub fn value(output: Option<Address>) -> Self {
    let decoded_output = match &output {
      Some(addr) => addr.to_string(),
      None => "None".into(),
    };
    Self {
      output,
      is_error: false,
      decoded_output,
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      output: None,
      is_error: true,
      decoded_output: message.into(),
    }
  }
}

pub fn encode_response(response: &ContributorResponse) -> Result<Vec<u8>, Error> {
  Ok(rmp_serde::to_vec(response)?)
}

/// Decodes the raw bytes returned by a dry-run of `method`.
///
/// Failures reported by the runtime or the contract are part of the
/// response and come back as an `is_error` output. Only bytes that are not
/// a valid response, or a method this decoder does not know, are an `Err`.
pub fn decode_output(raw: &[u8], method: &str) -> Result<DecodedOutput, Error> {
  if method != GET_CONTRIBUTOR {
    return Err(Error::UnknownMethod(method.to_owned()));
  }

  let response: ContributorResponse =
    rmp_serde::from_slice(raw).map_err(|source| Error::Malformed {
      method: method.to_owned(),
      source,
    })?;

  Ok(match response {
    Err(dispatch) => DecodedOutput::error(dispatch.to_string()),
    Ok(Err(contract)) => DecodedOutput::error(contract.to_string()),
    Ok(Ok(output)) => DecodedOutput::value(output),
  })
}
