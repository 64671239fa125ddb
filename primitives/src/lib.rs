mod abi;
mod address;
mod contribution;
mod identity;

pub use {
  abi::{
    decode_output,
    encode_response,
    ContractError,
    ContributorResponse,
    DecodedOutput,
    DispatchError,
    Error as AbiError,
    OwnableError,
    GET_CONTRIBUTOR,
  },
  address::{Address, Error as AddressError},
  contribution::{
    default_bounties,
    Bounty,
    Contribution,
    ContributionId,
    ValidationError,
  },
  identity::extract_address,
};
