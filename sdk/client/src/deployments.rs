use {
  kudos_primitives::Address,
  serde::{Deserialize, Serialize},
  std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
  },
  thiserror::Error,
  tracing::info,
};

pub const DEFAULT_DIR: &str = "./deployments";
pub const DEFAULT_NETWORK: &str = "development";

#[derive(Debug, Error)]
pub enum Error {
  #[error("deployment file {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("malformed deployment file {path}: {source}")]
  Format {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid name {0:?}, expected [A-Za-z0-9_-]+")]
  InvalidName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DeploymentRecord {
  address: Address,
}

/// Addresses of deployed contracts, one file per contract and network:
/// `{dir}/{contract}/{network}.json`.
#[derive(Debug, Clone)]
pub struct Deployments {
  dir: PathBuf,
}

impl Deployments {
  pub fn open(dir: impl AsRef<Path>) -> Self {
    Self {
      dir: dir.as_ref().to_path_buf(),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Records the addresses produced by a deployment run on `network`,
  /// replacing any previous deployment of the same contracts there.
  pub fn write(
    &self,
    network: &str,
    contracts: &BTreeMap<String, Address>,
  ) -> Result<(), Error> {
    for (contract, address) in contracts {
      let path = self.path(contract, network)?;
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
          path: parent.to_path_buf(),
          source,
        })?;
      }

      let json = serde_json::to_string_pretty(&DeploymentRecord {
        address: *address,
      })
      .map_err(|source| Error::Format {
        path: path.clone(),
        source,
      })?;
      fs::write(&path, json).map_err(|source| Error::Io {
        path: path.clone(),
        source,
      })?;
      info!("{contract} on {network} deployed at {address}");
    }
    Ok(())
  }

  /// Address of `contract` on `network`, `None` if it was never deployed
  /// there.
  pub fn address(
    &self,
    contract: &str,
    network: &str,
  ) -> Result<Option<Address>, Error> {
    let path = self.path(contract, network)?;
    let contents = match fs::read_to_string(&path) {
      Ok(contents) => contents,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(Error::Io { path, source }),
    };

    let record: DeploymentRecord = serde_json::from_str(&contents)
      .map_err(|source| Error::Format { path, source })?;
    Ok(Some(record.address))
  }

  fn path(&self, contract: &str, network: &str) -> Result<PathBuf, Error> {
    for name in [contract, network] {
      let valid = !name.is_empty()
        && name
          .chars()
          .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
      if !valid {
        return Err(Error::InvalidName(name.to_owned()));
      }
    }
    Ok(self.dir.join(contract).join(format!("{network}.json")))
  }
}
