use {std::cell::RefCell, url::Url};

/// Query parameter that carries the last looked up contribution.
pub const CONTRIBUTION_PARAM: &str = "contributionId";

/// The navigable address of the page hosting a lookup.
///
/// Writing a parameter must leave the other parameters untouched so that
/// shared links keep whatever else they carried.
#[cfg_attr(test, mockall::automock)]
pub trait UrlState {
  fn param(&self, name: &str) -> Option<String>;

  fn set_param(&self, name: &str, value: &str);
}

/// [`UrlState`] backed by an in-memory [`Url`].
#[derive(Debug)]
pub struct PageUrl {
  url: RefCell<Url>,
}

impl PageUrl {
  pub fn new(url: Url) -> Self {
    Self {
      url: RefCell::new(url),
    }
  }

  /// The current address, suitable for sharing.
  pub fn current(&self) -> Url {
    self.url.borrow().clone()
  }
}

impl UrlState for PageUrl {
  fn param(&self, name: &str) -> Option<String> {
    self
      .url
      .borrow()
      .query_pairs()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.into_owned())
  }

  fn set_param(&self, name: &str, value: &str) {
    let mut url = self.url.borrow_mut();
    let retained: Vec<(String, String)> = url
      .query_pairs()
      .filter(|(k, _)| k != name)
      .map(|(k, v)| (k.into_owned(), v.into_owned()))
      .collect();

    url
      .query_pairs_mut()
      .clear()
      .extend_pairs(retained)
      .append_pair(name, value);
  }
}
