use {
  kudos_primitives::{ContributionId, ValidationError},
  std::cell::RefCell,
};

/// The single-field "Check Contribution" form.
#[derive(Debug, Default)]
pub struct LookupForm {
  input: RefCell<String>,
}

impl LookupForm {
  pub fn set_input(&self, value: impl Into<String>) {
    *self.input.borrow_mut() = value.into();
  }

  pub fn input(&self) -> String {
    self.input.borrow().clone()
  }

  pub fn validate(&self) -> Result<ContributionId, ValidationError> {
    self.input.borrow().parse()
  }

  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  pub fn reset(&self) {
    self.input.borrow_mut().clear();
  }
}

#[cfg(test)]
mod tests {
  use {super::LookupForm, kudos_primitives::ValidationError};

  #[test]
  fn validates_current_input() {
    let form = LookupForm::default();
    assert_eq!(form.validate(), Err(ValidationError::Empty));

    form.set_input("12");
    assert_eq!(form.validate().unwrap().get(), 12);

    form.set_input("twelve");
    assert!(!form.is_valid());

    form.reset();
    assert_eq!(form.input(), "");
  }
}
