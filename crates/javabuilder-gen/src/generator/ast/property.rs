use super::TypeMirror;
use crate::generator::strategy::{PropertyCodeGenerator, Strategy};

/// One getter of the target type, with every name form the emitted code needs.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct Property {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub capitalized_name: String,
  #[builder(into)]
  pub all_caps_name: String,
  pub declared_type: TypeMirror,
  pub boxed_type: TypeMirror,
  #[builder(into)]
  pub getter_name: String,
  /// A cast from `Object` to the stored type is checked at runtime.
  #[builder(default)]
  pub fully_checked_cast: bool,
  pub strategy: Strategy,
}

impl Property {
  pub fn generator(&self) -> &dyn PropertyCodeGenerator {
    self.strategy.as_generator()
  }

  pub fn tracks_unset(&self) -> bool {
    self.generator().tracks_unset()
  }
}
