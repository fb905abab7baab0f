use std::collections::BTreeMap;

use strum::Display;

use crate::generator::{ast::Metadata, strategy::StrategyKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub types_declared: usize,
  pub types_generated: usize,
  pub types_filtered: usize,
  pub properties_generated: usize,
  pub required_properties: usize,
  pub strategies: BTreeMap<String, usize>,
  pub gwt_serializers_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_declared(&mut self, count: usize) {
    self.types_declared += count;
  }

  pub fn record_filtered(&mut self) {
    self.types_filtered += 1;
  }

  pub fn record_strategy(&mut self, kind: StrategyKind) {
    *self.strategies.entry(kind.to_string()).or_default() += 1;
  }

  pub fn record_type(&mut self, metadata: &Metadata) {
    self.types_generated += 1;
    self.properties_generated += metadata.properties().len();
    self.required_properties += metadata.tracked_properties().count();
    if metadata.gwt_serializable() {
      self.gwt_serializers_generated += 1;
    }
    for property in metadata.properties() {
      self.record_strategy(property.strategy.kind());
    }
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }

  pub fn types_skipped(&self) -> usize {
    self.warnings.iter().filter(|warning| warning.is_skipped_item()).count()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Failed to convert type '{type_name}': {error}")]
  TypeConversionFailed { type_name: String, error: String },
  #[strum(to_string = "Failed to generate builder for '{type_name}': {error}")]
  TypeGenerationFailed { type_name: String, error: String },
  #[strum(to_string = "Type '{type_name}': GWT serialization requires a builder factory; serializer omitted")]
  GwtSerializationDisabled { type_name: String },
  #[strum(to_string = "Type '{type_name}' was requested with --only but is not declared")]
  UnknownOnlyType { type_name: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::TypeConversionFailed { .. } | Self::TypeGenerationFailed { .. }
    )
  }
}
