use std::sync::LazyLock;

use inflections::Inflect;
use regex::Regex;

use crate::generator::ast::{PrimitiveType, TypeMirror};

static GETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(get|is)([A-Z0-9_$].*)$").unwrap());

/// Derives property names from getter names.
///
/// Prefixes are only stripped when every getter carries one (`is` counts for
/// `boolean` getters only); otherwise the method names are used verbatim.
pub(crate) fn property_names(getters: &[(&str, &TypeMirror)]) -> Vec<String> {
  let all_prefixed = getters
    .iter()
    .all(|(getter, declared_type)| stripped_getter(getter, declared_type).is_some());

  getters
    .iter()
    .map(|&(getter, declared_type)| match stripped_getter(getter, declared_type) {
      Some(stem) if all_prefixed => decapitalize(stem),
      _ => getter.to_string(),
    })
    .collect()
}

fn stripped_getter<'a>(getter: &'a str, declared_type: &TypeMirror) -> Option<&'a str> {
  let captures = GETTER_RE.captures(getter)?;
  let prefix = captures.get(1)?.as_str();
  if prefix == "is" && declared_type.as_primitive() != Some(PrimitiveType::Boolean) {
    return None;
  }
  captures.get(2).map(|stem| stem.as_str())
}

/// Lower-cases the first character unless the first two are both upper case,
/// so `FirstName` becomes `firstName` but `URL` stays `URL`.
pub(crate) fn decapitalize(name: &str) -> String {
  let mut chars = name.chars();
  match (chars.next(), chars.next()) {
    (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => name.to_string(),
    (Some(first), _) => first.to_lowercase().chain(name.chars().skip(1)).collect(),
    (None, _) => String::new(),
  }
}

pub(crate) fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  chars
    .next()
    .map(|first| first.to_uppercase().chain(chars).collect())
    .unwrap_or_default()
}

/// `firstName` becomes `FIRST_NAME`.
pub(crate) fn all_caps(name: &str) -> String {
  name.to_constant_case()
}
