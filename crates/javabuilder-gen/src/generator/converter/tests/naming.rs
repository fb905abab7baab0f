use crate::{
  generator::{
    ast::{PrimitiveType, TypeMirror},
    converter::naming::{all_caps, capitalize, decapitalize, property_names},
  },
  tests::common::string_type,
};

fn boolean() -> TypeMirror {
  PrimitiveType::Boolean.into()
}

#[test]
fn test_prefixes_stripped_when_every_getter_has_one() {
  let string = string_type();
  let flag = boolean();
  let names = property_names(&[("getFirstName", &string), ("isActive", &flag), ("getURL", &string)]);
  assert_eq!(names, vec!["firstName", "active", "URL"]);
}

#[test]
fn test_prefixes_kept_when_any_getter_lacks_one() {
  let string = string_type();
  let names = property_names(&[("getName", &string), ("name2", &string)]);
  assert_eq!(names, vec!["getName", "name2"]);
}

#[test]
fn test_is_prefix_requires_primitive_boolean() {
  let string = string_type();
  let boxed = TypeMirror::class(PrimitiveType::Boolean.boxed_class());
  assert_eq!(property_names(&[("isName", &string)]), vec!["isName"]);
  assert_eq!(property_names(&[("isEnabled", &boxed)]), vec!["isEnabled"]);
}

#[test]
fn test_bare_prefix_is_not_a_getter() {
  let string = string_type();
  assert_eq!(property_names(&[("get", &string), ("getter", &string)]), vec!["get", "getter"]);
}

#[test]
fn test_case_helpers() {
  assert_eq!(decapitalize("FirstName"), "firstName");
  assert_eq!(decapitalize("URL"), "URL");
  assert_eq!(decapitalize("X"), "x");
  assert_eq!(decapitalize(""), "");
  assert_eq!(capitalize("firstName"), "FirstName");
  assert_eq!(capitalize(""), "");
  assert_eq!(all_caps("firstName"), "FIRST_NAME");
  assert_eq!(all_caps("age"), "AGE");
}
