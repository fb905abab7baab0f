use strum::Display;

use crate::generator::ast::{ClassName, PrimitiveType, TypeMirror, WildcardBound, known_types};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum UnboxError {
  #[strum(to_string = "'{0}' has no primitive counterpart")]
  NotBoxed(String),
}

impl std::error::Error for UnboxError {}

/// Type introspection needed to bind property strategies.
pub trait TypeUtils {
  /// Whether the raw class of `ty` is one of `classes`.
  fn erases_to_any_of(&self, ty: &TypeMirror, classes: &[&ClassName]) -> bool;

  /// Resolves a type argument to the type a value read from it is known to
  /// have: `? extends T` becomes `T`, `?` and `? super T` become `Object`.
  fn upper_bound(&self, ty: &TypeMirror) -> TypeMirror;

  fn boxed_type(&self, ty: &TypeMirror) -> TypeMirror;

  fn unboxed_type(&self, ty: &TypeMirror) -> Result<PrimitiveType, UnboxError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeUtils;

impl TypeUtils for StandardTypeUtils {
  fn erases_to_any_of(&self, ty: &TypeMirror, classes: &[&ClassName]) -> bool {
    ty.as_declared()
      .is_some_and(|declared| classes.iter().any(|class| declared.class == **class))
  }

  fn upper_bound(&self, ty: &TypeMirror) -> TypeMirror {
    match ty {
      TypeMirror::Wildcard(WildcardBound::Extends(bound)) => self.upper_bound(bound),
      TypeMirror::Wildcard(WildcardBound::Unbounded | WildcardBound::Super(_)) => {
        TypeMirror::class(known_types::OBJECT.clone())
      }
      other => other.clone(),
    }
  }

  fn boxed_type(&self, ty: &TypeMirror) -> TypeMirror {
    match ty {
      TypeMirror::Primitive(primitive) => TypeMirror::class(primitive.boxed_class()),
      other => other.clone(),
    }
  }

  fn unboxed_type(&self, ty: &TypeMirror) -> Result<PrimitiveType, UnboxError> {
    ty.as_declared()
      .filter(|declared| declared.type_arguments.is_empty())
      .and_then(|declared| PrimitiveType::from_boxed(&declared.class))
      .ok_or_else(|| UnboxError::NotBoxed(ty.to_string()))
  }
}
