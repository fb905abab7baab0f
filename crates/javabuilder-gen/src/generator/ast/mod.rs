pub mod known_types;
mod metadata;
mod property;
mod types;

#[cfg(test)]
mod tests;

pub use metadata::{BuilderFactory, Metadata, MetadataError};
pub use property::Property;
pub(crate) use types::is_java_identifier;
pub use types::{ClassName, DeclaredType, PrimitiveType, TypeMirror, TypeParseError, TypeParser, WildcardBound};
