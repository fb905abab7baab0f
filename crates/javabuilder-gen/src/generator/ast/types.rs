use std::{collections::HashSet, fmt, sync::LazyLock};

use indexmap::IndexMap;
use itertools::Itertools;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

const JAVA_LANG: &str = "java.lang";

static JAVA_LANG_TYPES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Enum",
    "Float",
    "IllegalStateException",
    "Integer",
    "Iterable",
    "Long",
    "NullPointerException",
    "Number",
    "Object",
    "Override",
    "Short",
    "String",
    "SuppressWarnings",
    "UnsupportedOperationException",
    "Void",
  ]
  .into_iter()
  .collect()
});

/// Reference to a (possibly nested) Java class.
///
/// `simple_names` holds the outermost class first, so `java.util.Map.Entry`
/// is stored as package `java.util` with names `["Map", "Entry"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
  package: String,
  simple_names: Vec<String>,
}

impl ClassName {
  pub fn top_level(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      simple_names: vec![simple_name.into()],
    }
  }

  #[must_use]
  pub fn nested(&self, simple_name: impl Into<String>) -> Self {
    let mut simple_names = self.simple_names.clone();
    simple_names.push(simple_name.into());
    Self {
      package: self.package.clone(),
      simple_names,
    }
  }

  /// Parses a fully qualified name. The first segment starting with an
  /// upper-case letter begins the class names; when no segment does, the last
  /// segment is taken as the class.
  pub fn parse(qualified: &str) -> Result<Self, TypeParseError> {
    let segments = qualified.split('.').collect::<Vec<_>>();
    if let Some(segment) = segments.iter().find(|segment| !is_java_identifier(segment)) {
      return Err(TypeParseError::InvalidIdentifier {
        input: qualified.to_string(),
        identifier: (*segment).to_string(),
      });
    }

    let split = segments
      .iter()
      .position(|segment| segment.starts_with(|c: char| c.is_ascii_uppercase()))
      .unwrap_or(segments.len() - 1);

    Ok(Self {
      package: segments[..split].join("."),
      simple_names: segments[split..].iter().map(ToString::to_string).collect(),
    })
  }

  pub fn package(&self) -> &str {
    &self.package
  }

  pub fn simple_names(&self) -> &[String] {
    &self.simple_names
  }

  pub fn simple_name(&self) -> &str {
    self.simple_names.last().map_or("", String::as_str)
  }

  #[must_use]
  pub fn top_level_class(&self) -> Self {
    Self {
      package: self.package.clone(),
      simple_names: self.simple_names.iter().take(1).cloned().collect(),
    }
  }

  /// Dotted path of simple names, e.g. `Person.Builder`.
  pub fn nested_path(&self) -> String {
    self.simple_names.join(".")
  }

  /// Simple names joined with underscores, e.g. `Outer_Person`.
  pub fn flat_name(&self) -> String {
    self.simple_names.join("_")
  }

  pub fn qualified_name(&self) -> String {
    if self.package.is_empty() {
      self.nested_path()
    } else {
      format!("{}.{}", self.package, self.nested_path())
    }
  }

  pub fn is_java_lang(&self) -> bool {
    self.package == JAVA_LANG
  }
}

impl fmt::Display for ClassName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.qualified_name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveType {
  Boolean,
  Byte,
  Short,
  Int,
  Long,
  Char,
  Float,
  Double,
}

impl PrimitiveType {
  pub fn boxed_class(self) -> ClassName {
    let simple_name = match self {
      Self::Boolean => "Boolean",
      Self::Byte => "Byte",
      Self::Short => "Short",
      Self::Int => "Integer",
      Self::Long => "Long",
      Self::Char => "Character",
      Self::Float => "Float",
      Self::Double => "Double",
    };
    ClassName::top_level(JAVA_LANG, simple_name)
  }

  pub fn from_boxed(class: &ClassName) -> Option<Self> {
    Self::iter().find(|primitive| primitive.boxed_class() == *class)
  }

  /// Suffix of the matching `read*`/`write*` methods on GWT serialization streams.
  pub fn stream_suffix(self) -> &'static str {
    match self {
      Self::Boolean => "Boolean",
      Self::Byte => "Byte",
      Self::Short => "Short",
      Self::Int => "Int",
      Self::Long => "Long",
      Self::Char => "Char",
      Self::Float => "Float",
      Self::Double => "Double",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
  pub class: ClassName,
  pub type_arguments: Vec<TypeMirror>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
  Unbounded,
  Extends(Box<TypeMirror>),
  Super(Box<TypeMirror>),
}

/// A Java type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeMirror {
  Primitive(PrimitiveType),
  Declared(DeclaredType),
  Array(Box<TypeMirror>),
  Wildcard(WildcardBound),
}

impl TypeMirror {
  pub fn class(class: ClassName) -> Self {
    Self::Declared(DeclaredType {
      class,
      type_arguments: vec![],
    })
  }

  pub fn generic(class: ClassName, type_arguments: Vec<TypeMirror>) -> Self {
    Self::Declared(DeclaredType { class, type_arguments })
  }

  pub fn is_primitive(&self) -> bool {
    matches!(self, Self::Primitive(_))
  }

  pub fn as_primitive(&self) -> Option<PrimitiveType> {
    match self {
      Self::Primitive(primitive) => Some(*primitive),
      _ => None,
    }
  }

  pub fn as_declared(&self) -> Option<&DeclaredType> {
    match self {
      Self::Declared(declared) => Some(declared),
      _ => None,
    }
  }

  pub fn type_arguments(&self) -> &[TypeMirror] {
    self.as_declared().map_or(&[], |declared| declared.type_arguments.as_slice())
  }

  /// Writes the type, rendering every class reference through `name_of`.
  pub fn write_with(&self, out: &mut String, name_of: &mut dyn FnMut(&ClassName) -> String) {
    match self {
      Self::Primitive(primitive) => out.push_str(&primitive.to_string()),
      Self::Declared(declared) => {
        out.push_str(&name_of(&declared.class));
        if !declared.type_arguments.is_empty() {
          out.push('<');
          for (index, argument) in declared.type_arguments.iter().enumerate() {
            if index > 0 {
              out.push_str(", ");
            }
            argument.write_with(out, name_of);
          }
          out.push('>');
        }
      }
      Self::Array(component) => {
        component.write_with(out, name_of);
        out.push_str("[]");
      }
      Self::Wildcard(WildcardBound::Unbounded) => out.push('?'),
      Self::Wildcard(WildcardBound::Extends(bound)) => {
        out.push_str("? extends ");
        bound.write_with(out, name_of);
      }
      Self::Wildcard(WildcardBound::Super(bound)) => {
        out.push_str("? super ");
        bound.write_with(out, name_of);
      }
    }
  }
}

impl fmt::Display for TypeMirror {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    self.write_with(&mut out, &mut ClassName::qualified_name);
    f.write_str(&out)
  }
}

impl From<PrimitiveType> for TypeMirror {
  fn from(primitive: PrimitiveType) -> Self {
    Self::Primitive(primitive)
  }
}

impl From<ClassName> for TypeMirror {
  fn from(class: ClassName) -> Self {
    Self::class(class)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TypeParseError {
  #[strum(to_string = "unexpected end of type '{input}'")]
  UnexpectedEnd { input: String },
  #[strum(to_string = "unexpected '{found}' at position {position} in type '{input}'")]
  UnexpectedToken {
    input: String,
    position: usize,
    found: char,
  },
  #[strum(to_string = "'{identifier}' is not a valid Java identifier in '{input}'")]
  InvalidIdentifier { input: String, identifier: String },
  #[strum(to_string = "empty type argument list in '{input}'")]
  EmptyTypeArguments { input: String },
  #[strum(to_string = "primitive '{primitive}' cannot be a type argument in '{input}'")]
  PrimitiveTypeArgument { input: String, primitive: PrimitiveType },
  #[strum(to_string = "'void' is not a property type")]
  Void,
}

impl std::error::Error for TypeParseError {}

pub(crate) fn is_java_identifier(candidate: &str) -> bool {
  let mut chars = candidate.chars();
  chars
    .next()
    .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Parses Java type expressions the way a compilation unit in `package` with
/// the given single-type imports would resolve them.
#[derive(Debug, Clone, Default)]
pub struct TypeParser {
  package: String,
  imports: IndexMap<String, ClassName>,
}

impl TypeParser {
  pub fn new(package: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      imports: IndexMap::new(),
    }
  }

  #[must_use]
  pub fn with_imports(mut self, imports: impl IntoIterator<Item = ClassName>) -> Self {
    for import in imports {
      self.imports.insert(import.simple_name().to_string(), import);
    }
    self
  }

  pub fn parse(&self, input: &str) -> Result<TypeMirror, TypeParseError> {
    let mut cursor = Cursor { input, position: 0 };
    let parsed = self.parse_type(&mut cursor, false)?;
    cursor.skip_whitespace();
    match cursor.peek() {
      None => Ok(parsed),
      Some(found) => Err(cursor.unexpected(found)),
    }
  }

  fn parse_type(&self, cursor: &mut Cursor<'_>, in_arguments: bool) -> Result<TypeMirror, TypeParseError> {
    cursor.skip_whitespace();
    if in_arguments && cursor.eat('?') {
      return self.parse_wildcard(cursor);
    }

    let name = cursor.dotted_name()?;
    let mut parsed = if let Ok(primitive) = name.parse::<PrimitiveType>() {
      TypeMirror::Primitive(primitive)
    } else if name == "void" {
      return Err(TypeParseError::Void);
    } else {
      let class = self.resolve(cursor.input, &name)?;
      let type_arguments = self.parse_type_arguments(cursor)?;
      TypeMirror::Declared(DeclaredType { class, type_arguments })
    };

    loop {
      cursor.skip_whitespace();
      if !cursor.eat('[') {
        break;
      }
      cursor.expect(']')?;
      parsed = TypeMirror::Array(Box::new(parsed));
    }

    if in_arguments && let TypeMirror::Primitive(primitive) = parsed {
      return Err(TypeParseError::PrimitiveTypeArgument {
        input: cursor.input.to_string(),
        primitive,
      });
    }
    Ok(parsed)
  }

  fn parse_wildcard(&self, cursor: &mut Cursor<'_>) -> Result<TypeMirror, TypeParseError> {
    cursor.skip_whitespace();
    match cursor.peek() {
      Some(c) if c.is_alphabetic() => {
        let start = cursor.position;
        let keyword = cursor.identifier()?;
        let bound = Box::new(self.parse_type(cursor, true)?);
        match keyword {
          "extends" => Ok(TypeMirror::Wildcard(WildcardBound::Extends(bound))),
          "super" => Ok(TypeMirror::Wildcard(WildcardBound::Super(bound))),
          _ => Err(TypeParseError::UnexpectedToken {
            input: cursor.input.to_string(),
            position: start,
            found: c,
          }),
        }
      }
      _ => Ok(TypeMirror::Wildcard(WildcardBound::Unbounded)),
    }
  }

  fn parse_type_arguments(&self, cursor: &mut Cursor<'_>) -> Result<Vec<TypeMirror>, TypeParseError> {
    cursor.skip_whitespace();
    if !cursor.eat('<') {
      return Ok(vec![]);
    }

    cursor.skip_whitespace();
    if cursor.eat('>') {
      return Err(TypeParseError::EmptyTypeArguments {
        input: cursor.input.to_string(),
      });
    }

    let mut arguments = vec![self.parse_type(cursor, true)?];
    loop {
      cursor.skip_whitespace();
      if cursor.eat('>') {
        return Ok(arguments);
      }
      cursor.expect(',')?;
      arguments.push(self.parse_type(cursor, true)?);
    }
  }

  fn resolve(&self, input: &str, name: &str) -> Result<ClassName, TypeParseError> {
    let (first, rest) = match name.split_once('.') {
      Some((first, rest)) => (first, Some(rest)),
      None => (name, None),
    };

    if !first.starts_with(|c: char| c.is_ascii_uppercase()) {
      return ClassName::parse(name).map_err(|_| TypeParseError::InvalidIdentifier {
        input: input.to_string(),
        identifier: name.to_string(),
      });
    }

    let outer = if let Some(import) = self.imports.get(first) {
      import.clone()
    } else if JAVA_LANG_TYPES.contains(first) {
      ClassName::top_level(JAVA_LANG, first)
    } else {
      ClassName::top_level(self.package.clone(), first)
    };

    Ok(
      rest
        .into_iter()
        .flat_map(|rest| rest.split('.'))
        .fold(outer, |class, simple_name| class.nested(simple_name)),
    )
  }
}

struct Cursor<'s> {
  input: &'s str,
  position: usize,
}

impl<'s> Cursor<'s> {
  fn peek(&self) -> Option<char> {
    self.input[self.position..].chars().next()
  }

  fn skip_whitespace(&mut self) {
    while let Some(c) = self.peek()
      && c.is_whitespace()
    {
      self.position += c.len_utf8();
    }
  }

  fn eat(&mut self, expected: char) -> bool {
    if self.peek() == Some(expected) {
      self.position += expected.len_utf8();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
    self.skip_whitespace();
    match self.peek() {
      Some(c) if c == expected => {
        self.position += c.len_utf8();
        Ok(())
      }
      Some(found) => Err(self.unexpected(found)),
      None => Err(TypeParseError::UnexpectedEnd {
        input: self.input.to_string(),
      }),
    }
  }

  fn unexpected(&self, found: char) -> TypeParseError {
    TypeParseError::UnexpectedToken {
      input: self.input.to_string(),
      position: self.position,
      found,
    }
  }

  fn identifier(&mut self) -> Result<&'s str, TypeParseError> {
    let start = self.position;
    while let Some(c) = self.peek()
      && (c.is_alphanumeric() || c == '_' || c == '$')
    {
      self.position += c.len_utf8();
    }
    let identifier = &self.input[start..self.position];
    if is_java_identifier(identifier) {
      return Ok(identifier);
    }
    match self.peek() {
      _ if !identifier.is_empty() => Err(TypeParseError::InvalidIdentifier {
        input: self.input.to_string(),
        identifier: identifier.to_string(),
      }),
      Some(found) => Err(self.unexpected(found)),
      None => Err(TypeParseError::UnexpectedEnd {
        input: self.input.to_string(),
      }),
    }
  }

  fn dotted_name(&mut self) -> Result<String, TypeParseError> {
    let mut segments = vec![self.identifier()?];
    while self.eat('.') {
      segments.push(self.identifier()?);
    }
    Ok(segments.into_iter().join("."))
  }
}
