//! Templated Java source sink.
//!
//! Templates use `%s` for the next argument, `%N$s` for the N-th (1-based)
//! argument and `%%` for a literal percent sign. Class references passed as
//! arguments are shortened to simple names, importing them when writing a
//! full compilation unit.

use std::collections::{BTreeSet, HashMap};

use strum::{Display, EnumString};

use crate::generator::ast::{ClassName, PrimitiveType, TypeMirror};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString)]
pub enum SourceLevel {
  #[default]
  #[strum(to_string = "java6", serialize = "6", serialize = "1.6")]
  Java6,
  #[strum(to_string = "java7", serialize = "7", serialize = "1.7")]
  Java7,
}

impl SourceLevel {
  pub fn supports_diamond_operator(self) -> bool {
    self >= Self::Java7
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SourceError {
  #[strum(to_string = "malformed placeholder at position {position} in template '{template}'")]
  MalformedPlaceholder { template: String, position: usize },
  #[strum(to_string = "no argument {index} for template '{template}'")]
  MissingArgument { template: String, index: usize },
}

impl std::error::Error for SourceError {}

/// A value that can be substituted into a source template.
pub trait SourceArg {
  fn write_source(&self, out: &mut String, names: &mut TypeShortener);
}

impl SourceArg for str {
  fn write_source(&self, out: &mut String, _names: &mut TypeShortener) {
    out.push_str(self);
  }
}

impl SourceArg for String {
  fn write_source(&self, out: &mut String, _names: &mut TypeShortener) {
    out.push_str(self);
  }
}

impl SourceArg for ClassName {
  fn write_source(&self, out: &mut String, names: &mut TypeShortener) {
    out.push_str(&names.shorten(self));
  }
}

impl SourceArg for TypeMirror {
  fn write_source(&self, out: &mut String, names: &mut TypeShortener) {
    self.write_with(out, &mut |class: &ClassName| names.shorten(class));
  }
}

impl SourceArg for PrimitiveType {
  fn write_source(&self, out: &mut String, _names: &mut TypeShortener) {
    out.push_str(&self.to_string());
  }
}

impl<T: SourceArg + ?Sized> SourceArg for &T {
  fn write_source(&self, out: &mut String, names: &mut TypeShortener) {
    (**self).write_source(out, names);
  }
}

/// Decides how a class reference is spelled in the emitted source.
#[derive(Debug, Clone)]
pub enum TypeShortener {
  /// Nested simple names only; nothing is imported.
  Simple,
  Importing {
    package: String,
    imports: BTreeSet<String>,
    owners: HashMap<String, ClassName>,
  },
}

impl TypeShortener {
  pub fn shorten(&mut self, class: &ClassName) -> String {
    let Self::Importing {
      package,
      imports,
      owners,
    } = self
    else {
      return class.nested_path();
    };

    let top_level = class.top_level_class();
    let key = top_level.simple_name().to_string();
    match owners.get(&key) {
      Some(owner) if *owner == top_level => class.nested_path(),
      Some(_) => class.qualified_name(),
      None => {
        let local = top_level.package() == package.as_str() || top_level.package().is_empty();
        if !local && !top_level.is_java_lang() {
          imports.insert(top_level.qualified_name());
        }
        owners.insert(key, top_level);
        class.nested_path()
      }
    }
  }

  /// Claims the simple name of `member` so top-level classes sharing it are
  /// written qualified rather than imported.
  pub fn reserve(&mut self, member: ClassName) {
    if let Self::Importing { owners, .. } = self {
      owners.entry(member.simple_name().to_string()).or_insert(member);
    }
  }
}

#[derive(Debug, Clone)]
pub struct SourceBuilder {
  body: String,
  names: TypeShortener,
  level: SourceLevel,
  error: Option<SourceError>,
}

impl SourceBuilder {
  /// Writes class references by simple name with no package or imports.
  pub fn simple() -> Self {
    Self {
      body: String::new(),
      names: TypeShortener::Simple,
      level: SourceLevel::default(),
      error: None,
    }
  }

  /// Writes a full compilation unit for `package`, importing referenced classes.
  pub fn for_package(package: impl Into<String>, level: SourceLevel) -> Self {
    Self {
      body: String::new(),
      names: TypeShortener::Importing {
        package: package.into(),
        imports: BTreeSet::new(),
        owners: HashMap::new(),
      },
      level,
      error: None,
    }
  }

  #[cfg(test)]
  #[must_use]
  pub fn with_source_level(mut self, level: SourceLevel) -> Self {
    self.level = level;
    self
  }

  /// Member types declared by the emitted class; see [`TypeShortener::reserve`].
  pub fn reserve_member_types(&mut self, members: impl IntoIterator<Item = ClassName>) {
    for member in members {
      self.names.reserve(member);
    }
  }

  pub fn source_level(&self) -> SourceLevel {
    self.level
  }

  pub fn add(&mut self, template: &str, args: &[&dyn SourceArg]) -> &mut Self {
    if self.error.is_some() {
      return self;
    }
    let mut out = String::with_capacity(template.len());
    match expand(template, args, &mut out, &mut self.names) {
      Ok(()) => self.body.push_str(&out),
      Err(error) => self.error = Some(error),
    }
    self
  }

  pub fn add_line(&mut self, template: &str, args: &[&dyn SourceArg]) -> &mut Self {
    self.add(template, args);
    if self.error.is_none() {
      self.body.push('\n');
    }
    self
  }

  /// Appends `text` and a newline verbatim, with no placeholder processing.
  pub fn line(&mut self, text: &str) -> &mut Self {
    if self.error.is_none() {
      self.body.push_str(text);
      self.body.push('\n');
    }
    self
  }

  pub fn take_error(&mut self) -> Option<SourceError> {
    self.error.take()
  }

  #[cfg(test)]
  pub fn body(&self) -> &str {
    &self.body
  }

  pub fn finish(self) -> Result<String, SourceError> {
    if let Some(error) = self.error {
      return Err(error);
    }

    let TypeShortener::Importing { package, imports, .. } = self.names else {
      return Ok(self.body);
    };

    let mut unit = String::new();
    if !package.is_empty() {
      unit.push_str(&format!("package {package};\n\n"));
    }
    for import in &imports {
      unit.push_str(&format!("import {import};\n"));
    }
    if !imports.is_empty() {
      unit.push('\n');
    }
    unit.push_str(&self.body);
    Ok(unit)
  }
}

fn expand(
  template: &str,
  args: &[&dyn SourceArg],
  out: &mut String,
  names: &mut TypeShortener,
) -> Result<(), SourceError> {
  let malformed = |position| SourceError::MalformedPlaceholder {
    template: template.to_string(),
    position,
  };
  let mut next_ordinary = 0;
  let mut chars = template.char_indices().peekable();

  while let Some((position, c)) = chars.next() {
    if c != '%' {
      out.push(c);
      continue;
    }

    let index = match chars.next() {
      Some((_, '%')) => {
        out.push('%');
        continue;
      }
      Some((_, 's')) => {
        next_ordinary += 1;
        next_ordinary
      }
      Some((_, digit)) if digit.is_ascii_digit() => {
        let mut index = digit.to_digit(10).map_or(0, |d| d as usize);
        while let Some((_, digit)) = chars.peek().copied()
          && let Some(value) = digit.to_digit(10)
        {
          index = index * 10 + value as usize;
          chars.next();
        }
        if chars.next().map(|(_, c)| c) != Some('$') || chars.next().map(|(_, c)| c) != Some('s') || index == 0 {
          return Err(malformed(position));
        }
        index
      }
      _ => return Err(malformed(position)),
    };

    let arg = args.get(index - 1).ok_or_else(|| SourceError::MissingArgument {
      template: template.to_string(),
      index,
    })?;
    arg.write_source(out, names);
  }

  Ok(())
}
