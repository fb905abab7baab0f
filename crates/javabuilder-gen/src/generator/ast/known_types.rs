//! Library classes referenced by generated builders.

use std::sync::LazyLock;

use super::ClassName;

const GUAVA_BASE: &str = "com.google.common.base";
const GUAVA_COLLECT: &str = "com.google.common.collect";
const GUAVA_ANNOTATIONS: &str = "com.google.common.annotations";
const GWT_SERIALIZATION: &str = "com.google.gwt.user.client.rpc";
const JAVA_UTIL: &str = "java.util";

fn class(package: &str, simple_name: &str) -> ClassName {
  ClassName::top_level(package, simple_name)
}

pub static OBJECT: LazyLock<ClassName> = LazyLock::new(|| class("java.lang", "Object"));
pub static ITERABLE: LazyLock<ClassName> = LazyLock::new(|| class("java.lang", "Iterable"));
pub static SUPPRESS_WARNINGS: LazyLock<ClassName> = LazyLock::new(|| class("java.lang", "SuppressWarnings"));
pub static SERIALIZABLE: LazyLock<ClassName> = LazyLock::new(|| class("java.io", "Serializable"));

pub static PRECONDITIONS: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_BASE, "Preconditions"));
pub static JOINER: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_BASE, "Joiner"));
pub static GUAVA_OPTIONAL: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_BASE, "Optional"));
pub static IMMUTABLE_LIST: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_COLLECT, "ImmutableList"));
pub static IMMUTABLE_SET: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_COLLECT, "ImmutableSet"));
pub static IMMUTABLE_MAP: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_COLLECT, "ImmutableMap"));
pub static VISIBLE_FOR_TESTING: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_ANNOTATIONS, "VisibleForTesting"));
pub static GWT_COMPATIBLE: LazyLock<ClassName> = LazyLock::new(|| class(GUAVA_ANNOTATIONS, "GwtCompatible"));

pub static JAVA_OPTIONAL: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Optional"));
pub static ARRAYS: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Arrays"));
pub static ARRAY_LIST: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "ArrayList"));
pub static COLLECTION: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Collection"));
pub static COLLECTIONS: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Collections"));
pub static ENUM_SET: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "EnumSet"));
pub static LINKED_HASH_MAP: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "LinkedHashMap"));
pub static LINKED_HASH_SET: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "LinkedHashSet"));
pub static LIST: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "List"));
pub static MAP: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Map"));
pub static MAP_ENTRY: LazyLock<ClassName> = LazyLock::new(|| MAP.nested("Entry"));
pub static SET: LazyLock<ClassName> = LazyLock::new(|| class(JAVA_UTIL, "Set"));

pub static GENERATED: LazyLock<ClassName> = LazyLock::new(|| class("javax.annotation", "Generated"));
pub static NULLABLE: LazyLock<ClassName> = LazyLock::new(|| class("javax.annotation", "Nullable"));

pub static CUSTOM_FIELD_SERIALIZER: LazyLock<ClassName> =
  LazyLock::new(|| class(GWT_SERIALIZATION, "CustomFieldSerializer"));
pub static SERIALIZATION_EXCEPTION: LazyLock<ClassName> =
  LazyLock::new(|| class(GWT_SERIALIZATION, "SerializationException"));
pub static SERIALIZATION_STREAM_READER: LazyLock<ClassName> =
  LazyLock::new(|| class(GWT_SERIALIZATION, "SerializationStreamReader"));
pub static SERIALIZATION_STREAM_WRITER: LazyLock<ClassName> =
  LazyLock::new(|| class(GWT_SERIALIZATION, "SerializationStreamWriter"));
