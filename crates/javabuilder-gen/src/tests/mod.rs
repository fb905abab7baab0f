pub(crate) mod common;
