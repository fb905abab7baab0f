mod metadata;
mod types;
