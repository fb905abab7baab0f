pub mod declaration;


pub use declaration::{
  BuilderDeclaration, DeclarationFile, DeclarationLoader, PropertyDeclaration, TypeDeclaration, TypeKind,
};
