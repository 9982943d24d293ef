//! Reflection over host-language class declarations.

pub mod host;
pub mod typescript;

pub use host::{ClassMember, ClassMemberKind, DeclaredMembers, MemberFlags};
pub use typescript::TypeScriptReflectionHost;
