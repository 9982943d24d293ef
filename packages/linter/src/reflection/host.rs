//! Class reflection data model.

use bitflags::bitflags;
use indexmap::IndexMap;
use oxc_ast::ast;

bitflags! {
    /// Modifier flags of a class member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MemberFlags: u8 {
        const STATIC = 1 << 0;
        const READONLY = 1 << 1;
        const PRIVATE = 1 << 2;
        const PROTECTED = 1 << 3;
    }
}

impl MemberFlags {
    pub fn is_public(self) -> bool {
        !self.intersects(MemberFlags::PRIVATE | MemberFlags::PROTECTED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Constructor,
    Method,
    Getter,
    Setter,
    Property,
}

/// One named member of a class, as needed for template symbol resolution.
#[derive(Debug, Clone)]
pub struct ClassMember {
    pub name: String,
    pub kind: ClassMemberKind,
    pub flags: MemberFlags,
}

/// The two per-class existence maps used during symbol resolution:
/// property names and method names, each with their modifier flags.
/// Rebuilt per class declaration, never cached across classes.
#[derive(Debug, Clone, Default)]
pub struct DeclaredMembers {
    pub properties: IndexMap<String, MemberFlags>,
    pub methods: IndexMap<String, MemberFlags>,
}

impl DeclaredMembers {
    pub fn from_members(members: impl IntoIterator<Item = ClassMember>) -> Self {
        let mut declared = DeclaredMembers::default();
        for member in members {
            match member.kind {
                ClassMemberKind::Constructor => {}
                ClassMemberKind::Method => {
                    declared.methods.insert(member.name, member.flags);
                }
                // Accessors resolve like plain properties in templates.
                ClassMemberKind::Getter | ClassMemberKind::Setter | ClassMemberKind::Property => {
                    declared.properties.insert(member.name, member.flags);
                }
            }
        }
        declared
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name) || self.methods.contains_key(name)
    }

    pub fn flags_of(&self, name: &str) -> Option<MemberFlags> {
        self.properties
            .get(name)
            .or_else(|| self.methods.get(name))
            .copied()
    }
}

pub(crate) fn accessibility_flags(accessibility: Option<ast::TSAccessibility>) -> MemberFlags {
    match accessibility {
        Some(ast::TSAccessibility::Private) => MemberFlags::PRIVATE,
        Some(ast::TSAccessibility::Protected) => MemberFlags::PROTECTED,
        Some(ast::TSAccessibility::Public) | None => MemberFlags::empty(),
    }
}
