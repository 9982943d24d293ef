//! Reflection over oxc class declarations.

use super::host::*;
use crate::ast_utils::property_key_name;
use oxc_ast::ast;

#[derive(Debug, Default)]
pub struct TypeScriptReflectionHost;

impl TypeScriptReflectionHost {
    pub fn new() -> Self {
        TypeScriptReflectionHost
    }

    /// Every named member of the class: methods, accessors, properties and
    /// constructor parameter properties (`constructor(private x: T)`).
    pub fn members_of_class(&self, class: &ast::Class<'_>) -> Vec<ClassMember> {
        let mut members = Vec::new();
        for element in &class.body.body {
            match element {
                ast::ClassElement::MethodDefinition(method) => {
                    let Some(name) = property_key_name(&method.key) else {
                        continue;
                    };
                    let kind = match method.kind {
                        ast::MethodDefinitionKind::Constructor => ClassMemberKind::Constructor,
                        ast::MethodDefinitionKind::Method => ClassMemberKind::Method,
                        ast::MethodDefinitionKind::Get => ClassMemberKind::Getter,
                        ast::MethodDefinitionKind::Set => ClassMemberKind::Setter,
                    };
                    let mut flags = accessibility_flags(method.accessibility);
                    if method.r#static {
                        flags |= MemberFlags::STATIC;
                    }
                    if matches!(&method.key, ast::PropertyKey::PrivateIdentifier(_)) {
                        flags |= MemberFlags::PRIVATE;
                    }
                    if kind == ClassMemberKind::Constructor {
                        members.extend(self.constructor_parameter_properties(method));
                    }
                    members.push(ClassMember {
                        name: name.to_string(),
                        kind,
                        flags,
                    });
                }
                ast::ClassElement::PropertyDefinition(prop) => {
                    let Some(name) = property_key_name(&prop.key) else {
                        continue;
                    };
                    let mut flags = accessibility_flags(prop.accessibility);
                    if prop.r#static {
                        flags |= MemberFlags::STATIC;
                    }
                    if prop.readonly {
                        flags |= MemberFlags::READONLY;
                    }
                    if matches!(&prop.key, ast::PropertyKey::PrivateIdentifier(_)) {
                        flags |= MemberFlags::PRIVATE;
                    }
                    members.push(ClassMember {
                        name: name.to_string(),
                        kind: ClassMemberKind::Property,
                        flags,
                    });
                }
                ast::ClassElement::AccessorProperty(accessor) => {
                    let Some(name) = property_key_name(&accessor.key) else {
                        continue;
                    };
                    members.push(ClassMember {
                        name: name.to_string(),
                        kind: ClassMemberKind::Property,
                        flags: MemberFlags::empty(),
                    });
                }
                _ => {}
            }
        }
        members
    }

    pub fn declared_members(&self, class: &ast::Class<'_>) -> DeclaredMembers {
        DeclaredMembers::from_members(self.members_of_class(class))
    }

    /// Constructor parameters with an accessibility modifier or `readonly`
    /// are promoted to instance properties.
    fn constructor_parameter_properties(&self, method: &ast::MethodDefinition<'_>) -> Vec<ClassMember> {
        let mut promoted = Vec::new();
        for param in &method.value.params.items {
            if param.accessibility.is_none() && !param.readonly {
                continue;
            }
            let ast::BindingPatternKind::BindingIdentifier(ident) = &param.pattern.kind else {
                continue;
            };
            let mut flags = accessibility_flags(param.accessibility);
            if param.readonly {
                flags |= MemberFlags::READONLY;
            }
            promoted.push(ClassMember {
                name: ident.name.to_string(),
                kind: ClassMemberKind::Property,
                flags,
            });
        }
        promoted
    }
}
