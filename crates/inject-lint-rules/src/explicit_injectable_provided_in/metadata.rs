//! Reads the decorator metadata of a matched class.

use inject_lint_core::query::Selector;
use inject_lint_core::{NodeRef, SyntaxTree};

use super::selectors::{class_declaration, injectable_call, on_class, ANNOTATION};

/// Name of the provider scope field.
pub const PROVIDED_IN: &str = "providedIn";

/// Shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`
    NullLiteral,
    /// A quoted string.
    StringLiteral,
    /// The identifier `undefined`.
    UndefinedIdentifier,
    /// Anything else: identifiers, templates, calls.
    Other,
}

impl ValueKind {
    fn of(node: NodeRef<'_>) -> Self {
        match node.kind() {
            "null" => Self::NullLiteral,
            "string" => Self::StringLiteral,
            "undefined" => Self::UndefinedIdentifier,
            "identifier" if node.text() == "undefined" => Self::UndefinedIdentifier,
            _ => Self::Other,
        }
    }
}

/// The `providedIn` entry of a metadata object.
#[derive(Debug, Clone, Copy)]
pub struct MetadataField<'t> {
    /// The whole entry: a `pair` or a shorthand property.
    pub entry: NodeRef<'t>,
    /// The value node. For shorthand entries this is the entry itself.
    pub value: NodeRef<'t>,
    /// Shape of `value`.
    pub value_kind: ValueKind,
    /// `{ providedIn }` form.
    pub shorthand: bool,
}

impl<'t> MetadataField<'t> {
    /// Source text of the value.
    #[must_use]
    pub fn value_text(&self) -> &'t str {
        self.value.text()
    }

    /// Contents of a string literal value, quotes removed.
    #[must_use]
    pub fn string_value(&self) -> Option<&'t str> {
        if self.value_kind != ValueKind::StringLiteral {
            return None;
        }
        unquote(self.value.text())
    }
}

/// A decorated class under inspection.
#[derive(Debug, Clone)]
pub struct ClassCandidate<'t> {
    /// The class declaration.
    pub class: NodeRef<'t>,
    /// Class name, empty for anonymous classes.
    pub class_name: &'t str,
    /// The `decorator` node.
    pub decorator: NodeRef<'t>,
    /// The decorator calls `Injectable`.
    pub has_annotation: bool,
    /// The call's `arguments` node.
    pub arguments: Option<NodeRef<'t>>,
    /// The first argument, when it is an object literal.
    pub metadata_object: Option<NodeRef<'t>>,
    /// The first `providedIn` entry of `metadata_object`.
    pub field: Option<MetadataField<'t>>,
    /// The class is exempt from the rule.
    pub excluded: bool,
}

impl ClassCandidate<'_> {
    /// The decorator call has at least one argument.
    #[must_use]
    pub fn annotation_has_arguments(&self) -> bool {
        self.arguments.is_some_and(|a| a.named_child_count() > 0)
    }
}

/// Class declaration a decorator belongs to, looking through `export`.
#[must_use]
pub fn decorated_class(decorator: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let parent = decorator.parent()?;
    let class = if parent.kind() == "export_statement" {
        parent
            .child_by_field("declaration")
            .or_else(|| parent.child_by_field("value"))?
    } else {
        parent
    };
    class_declaration().matches(class).then_some(class)
}

/// Describes the class carrying `decorator`.
///
/// `excluded_class` marks the class as exempt when it matches. Returns `None`
/// if the decorator is not attached to a class.
#[must_use]
pub fn extract<'t>(decorator: NodeRef<'t>, excluded_class: &Selector) -> Option<ClassCandidate<'t>> {
    let class = decorated_class(decorator)?;
    let call = decorator
        .named_child(0)
        .filter(|n| n.kind() == "call_expression");

    let has_annotation = call
        .and_then(|c| c.child_by_field("function"))
        .is_some_and(|f| f.kind() == "identifier" && f.text() == ANNOTATION);
    let arguments = call.and_then(|c| c.child_by_field("arguments"));
    let metadata_object = arguments
        .and_then(|a| a.named_child(0))
        .filter(|n| n.kind() == "object");

    Some(ClassCandidate {
        class,
        class_name: class.child_by_field("name").map_or("", |n| n.text()),
        decorator,
        has_annotation,
        arguments,
        metadata_object,
        field: metadata_object.and_then(|o| find_field(o, PROVIDED_IN)),
        excluded: excluded_class.matches(class),
    })
}

/// Every `Injectable` decorator on a class in `tree`, exempt ones included.
#[must_use]
pub fn extract_all<'t>(tree: &'t SyntaxTree, excluded_class: Option<&Selector>) -> Vec<ClassCandidate<'t>> {
    let never = Selector::never();
    let excluded_class = excluded_class.unwrap_or(&never);
    injectable_call()
        .and(on_class(class_declaration()))
        .find_all(tree)
        .filter_map(|d| extract(d, excluded_class))
        .collect()
}

/// First entry of `object` named `name`.
#[must_use]
pub fn find_field<'t>(object: NodeRef<'t>, name: &str) -> Option<MetadataField<'t>> {
    object.named_children().find_map(|entry| match entry.kind() {
        "pair" => {
            let key = entry.child_by_field("key")?;
            let value = entry.child_by_field("value")?;
            key_is(key, name).then(|| MetadataField {
                entry,
                value,
                value_kind: ValueKind::of(value),
                shorthand: false,
            })
        }
        "shorthand_property_identifier" if entry.text() == name => Some(MetadataField {
            entry,
            value: entry,
            value_kind: ValueKind::Other,
            shorthand: true,
        }),
        _ => None,
    })
}

/// `name`, `'name'`, `['name']` or `` [`name`] ``.
fn key_is(key: NodeRef<'_>, name: &str) -> bool {
    match key.kind() {
        "property_identifier" => key.text() == name,
        "string" => unquote(key.text()) == Some(name),
        "computed_property_name" => key.named_child(0).is_some_and(|inner| match inner.kind() {
            "string" => unquote(inner.text()) == Some(name),
            "template_string" => {
                inner.child_of_kind("template_substitution").is_none()
                    && unquote(inner.text()) == Some(name)
            }
            _ => false,
        }),
        _ => false,
    }
}

fn unquote(text: &str) -> Option<&str> {
    text.get(1..text.len().checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_lint_core::SourceParser;
    use inject_lint_ts::TypeScriptParser;

    fn parse(src: &str) -> SyntaxTree {
        TypeScriptParser::new().parse(src).unwrap()
    }

    #[test]
    fn zero_arguments() {
        let tree = parse("@Injectable() export class Foo {}\n");
        let candidates = extract_all(&tree, None);
        assert_eq!(candidates.len(), 1);

        let foo = &candidates[0];
        assert_eq!(foo.class_name, "Foo");
        assert!(foo.has_annotation);
        assert!(!foo.annotation_has_arguments());
        assert!(foo.metadata_object.is_none());
        assert!(foo.field.is_none());
        assert!(!foo.excluded);
    }

    #[test]
    fn identifier_and_quoted_keys() {
        let tree = parse(
            "@Injectable({ providedIn: 'root' }) class A {}\n@Injectable({ 'providedIn': null }) class B {}\n",
        );
        let candidates = extract_all(&tree, None);

        let a = candidates[0].field.unwrap();
        assert_eq!(a.value_kind, ValueKind::StringLiteral);
        assert_eq!(a.value_text(), "'root'");
        assert_eq!(a.string_value(), Some("root"));

        let b = candidates[1].field.unwrap();
        assert_eq!(b.value_kind, ValueKind::NullLiteral);
        assert_eq!(b.string_value(), None);
    }

    #[test]
    fn computed_keys() {
        let tree = parse(
            "@Injectable({ ['providedIn']: 'root' }) class A {}\n@Injectable({ [`providedIn`]: null }) class B {}\n@Injectable({ [`${'provided'}In`]: null }) class C {}\n@Injectable({ [providedIn]: null }) class D {}\n",
        );
        let candidates = extract_all(&tree, None);
        assert_eq!(candidates.len(), 4);

        let a = candidates[0].field.unwrap();
        assert_eq!(a.string_value(), Some("root"));
        assert!(!a.shorthand);
        assert_eq!(candidates[1].field.unwrap().value_kind, ValueKind::NullLiteral);
        assert!(candidates[2].field.is_none());
        assert!(candidates[3].field.is_none());
    }

    #[test]
    fn anonymous_default_export() {
        let tree = parse("@Injectable() export default class {}\n");
        let candidates = extract_all(&tree, None);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].class.kind(), "class");
        assert_eq!(candidates[0].class_name, "");
        assert!(candidates[0].field.is_none());
    }

    #[test]
    fn first_occurrence_wins() {
        let tree = parse("@Injectable({ providedIn: 'any', providedIn: 'root' }) class A {}\n");
        let field = extract_all(&tree, None)[0].field.unwrap();
        assert_eq!(field.value_text(), "'any'");
    }

    #[test]
    fn shorthand_and_other_values() {
        let tree = parse(
            "const providedIn = 'root';\n@Injectable({ providedIn }) class A {}\n@Injectable({ providedIn: Scope.Root }) class B {}\n@Injectable({ providedIn: undefined }) class C {}\n",
        );
        let candidates = extract_all(&tree, None);

        let a = candidates[0].field.unwrap();
        assert!(a.shorthand);
        assert_eq!(a.value_kind, ValueKind::Other);
        assert_eq!(a.entry.text(), "providedIn");

        assert_eq!(candidates[1].field.unwrap().value_kind, ValueKind::Other);
        assert_eq!(
            candidates[2].field.unwrap().value_kind,
            ValueKind::UndefinedIdentifier
        );
    }

    #[test]
    fn unsupported_argument_and_comments() {
        let tree = parse(
            "@Injectable(META) class A {}\n@Injectable(/* keep */ { /* c */ deps: [] }) class B {}\n",
        );
        let candidates = extract_all(&tree, None);

        assert!(candidates[0].annotation_has_arguments());
        assert!(candidates[0].metadata_object.is_none());

        let b = &candidates[1];
        assert_eq!(b.metadata_object.unwrap().kind(), "object");
        assert!(b.field.is_none());
    }

    #[test]
    fn nested_objects_are_not_searched() {
        let tree = parse("@Injectable({ deps: { providedIn: 'x' } }) class A {}\n");
        assert!(extract_all(&tree, None)[0].field.is_none());
    }

    #[test]
    fn exclusion_is_recorded() {
        let tree = parse("@Injectable() class Baz implements HttpInterceptor {}\n");
        let exclusion = super::super::selectors::Exclusion::new().selector();
        let candidates = extract_all(&tree, Some(&exclusion));
        assert!(candidates[0].excluded);
    }
}
