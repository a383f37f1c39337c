//! TypeScript parser using Tree-sitter.

use inject_lint_core::tree::NodeSpec;
use inject_lint_core::{ParseError, SourceParser, Span, SyntaxTree, TreeBuilder};
use tree_sitter::{Language, Node, Parser, Tree};

/// Grammar variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl Dialect {
    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx"],
        }
    }
}

/// Parses TypeScript source into an owned [`SyntaxTree`].
///
/// Sources containing syntax errors are rejected.
pub struct TypeScriptParser {
    dialect: Dialect,
    language: Language,
}

impl TypeScriptParser {
    /// Creates a parser for plain TypeScript.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dialect(Dialect::TypeScript)
    }

    /// Creates a parser for TSX.
    #[must_use]
    pub fn tsx() -> Self {
        Self::with_dialect(Dialect::Tsx)
    }

    /// Creates a parser for `dialect`.
    #[must_use]
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            language: dialect.language(),
        }
    }

    /// Returns the grammar variant.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn parse_native(&self, source: &str) -> Result<Tree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: self.language_id(),
                message: e.to_string(),
            })?;
        parser.parse(source, None).ok_or(ParseError::NoTree)
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for TypeScriptParser {
    fn language_id(&self) -> &'static str {
        match self.dialect {
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.dialect.extensions()
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tree = self.parse_native(source)?;
        let root = tree.root_node();
        if root.has_error() {
            let node = first_error(root).unwrap_or(root);
            let pos = node.start_position();
            return Err(ParseError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }
        convert(&tree, source)
    }
}

/// Finds the first error or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn spec_for(node: Node<'_>, field: Option<&'static str>) -> NodeSpec {
    let span = Span::new(node.start_byte(), node.end_byte());
    let spec = if node.is_named() {
        NodeSpec::named(node.kind(), span)
    } else {
        NodeSpec::token(node.kind(), span)
    };
    let spec = spec.extra(node.is_extra());
    match field {
        Some(name) => spec.field(name),
        None => spec,
    }
}

/// Copies a Tree-sitter tree into a [`SyntaxTree`] with a preorder cursor walk.
fn convert(tree: &Tree, source: &str) -> Result<SyntaxTree, ParseError> {
    let mut builder = TreeBuilder::new(source);
    let mut cursor = tree.walk();

    loop {
        builder.open(spec_for(cursor.node(), cursor.field_name()))?;
        if cursor.goto_first_child() {
            continue;
        }
        builder.close()?;

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                tracing::trace!("converted {} bytes", source.len());
                return Ok(builder.finish()?);
            }
            builder.close()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> SyntaxTree {
        TypeScriptParser::new().parse(src).unwrap()
    }

    fn first<'t>(tree: &'t SyntaxTree, kind: &str) -> inject_lint_core::NodeRef<'t> {
        tree.nodes().find(|n| n.kind() == kind).unwrap()
    }

    #[test]
    fn root_is_program_and_covers_source() {
        let tree = parse("const a = 1;\n");
        assert_eq!(tree.root().kind(), "program");
        assert_eq!(tree.root().parent(), None);
        assert!(tree.node_count() > 3);
    }

    #[test]
    fn decorated_class_exposes_fields() {
        let src = "@Injectable({ providedIn: 'root' })\nclass UserService {}\n";
        let tree = parse(src);

        let class = first(&tree, "class_declaration");
        assert_eq!(class.child_by_field("name").unwrap().text(), "UserService");
        assert_eq!(class.child_by_field("body").unwrap().kind(), "class_body");

        let decorator = class.child_by_field("decorator").unwrap();
        assert_eq!(decorator.kind(), "decorator");
        let call = decorator.named_child(0).unwrap();
        assert_eq!(call.kind(), "call_expression");
        assert_eq!(call.child_by_field("function").unwrap().text(), "Injectable");

        let args = call.child_by_field("arguments").unwrap();
        let object = args.named_child(0).unwrap();
        assert_eq!(object.kind(), "object");
        let pair = object.named_child(0).unwrap();
        assert_eq!(pair.child_by_field("key").unwrap().text(), "providedIn");
        let value = pair.child_by_field("value").unwrap();
        assert_eq!(value.kind(), "string");
        assert_eq!(value.text(), "'root'");
        assert_eq!(value.start_position().line, 1);
    }

    #[test]
    fn decorator_before_export_attaches_to_export_statement() {
        let tree = parse("@Injectable()\nexport class A {}\n");
        let export = first(&tree, "export_statement");
        assert_eq!(export.child_by_field("decorator").unwrap().text(), "@Injectable()");
        assert_eq!(
            export.child_by_field("declaration").unwrap().kind(),
            "class_declaration"
        );
    }

    #[test]
    fn comments_are_extras() {
        let tree = parse("@Injectable(/* none */)\nclass A {}\n");
        let comment = first(&tree, "comment");
        assert!(comment.is_extra());
        let args = first(&tree, "arguments");
        assert_eq!(args.named_child_count(), 0);
    }

    #[test]
    fn implements_clause_shapes() {
        let tree = parse(
            "class A implements HttpInterceptor, ng.OnInit, Base<string> {}\n",
        );
        let clause = first(&tree, "implements_clause");
        let kinds: Vec<_> = clause.named_children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec!["type_identifier", "nested_type_identifier", "generic_type"]
        );
    }

    #[test]
    fn syntax_errors_are_rejected_with_position() {
        let err = TypeScriptParser::new()
            .parse("class A {\n  foo( {\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn tsx_dialect_parses_jsx() {
        let parser = TypeScriptParser::tsx();
        assert!(parser.handles("tsx"));
        assert!(!parser.handles("ts"));
        let tree = parser.parse("const el = <div>hi</div>;\n").unwrap();
        assert!(tree.nodes().any(|n| n.kind() == "jsx_element"));
    }

    #[test]
    fn typescript_dialect_extensions() {
        let parser = TypeScriptParser::default();
        assert_eq!(parser.language_id(), "typescript");
        assert!(parser.handles("ts"));
        assert!(parser.handles("mts"));
        assert!(parser.handles("cts"));
    }
}
