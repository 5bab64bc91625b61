//! Import specifier extraction using tree-sitter
//!
//! Collects, in document order, the module specifiers of `import`
//! statements, `export … from` re-exports, dynamic `import()` and CommonJS
//! `require()` calls. Pure with respect to the filesystem.

use tree_sitter::{Node, Parser};

/// Which grammar to parse a file with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFlavor {
    TypeScript,
    Tsx,
    JavaScript,
}

impl SourceFlavor {
    /// Pick a grammar from a file extension; TypeScript is the fallback.
    pub fn from_path(path: &str) -> Self {
        match path.rsplit('.').next() {
            Some("tsx") | Some("jsx") => SourceFlavor::Tsx,
            Some("js") | Some("mjs") | Some("cjs") => SourceFlavor::JavaScript,
            _ => SourceFlavor::TypeScript,
        }
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            SourceFlavor::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceFlavor::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            SourceFlavor::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// List the raw import specifiers found in `content`.
///
/// Unparseable content yields an empty list; broken files simply
/// contribute no edges.
pub fn list_import_specifiers(content: &str, flavor: SourceFlavor) -> Vec<String> {
    let mut parser = Parser::new();
    if parser.set_language(&flavor.language()).is_err() {
        tracing::warn!(?flavor, "grammar failed to load");
        return Vec::new();
    }
    let Some(tree) = parser.parse(content, None) else {
        return Vec::new();
    };
    let mut specifiers = Vec::new();
    collect(tree.root_node(), content.as_bytes(), &mut specifiers);
    specifiers
}

fn collect(node: Node, source: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "import_statement" | "export_statement" => {
            if let Some(src) = node.child_by_field_name("source") {
                push_string(src, source, out);
            }
        }
        "call_expression" => {
            if is_import_call(node, source) {
                if let Some(args) = node.child_by_field_name("arguments") {
                    let mut cursor = args.walk();
                    for child in args.children(&mut cursor) {
                        if child.kind() == "string" {
                            push_string(child, source, out);
                            break;
                        }
                    }
                }
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, source, out);
    }
}

fn is_import_call(node: Node, source: &[u8]) -> bool {
    node.child_by_field_name("function").is_some_and(|callee| {
        callee.kind() == "import"
            || callee.utf8_text(source).is_ok_and(|t| t == "require")
    })
}

fn push_string(node: Node, source: &[u8], out: &mut Vec<String>) {
    if let Ok(text) = node.utf8_text(source) {
        let spec = text
            .trim_matches('"')
            .trim_matches('\'')
            .trim_matches('`');
        if !spec.is_empty() {
            out.push(spec.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_static_imports_in_order() {
        let code = r#"
import { Leaf } from './leafs/leaf'
import * as mid from './mid'
import React from 'react'

export const start = () => mid.run(new Leaf())
"#;
        let specs = list_import_specifiers(code, SourceFlavor::TypeScript);
        assert_eq!(specs, vec!["./leafs/leaf", "./mid", "react"]);
    }

    #[test]
    fn lists_reexports_and_dynamic_imports() {
        let code = r#"
export { helper } from './helpers'
const lazy = () => import('./lazy/module')
const legacy = require('./legacy')
"#;
        let specs = list_import_specifiers(code, SourceFlavor::TypeScript);
        assert_eq!(specs, vec!["./helpers", "./lazy/module", "./legacy"]);
    }

    #[test]
    fn parses_tsx() {
        let code = r#"
import { Button } from 'components/Button'
import { Input } from './components/Input'

export const App = () => (
    <div>
        <Input />
        <Button />
    </div>
)
"#;
        let specs = list_import_specifiers(code, SourceFlavor::Tsx);
        assert_eq!(specs, vec!["components/Button", "./components/Input"]);
    }

    #[test]
    fn empty_file_has_no_imports() {
        assert!(list_import_specifiers("", SourceFlavor::TypeScript).is_empty());
        assert!(list_import_specifiers("const x = 1\n", SourceFlavor::JavaScript).is_empty());
    }
}
