//! The syntax tree handed to the reader. Nodes are classified by a free-form
//! tag string (e.g. `expr|number|regex`), so callers test tags by substring.

pub const ROOT_TAG: &str = ">";
pub const ANCHOR_TAG: &str = "regex";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub tag: String,
    pub contents: String,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn leaf(tag: &str, contents: &str) -> Self {
        Self {
            tag: String::from(tag),
            contents: String::from(contents),
            children: Vec::new(),
        }
    }

    pub fn branch(tag: &str, children: Vec<SyntaxNode>) -> Self {
        Self {
            tag: String::from(tag),
            contents: String::new(),
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.tag == ROOT_TAG
    }

    pub fn has_tag(&self, fragment: &str) -> bool {
        self.tag.contains(fragment)
    }

    /// Brackets and anchors carry no meaning once the tree is built.
    pub fn is_punctuation(&self) -> bool {
        match self.contents.as_str() {
            "(" | ")" | "{" | "}" => true,
            _ => self.tag == ANCHOR_TAG,
        }
    }
}
