//! Element Query
//!
//! querySelector / querySelectorAll / closest over a small selector subset:
//! type, `#id`, `.class`, `[attr]` and `[attr="value"]`, combined into
//! compounds and joined by the descendant combinator.

use crate::{DomError, DomTree, ElementData, NodeId};

/// Attribute condition inside `[...]`
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
}

/// One compound selector, e.g. `button.primary[name="add"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorPart {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl SelectorPart {
    fn parse(src: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(src.to_string());
        let mut part = SelectorPart::default();
        let mut chars = src.chars().peekable();

        if chars.peek() == Some(&'*') {
            chars.next();
        } else if chars.peek().is_some_and(|c| is_ident_char(*c)) {
            part.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '#' => {
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(invalid());
                    }
                    part.id = Some(ident);
                }
                '.' => {
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(invalid());
                    }
                    part.classes.push(ident);
                }
                '[' => {
                    let name = take_ident(&mut chars).to_ascii_lowercase();
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    match chars.next() {
                        Some(']') => part.attrs.push(AttrMatch::Exists(name)),
                        Some('=') => {
                            let value = match chars.peek() {
                                Some(&(q @ ('"' | '\''))) => {
                                    chars.next();
                                    chars.by_ref().take_while(|&c| c != q).collect()
                                }
                                _ => take_ident(&mut chars),
                            };
                            if chars.next() != Some(']') {
                                return Err(invalid());
                            }
                            part.attrs.push(AttrMatch::Equals(name, value));
                        }
                        _ => return Err(invalid()),
                    }
                }
                _ => return Err(invalid()),
            }
        }

        Ok(part)
    }

    fn matches(&self, elem: &ElementData) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != elem.tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| elem.id() != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|c| elem.class_list.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match a {
            AttrMatch::Exists(name) => elem.has_attr(name),
            AttrMatch::Equals(name, value) => elem.get_attr(name) == Some(value.as_str()),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

/// Split on whitespace that is outside `[...]` and quotes
fn split_compounds(src: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0u32;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, c) in src.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    out.push(&src[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(&src[s..]);
    }
    out
}

/// Parsed selector: compounds joined by descendant combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SelectorPart>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(src: &str) -> Result<Self, DomError> {
        if src.contains([',', '>', '+', '~', ':']) {
            return Err(DomError::InvalidSelector(src.to_string()));
        }
        let parts = split_compounds(src)
            .into_iter()
            .map(SelectorPart::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err(DomError::InvalidSelector(src.to_string()));
        }
        Ok(Self { parts })
    }

    /// Check whether `node` matches. Ancestors may lie outside any query scope,
    /// as with the DOM's own `querySelectorAll`.
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        let Ok(elem) = tree.element(node) else {
            return false;
        };
        if !last.matches(elem) {
            return false;
        }

        // Descendant-only chains can be matched greedily, nearest ancestor first
        let mut ancestors = tree.ancestors(node);
        rest.iter().rev().all(|part| {
            ancestors.any(|a| tree.element(a).is_ok_and(|e| part.matches(e)))
        })
    }
}

impl DomTree {
    /// All matching descendants of `scope`, in document order
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// First matching descendant of `scope`
    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }

    /// querySelector
    pub fn query_selector(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, DomError> {
        Ok(self.select_first(scope, &Selector::parse(selector)?))
    }

    /// querySelectorAll
    pub fn query_selector_all(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        Ok(self.select_all(scope, &Selector::parse(selector)?))
    }

    /// Nearest inclusive ancestor matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&n| selector.matches(self, n)))
    }

    /// Elements carrying `class`, in document order
    pub fn get_elements_by_class_name(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }
}
