// ABOUTME: Bullet selector parsing and matching
// ABOUTME: Supports the selector subset decks use: classes, :not(), child and descendant combinators

use crate::dom::{Document, NodeId};
use crate::errors::{DeckError, Result};

/// A parsed selector list, e.g. `.build, .build-items > *:not(.build-items)`.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone)]
struct Complex {
    compounds: Vec<Compound>,
    // combinators[i] links compounds[i] to compounds[i + 1]
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    universal: bool,
    tag: Option<String>,
    classes: Vec<String>,
    not: Vec<Compound>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal && self.tag.is_none() && self.classes.is_empty() && self.not.is_empty()
    }
}

impl Selector {
    pub fn parse(source: &str) -> Result<Selector> {
        let mut alternatives = Vec::new();
        for part in split_top_level(source) {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return Err(err(source, "empty selector in list"));
            }
            alternatives.push(parse_complex(source, trimmed)?);
        }
        if alternatives.is_empty() {
            return Err(err(source, "selector is empty"));
        }
        Ok(Selector {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the element matches any alternative in the list.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| matches_complex(doc, id, complex))
    }
}

fn err(selector: &str, message: &str) -> DeckError {
    DeckError::SelectorError {
        selector: selector.to_string(),
        message: message.to_string(),
    }
}

/// Split on commas that are not inside `:not(...)`.
fn split_top_level(source: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in source.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn parse_complex(source: &str, input: &str) -> Result<Complex> {
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut chars = input.chars().peekable();
    let mut pending: Option<Combinator> = None;

    loop {
        // Whitespace between compounds is the descendant combinator
        // unless a child combinator claims it.
        let mut saw_space = false;
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                saw_space = true;
                chars.next();
            } else if c == '>' {
                if pending == Some(Combinator::Child) {
                    return Err(err(source, "doubled '>' combinator"));
                }
                pending = Some(Combinator::Child);
                chars.next();
            } else {
                break;
            }
        }
        if chars.peek().is_none() {
            break;
        }
        if saw_space && pending.is_none() && !compounds.is_empty() {
            pending = Some(Combinator::Descendant);
        }

        let compound = parse_compound(source, &mut chars)?;
        if compound.is_empty() {
            return Err(err(source, "expected a compound selector"));
        }
        if compounds.is_empty() {
            if pending.is_some() {
                return Err(err(source, "selector cannot start with a combinator"));
            }
        } else {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(compound);
    }

    if compounds.is_empty() {
        return Err(err(source, "expected a compound selector"));
    }
    if pending.is_some() {
        return Err(err(source, "dangling combinator"));
    }
    Ok(Complex {
        compounds,
        combinators,
    })
}

fn parse_compound(
    source: &str,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Compound> {
    let mut compound = Compound::default();
    loop {
        match chars.peek().copied() {
            Some('*') => {
                chars.next();
                compound.universal = true;
            }
            Some('.') => {
                chars.next();
                let name = read_ident(chars);
                if name.is_empty() {
                    return Err(err(source, "'.' must be followed by a class name"));
                }
                compound.classes.push(name);
            }
            Some(':') => {
                chars.next();
                let name = read_ident(chars);
                if name != "not" {
                    return Err(err(source, &format!("unsupported pseudo-class :{}", name)));
                }
                if chars.next() != Some('(') {
                    return Err(err(source, ":not must be followed by '('"));
                }
                let mut inner = String::new();
                let mut depth = 1usize;
                for c in chars.by_ref() {
                    match c {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    inner.push(c);
                }
                if depth != 0 {
                    return Err(err(source, "unterminated :not("));
                }
                let mut inner_chars = inner.trim().chars().peekable();
                let negated = parse_compound(source, &mut inner_chars)?;
                if negated.is_empty() || inner_chars.peek().is_some() {
                    return Err(err(source, ":not() takes a single compound selector"));
                }
                compound.not.push(negated);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                if compound.tag.is_some() || !compound.classes.is_empty() {
                    return Err(err(source, "type selector must come first in a compound"));
                }
                compound.tag = Some(read_ident(chars));
            }
            _ => break,
        }
    }
    Ok(compound)
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn matches_complex(doc: &Document, id: NodeId, complex: &Complex) -> bool {
    matches_from(doc, id, complex, complex.compounds.len() - 1)
}

// Right-to-left matching with ancestor backtracking for descendant
// combinators.
fn matches_from(doc: &Document, id: NodeId, complex: &Complex, index: usize) -> bool {
    if !matches_compound(doc, id, &complex.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }
    let parent = doc.element(id).and_then(|el| el.parent);
    match complex.combinators[index - 1] {
        Combinator::Child => {
            parent.map_or(false, |p| matches_from(doc, p, complex, index - 1))
        }
        Combinator::Descendant => {
            let mut ancestor = parent;
            while let Some(p) = ancestor {
                if matches_from(doc, p, complex, index - 1) {
                    return true;
                }
                ancestor = doc.element(p).and_then(|el| el.parent);
            }
            false
        }
    }
}

fn matches_compound(doc: &Document, id: NodeId, compound: &Compound) -> bool {
    let el = match doc.element(id) {
        Some(el) => el,
        None => return false,
    };
    if let Some(tag) = &compound.tag {
        if el.tag != *tag {
            return false;
        }
    }
    if !compound
        .classes
        .iter()
        .all(|class| el.classes.iter().any(|c| c == class))
    {
        return false;
    }
    !compound
        .not
        .iter()
        .any(|negated| matches_compound(doc, id, negated))
}
