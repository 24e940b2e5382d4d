// ABOUTME: In-memory markup model for slide fragments
// ABOUTME: Parses a strict HTML subset into an element arena and serializes it back

use crate::errors::{DeckError, Result};

pub type NodeId = usize;

const VOID_TAGS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub classes: Vec<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Arena-backed tree for one slide fragment. Top-level elements are the
/// candidate slides; every class mutation goes through this type so the
/// projector has a single apply surface.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Parse a slide fragment. Accepts elements, text, comments, quoted
    /// attributes and void/self-closing tags; anything else is a
    /// composition-time error.
    pub fn parse_fragment(input: &str) -> Result<Document> {
        Parser::new(input).parse()
    }

    /// Top-level elements with the given tag, in document order.
    pub fn top_level(&self, tag: &str) -> Vec<NodeId> {
        self.roots
            .iter()
            .copied()
            .filter(|&id| self.element(id).map(|e| e.tag == tag).unwrap_or(false))
            .collect()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| {
            el.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Read a `data-*` attribute by its suffix, like the DOM dataset.
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &format!("data-{}", key))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(Node::Element(el)) = self.nodes.get_mut(id) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(Node::Element(el)) = self.nodes.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Element descendants of `id` in document (pre-order) order,
    /// excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.element(id) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            if let Some(el) = self.element(next) {
                out.push(next);
                for &child in el.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Serialize the whole fragment back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.write_node(root, &mut out);
            out.push('\n');
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id] {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                if !el.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
                }
                for (name, value) in &el.attrs {
                    if value.is_empty() {
                        out.push_str(&format!(" {}", name));
                    } else {
                        out.push_str(&format!(" {}=\"{}\"", name, value));
                    }
                }
                if VOID_TAGS.contains(&el.tag.as_str()) && el.children.is_empty() {
                    out.push('>');
                    return;
                }
                out.push('>');
                for &child in &el.children {
                    self.write_node(child, out);
                }
                out.push_str(&format!("</{}>", el.tag));
            }
        }
    }

    fn push_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(p) => {
                if let Some(Node::Element(el)) = self.nodes.get_mut(p) {
                    el.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Document> {
        let mut doc = Document::default();
        let mut open: Vec<NodeId> = Vec::new();

        while self.pos < self.input.len() {
            if self.peek() == b'<' {
                if self.starts_with("<!--") {
                    self.skip_comment()?;
                } else if self.starts_with("</") {
                    let tag = self.read_close_tag()?;
                    let top = open.pop().ok_or_else(|| {
                        DeckError::MarkupError(format!("Unmatched closing tag </{}>", tag))
                    })?;
                    let open_tag = doc.element(top).map(|e| e.tag.clone()).unwrap_or_default();
                    if open_tag != tag {
                        return Err(DeckError::MarkupError(format!(
                            "Expected </{}>, found </{}>",
                            open_tag, tag
                        )));
                    }
                } else {
                    let (element, self_closed) = self.read_open_tag()?;
                    let is_void = VOID_TAGS.contains(&element.tag.as_str());
                    let parent = open.last().copied();
                    let id = doc.push_node(
                        Node::Element(Element { parent, ..element }),
                        parent,
                    );
                    if !self_closed && !is_void {
                        open.push(id);
                    }
                }
            } else {
                let text = self.read_text();
                if !text.is_empty() {
                    let parent = open.last().copied();
                    doc.push_node(Node::Text(text), parent);
                }
            }
        }

        if let Some(&unclosed) = open.last() {
            let tag = doc.element(unclosed).map(|e| e.tag.clone()).unwrap_or_default();
            return Err(DeckError::MarkupError(format!("Unclosed <{}>", tag)));
        }

        Ok(doc)
    }

    fn peek(&self) -> u8 {
        self.input[self.pos]
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix.as_bytes())
    }

    fn skip_comment(&mut self) -> Result<()> {
        let rest = &self.input[self.pos..];
        match rest.windows(3).position(|w| w == b"-->") {
            Some(offset) => {
                self.pos += offset + 3;
                Ok(())
            }
            None => Err(DeckError::MarkupError("Unterminated comment".to_string())),
        }
    }

    fn read_text(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() && self.peek() != b'<' {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn read_close_tag(&mut self) -> Result<String> {
        self.pos += 2; // "</"
        let tag = self.read_name();
        self.skip_whitespace();
        if self.pos >= self.input.len() || self.peek() != b'>' {
            return Err(DeckError::MarkupError(format!(
                "Malformed closing tag </{}",
                tag
            )));
        }
        self.pos += 1;
        Ok(tag)
    }

    fn read_open_tag(&mut self) -> Result<(Element, bool)> {
        self.pos += 1; // "<"
        let tag = self.read_name();
        if tag.is_empty() {
            return Err(DeckError::MarkupError(format!(
                "Stray '<' at byte {}",
                self.pos
            )));
        }

        let mut attrs = Vec::new();
        let mut classes = Vec::new();
        loop {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                return Err(DeckError::MarkupError(format!("Unterminated <{}>", tag)));
            }
            match self.peek() {
                b'>' => {
                    self.pos += 1;
                    return Ok((
                        Element {
                            tag,
                            attrs,
                            classes,
                            children: Vec::new(),
                            parent: None,
                        },
                        false,
                    ));
                }
                b'/' => {
                    self.pos += 1;
                    if self.pos < self.input.len() && self.peek() == b'>' {
                        self.pos += 1;
                        return Ok((
                            Element {
                                tag,
                                attrs,
                                classes,
                                children: Vec::new(),
                                parent: None,
                            },
                            true,
                        ));
                    }
                    return Err(DeckError::MarkupError(format!(
                        "Malformed self-closing <{}>",
                        tag
                    )));
                }
                _ => {
                    let name = self.read_name();
                    if name.is_empty() {
                        return Err(DeckError::MarkupError(format!(
                            "Bad attribute in <{}> at byte {}",
                            tag, self.pos
                        )));
                    }
                    let value = if self.pos < self.input.len() && self.peek() == b'=' {
                        self.pos += 1;
                        self.read_quoted_value(&tag)?
                    } else {
                        String::new()
                    };
                    if name == "class" {
                        classes = value.split_whitespace().map(str::to_string).collect();
                    } else {
                        attrs.push((name, value));
                    }
                }
            }
        }
    }

    fn read_quoted_value(&mut self, tag: &str) -> Result<String> {
        if self.pos >= self.input.len() {
            return Err(DeckError::MarkupError(format!(
                "Unterminated attribute in <{}>",
                tag
            )));
        }
        let quote = self.peek();
        if quote != b'"' && quote != b'\'' {
            return Err(DeckError::MarkupError(format!(
                "Attribute values in <{}> must be quoted",
                tag
            )));
        }
        self.pos += 1;
        let start = self.pos;
        while self.pos < self.input.len() && self.peek() != quote {
            self.pos += 1;
        }
        if self.pos >= self.input.len() {
            return Err(DeckError::MarkupError(format!(
                "Unterminated attribute value in <{}>",
                tag
            )));
        }
        let value = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        self.pos += 1;
        Ok(value)
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            let c = self.peek();
            if c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':' {
                self.pos += 1;
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
    }
}
