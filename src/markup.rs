#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! A small mutable XML tree for OpenDocument content.
//!
//! Nodes are owned by their parent. Other parts of the crate refer to
//! elements through a [`NodePath`], the sequence of child indices leading
//! from the root element. Paths stay valid as long as children are only
//! appended, which is the only mutation the grader performs.

use std::{borrow::Cow, fmt::Display};

use quick_xml::{
    Reader, Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    constants::tags,
    error::{GradingError, Result},
};

/// Location of an element, as child indices starting from the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The root element.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`th child of this element.
    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with its own children
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// A CDATA section
    CData(String),
    /// A comment, kept verbatim
    Comment(String),
}

/// An element: qualified name, attributes in document order, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified name, including any namespace prefix (eg. `text:p`)
    pub name:       String,
    /// Attributes with unescaped values
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children:   Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            attributes: Vec::new(),
            children:   Vec::new(),
        }
    }

    /// Creates a detached `text:p` paragraph holding a single text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        let mut p = Self::new(tags::PARAGRAPH);
        p.children.push(Node::Text(text.into()));
        p
    }

    /// Attaches `child` as the last child.
    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Concatenates all descendant text, depth first, in document order.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Helper for [`Element::flatten_text`].
    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(e) => e.collect_text(out),
                Node::Text(t) | Node::CData(t) => out.push_str(t),
                Node::Comment(_) => {}
            }
        }
    }

    /// Pushes paths of all descendant elements called `name` onto `found`.
    fn collect_named(&self, here: &NodePath, name: &str, found: &mut Vec<NodePath>) {
        for (index, child) in self.children.iter().enumerate() {
            if let Node::Element(e) = child {
                let path = here.child(index);
                if e.name == name {
                    found.push(path.clone());
                }
                e.collect_named(&path, name, found);
            }
        }
    }
}

/// A parsed markup document.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    /// The document element
    root: Element,
}

impl Markup {
    /// Parses raw markup bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| GradingError::Parse(format!("markup is not UTF-8: {e}")))?;
        let mut reader = Reader::from_str(text);

        let parse_error = |reader: &Reader<&[u8]>, e: &dyn Display| {
            GradingError::Parse(format!("at byte {}: {e}", reader.buffer_position()))
        };

        let mut open: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            let event = reader.read_event().map_err(|e| parse_error(&reader, &e))?;
            match event {
                Event::Start(start) => open.push(element_from(&start)?),
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    attach(&mut open, &mut root, Node::Element(element))?;
                }
                Event::End(_) => {
                    let element = open.pop().ok_or_else(|| {
                        GradingError::Parse("closing tag without an opening tag".into())
                    })?;
                    attach(&mut open, &mut root, Node::Element(element))?;
                }
                Event::Text(text) => {
                    if let Some(parent) = open.last_mut() {
                        let text = text.unescape().map_err(|e| parse_error(&reader, &e))?;
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = open.last_mut() {
                        let data = String::from_utf8_lossy(&data).into_owned();
                        parent.children.push(Node::CData(data));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = open.last_mut() {
                        let comment = String::from_utf8_lossy(&comment).into_owned();
                        parent.children.push(Node::Comment(comment));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !open.is_empty() {
            return Err(GradingError::Parse(format!(
                "document ended inside `{}`",
                open.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| GradingError::Parse("document has no root element".into()))
    }

    /// The document element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Paths of every element called `name` below `scope`, in document
    /// order. `scope` itself is never included.
    pub fn find_all(&self, scope: &NodePath, name: &str) -> Result<Vec<NodePath>> {
        let mut found = Vec::new();
        self.element(scope)?.collect_named(scope, name, &mut found);
        Ok(found)
    }

    /// Resolves a path to an element.
    pub fn element(&self, path: &NodePath) -> Result<&Element> {
        let mut current = &self.root;
        for &step in &path.0 {
            current = match current.children.get(step) {
                Some(Node::Element(e)) => e,
                _ => return Err(GradingError::MissingNode(path.to_string())),
            };
        }
        Ok(current)
    }

    /// Resolves a path to an element, mutably.
    pub fn element_mut(&mut self, path: &NodePath) -> Result<&mut Element> {
        let mut current = &mut self.root;
        for &step in &path.0 {
            current = match current.children.get_mut(step) {
                Some(Node::Element(e)) => e,
                _ => return Err(GradingError::MissingNode(path.to_string())),
            };
        }
        Ok(current)
    }

    /// Text content of the element at `path`; see [`Element::flatten_text`].
    pub fn flatten_text(&self, path: &NodePath) -> Result<String> {
        Ok(self.element(path)?.flatten_text())
    }

    /// Attaches `child` as the last child of the element at `parent`.
    pub fn append_child(&mut self, parent: &NodePath, child: Node) -> Result<()> {
        self.element_mut(parent)?.append_child(child);
        Ok(())
    }

    /// Renders the tree as UTF-8 markup with an XML declaration.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }
}

/// Builds a childless element from a start tag.
fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| GradingError::Parse(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| GradingError::Parse(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Attaches a finished node to the innermost open element, or makes it the
/// root when nothing is open.
fn attach(open: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    match (node, root.is_some()) {
        (Node::Element(element), false) => {
            *root = Some(element);
            Ok(())
        }
        _ => Err(GradingError::Parse("more than one root element".into())),
    }
}

/// Writes a single event, normalising the writer's error type.
fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| GradingError::Serialize(e.to_string()))
}

/// Recursively writes an element and its children.
fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
            Node::CData(t) => emit(writer, Event::CData(BytesCData::new(t.as_str())))?,
            Node::Comment(t) => {
                emit(writer, Event::Comment(BytesText::from_escaped(Cow::Borrowed(t.as_str()))))?
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:office" xmlns:text="urn:text"><office:body><office:text><text:p text:style-name="P1">Hello <text:span>big</text:span> world &amp; more</text:p><text:p/></office:text></office:body></office:document-content>"#;

    #[test]
    fn finds_elements_in_document_order() {
        let markup = Markup::parse(SAMPLE.as_bytes()).unwrap();
        let paragraphs = markup.find_all(&NodePath::root(), "text:p").unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            markup.flatten_text(&paragraphs[0]).unwrap(),
            "Hello big world & more"
        );
        assert_eq!(markup.flatten_text(&paragraphs[1]).unwrap(), "");
    }

    #[test]
    fn find_all_excludes_the_scope_itself() {
        let markup = Markup::parse(SAMPLE.as_bytes()).unwrap();
        let bodies = markup.find_all(&NodePath::root(), "office:text").unwrap();
        assert_eq!(bodies.len(), 1);
        assert!(markup.find_all(&bodies[0], "office:text").unwrap().is_empty());
    }

    #[test]
    fn serialization_keeps_prefixes_and_escapes() {
        let markup = Markup::parse(SAMPLE.as_bytes()).unwrap();
        let out = String::from_utf8(markup.serialize().unwrap()).unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(out.contains(r#"<text:p text:style-name="P1">"#));
        assert!(out.contains("world &amp; more"));
        assert_eq!(Markup::parse(out.as_bytes()).unwrap(), markup);
    }

    #[test]
    fn appended_paragraph_is_serialized() {
        let mut markup = Markup::parse(SAMPLE.as_bytes()).unwrap();
        let body = markup.find_all(&NodePath::root(), "office:text").unwrap()[0].clone();
        markup
            .append_child(&body, Node::Element(Element::paragraph("a < b")))
            .unwrap();
        let out = String::from_utf8(markup.serialize().unwrap()).unwrap();
        assert!(out.contains("<text:p>a &lt; b</text:p></office:text>"));
    }

    #[test]
    fn rejects_unbalanced_markup() {
        assert!(matches!(
            Markup::parse(b"<a><b></a>"),
            Err(GradingError::Parse(_))
        ));
        assert!(matches!(Markup::parse(b"<a>"), Err(GradingError::Parse(_))));
        assert!(matches!(Markup::parse(b""), Err(GradingError::Parse(_))));
    }

    #[test]
    fn stale_paths_are_reported() {
        let markup = Markup::parse(SAMPLE.as_bytes()).unwrap();
        let bogus = NodePath::root().child(7);
        assert!(matches!(
            markup.element(&bogus),
            Err(GradingError::MissingNode(_))
        ));
    }
}
