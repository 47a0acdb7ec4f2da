use super::{Notice, Renderer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub id: Option<String>,
    pub class: Option<String>,
    pub content: Content,
}

/// A flat, ordered list of display nodes, looked up by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    nodes: Vec<Node>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty node with the given id.
    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.nodes.push(Node {
            id: Some(id.into()),
            ..Node::default()
        });
        self
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.position(id).map(|i| &self.nodes[i])
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_deref() == Some(id))
    }

    fn content_mut(&mut self, id: &str) -> Option<&mut Content> {
        self.nodes
            .iter_mut()
            .find(|n| n.id.as_deref() == Some(id))
            .map(|n| &mut n.content)
    }

    /// Serialize the page as sibling `<div>`s.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for node in &self.nodes {
            html.push_str("<div");
            if let Some(id) = &node.id {
                html.push_str(&format!(" id=\"{}\"", escape_html(id)));
            }
            if let Some(class) = &node.class {
                html.push_str(&format!(" class=\"{}\"", escape_html(class)));
            }
            html.push('>');
            match &node.content {
                Content::Empty => {}
                Content::Text(text) => html.push_str(&escape_html(text)),
                Content::Html(markup) => html.push_str(markup),
            }
            html.push_str("</div>\n");
        }
        html
    }
}

impl Renderer for Page {
    fn has_target(&self, target: &str) -> bool {
        self.position(target).is_some()
    }

    fn set_text(&mut self, target: &str, text: &str) {
        if let Some(content) = self.content_mut(target) {
            *content = Content::Text(text.to_string());
        }
    }

    fn insert_sibling_notice(&mut self, target: &str, notice: &Notice) {
        if let Some(i) = self.position(target) {
            self.nodes.insert(
                i + 1,
                Node {
                    id: None,
                    class: Some(notice.class.clone()),
                    content: Content::Text(notice.text.clone()),
                },
            );
        }
    }

    fn set_error_content(&mut self, target: &str, message: &str) {
        if let Some(content) = self.content_mut(target) {
            *content = Content::Html(error_block(message));
        }
    }
}

/// Markup of the in-place error block.
pub fn error_block(message: &str) -> String {
    format!(
        "<div class=\"text-red-500 p-4\">\n  <i class=\"fas fa-exclamation-triangle mr-2\"></i>\n  {}\n</div>",
        escape_html(message)
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
