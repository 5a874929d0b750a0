use crate::api::models::MimeNode;

/// Structural view of a [`MimeNode`]: either a container of sub-parts or a
/// leaf carrying content.
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    Container { parts: &'a [MimeNode] },
    Leaf(Leaf<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct Leaf<'a> {
    pub part_id: &'a str,
    pub mime_type: &'a str,
    pub filename: Option<&'a str>,
    pub content: LeafContent<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafContent<'a> {
    /// base64url encoded bytes carried in the message itself.
    Inline(&'a str),
    /// Bytes stored out of band, fetched separately by id.
    Attachment { attachment_id: &'a str, size: u64 },
    Empty,
}

impl<'a> Leaf<'a> {
    /// A leaf is an attachment iff it has a non-empty filename and its bytes
    /// live out of band.
    pub fn is_attachment(&self) -> bool {
        self.filename.is_some_and(|name| !name.is_empty())
            && matches!(self.content, LeafContent::Attachment { .. })
    }

    /// Inline data of a `text/plain` leaf that is not an attachment.
    pub fn plain_text_data(&self) -> Option<&'a str> {
        if self.is_attachment() || self.mime_type != "text/plain" {
            return None;
        }

        match self.content {
            LeafContent::Inline(data) => Some(data),
            _ => None,
        }
    }
}

impl MimeNode {
    pub fn is_container(&self) -> bool {
        !self.parts.is_empty() || self.mime_type.starts_with("multipart/")
    }

    pub fn classify(&self) -> Part<'_> {
        if self.is_container() {
            return Part::Container { parts: &self.parts };
        }

        let body = self.body.as_ref();
        let named = self.filename.as_deref().is_some_and(|name| !name.is_empty());
        let size = body.map(|body| body.size).unwrap_or_default();
        // Unnamed parts keep their inline data even when an attachment id is present.
        let content = match (
            body.and_then(|body| body.attachment_id.as_deref()),
            body.and_then(|body| body.data.as_deref()),
        ) {
            (Some(attachment_id), _) if named => LeafContent::Attachment {
                attachment_id,
                size,
            },
            (_, Some(data)) => LeafContent::Inline(data),
            (Some(attachment_id), None) => LeafContent::Attachment {
                attachment_id,
                size,
            },
            (None, None) => LeafContent::Empty,
        };

        Part::Leaf(Leaf {
            part_id: self.part_id.as_deref().unwrap_or_default(),
            mime_type: &self.mime_type,
            filename: self.filename.as_deref(),
            content,
        })
    }

    /// Depth-first, document-order traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a MIME tree backed by an explicit stack, so deep
/// trees cannot exhaust the call stack.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a MimeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a MimeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.parts.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::PartBody;

    fn leaf(part_id: &str, mime_type: &str) -> MimeNode {
        MimeNode {
            part_id: Some(part_id.to_string()),
            mime_type: mime_type.to_string(),
            body: Some(PartBody {
                size: 1,
                data: Some("eA==".to_string()),
                attachment_id: None,
            }),
            ..MimeNode::default()
        }
    }

    fn container(part_id: &str, parts: Vec<MimeNode>) -> MimeNode {
        MimeNode {
            part_id: Some(part_id.to_string()),
            mime_type: "multipart/mixed".to_string(),
            parts,
            ..MimeNode::default()
        }
    }

    #[test]
    fn walks_in_document_order() {
        let tree = container(
            "",
            vec![
                container("0", vec![leaf("0.0", "text/plain"), leaf("0.1", "text/html")]),
                leaf("1", "image/png"),
            ],
        );

        let order = tree
            .walk()
            .map(|node| node.part_id.clone().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(order, ["", "0", "0.0", "0.1", "1"]);
    }

    #[test]
    fn survives_very_deep_trees() {
        let mut node = leaf("deep", "text/plain");
        for depth in 0..100_000 {
            node = container(&depth.to_string(), vec![node]);
        }

        assert_eq!(node.walk().count(), 100_001);

        // Unwind iteratively; the derived Drop would recurse.
        let mut pending = vec![node];
        while let Some(mut next) = pending.pop() {
            pending.append(&mut next.parts);
        }
    }

    #[test]
    fn multipart_without_parts_is_still_a_container() {
        let empty = container("0", Vec::new());
        assert!(matches!(empty.classify(), Part::Container { parts } if parts.is_empty()));
    }

    #[test]
    fn attachment_requires_filename_and_attachment_id() {
        let mut node = leaf("1", "application/pdf");
        node.filename = Some("report.pdf".to_string());
        let Part::Leaf(inline) = node.classify() else {
            panic!("expected leaf");
        };
        assert!(!inline.is_attachment());

        node.body = Some(PartBody {
            size: 2048,
            data: None,
            attachment_id: Some("att-1".to_string()),
        });
        let Part::Leaf(stub) = node.classify() else {
            panic!("expected leaf");
        };
        assert!(stub.is_attachment());
        assert_eq!(
            stub.content,
            LeafContent::Attachment {
                attachment_id: "att-1",
                size: 2048
            }
        );

        node.filename = Some(String::new());
        let Part::Leaf(unnamed) = node.classify() else {
            panic!("expected leaf");
        };
        assert!(!unnamed.is_attachment());
    }

    #[test]
    fn plain_text_attachment_is_not_a_body_candidate() {
        let mut node = leaf("1", "text/plain");
        node.filename = Some("notes.txt".to_string());
        node.body = Some(PartBody {
            size: 10,
            data: Some("eA==".to_string()),
            attachment_id: Some("att-2".to_string()),
        });

        let Part::Leaf(leaf) = node.classify() else {
            panic!("expected leaf");
        };
        assert!(leaf.is_attachment());
        assert_eq!(leaf.plain_text_data(), None);
    }

    #[test]
    fn unnamed_leaf_with_inline_data_stays_inline() {
        let mut node = leaf("0", "text/plain");
        node.body = Some(PartBody {
            size: 1,
            data: Some("eA==".to_string()),
            attachment_id: Some("att-3".to_string()),
        });

        let Part::Leaf(leaf) = node.classify() else {
            panic!("expected leaf");
        };
        assert!(!leaf.is_attachment());
        assert_eq!(leaf.content, LeafContent::Inline("eA=="));
        assert_eq!(leaf.plain_text_data(), Some("eA=="));
    }
}
