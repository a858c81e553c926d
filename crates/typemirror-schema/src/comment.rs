//! Comment normalization.
//!
//! TypeDoc has emitted two comment layouts over time:
//!
//! - legacy: `{ shortText, text, returns, tags: [{ tag, text, paramName }] }`
//! - newer:  `{ summary: [{ kind, text }], blockTags: [{ tag, name, content }] }`
//!
//! Both collapse into one [`Comment`] so downstream code never branches on
//! the producer version.

use crate::{JsonCommentPart, json::JsonComment};

/// A normalized documentation comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    /// First paragraph.
    pub summary: String,
    /// Remaining description text.
    pub body: String,
    /// `@returns` text, if any.
    pub returns: Option<String>,
    /// Other block tags, in declared order.
    pub tags: Vec<CommentTag>,
}

/// One `@tag` entry of a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentTag {
    /// Tag name without the leading `@`.
    pub tag: String,
    /// Parameter name for `@param` tags.
    pub param: Option<String>,
    pub text: String,
}

impl Comment {
    /// Normalize a wire comment.
    pub fn from_json(comment: &JsonComment) -> Self {
        let mut summary = comment.short_text.clone().unwrap_or_default();
        if summary.is_empty() {
            summary = join_parts(&comment.summary);
        }

        let body = comment.text.clone().unwrap_or_default();
        let mut returns = comment.returns.clone().filter(|text| !text.trim().is_empty());

        let mut tags: Vec<CommentTag> = comment
            .tags
            .iter()
            .map(|tag| CommentTag {
                tag: strip_at(&tag.tag).to_string(),
                param: tag.param_name.clone(),
                text: tag.text.trim().to_string(),
            })
            .collect();

        for block in &comment.block_tags {
            let tag = strip_at(&block.tag);
            let text = join_parts(&block.content);
            if (tag == "returns" || tag == "return") && returns.is_none() {
                returns = Some(text);
                continue;
            }
            tags.push(CommentTag {
                tag: tag.to_string(),
                param: block.name.clone(),
                text,
            });
        }

        Self {
            summary: summary.trim().to_string(),
            body: body.trim().to_string(),
            returns,
            tags,
        }
    }

    /// True when no part of the comment carries text.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.body.is_empty()
            && self.returns.is_none()
            && self.tags.is_empty()
    }

    /// Summary and body joined by a blank line.
    pub fn text(&self) -> String {
        match (self.summary.is_empty(), self.body.is_empty()) {
            (false, false) => format!("{}\n\n{}", self.summary, self.body),
            (false, true) => self.summary.clone(),
            (true, false) => self.body.clone(),
            (true, true) => String::new(),
        }
    }

    /// First tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&CommentTag> {
        self.tags.iter().find(|tag| tag.tag == name)
    }
}

fn strip_at(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

fn join_parts(parts: &[JsonCommentPart]) -> String {
    parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<String>()
        .trim()
        .to_string()
}
