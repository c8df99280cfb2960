//! Null-safe path queries over nested JSON values.
//!
//! The upstream payloads omit fields unpredictably (deleted posts, restricted
//! authors, missing poll cards), so absence is a first-class outcome here:
//! evaluating a query against a tree missing any segment yields
//! [`PathResult::Absent`] or an empty projection, never an error.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Plain field access: `legacy`.
    Field(String),
    /// Wildcard projection over a list field: `urls[]`.
    Each(String),
}

/// A parsed dotted/bracketed path expression, e.g.
/// `legacy.entities.urls[].expanded_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    segments: Vec<Segment>,
}

impl PathQuery {
    /// Parsing is total: every string is a valid query. A segment ending in
    /// `[]` projects over the list stored under that field.
    pub fn parse(expr: &str) -> Self {
        let segments = expr
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_suffix("[]") {
                Some(name) => Segment::Each(name.to_string()),
                None => Segment::Field(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Walk `root` along the query. A missing key, a wrong type at an
    /// intermediate node, or an empty list all degrade to `Absent` (or an
    /// empty `Many` once a projection was entered).
    pub fn eval<'a>(&self, root: &'a Value) -> PathResult<'a> {
        let mut nodes = vec![root];
        let mut projected = false;

        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    nodes = nodes
                        .into_iter()
                        .filter_map(|n| n.get(name.as_str()))
                        .collect();
                }
                Segment::Each(name) => {
                    projected = true;
                    nodes = nodes
                        .into_iter()
                        .filter_map(|n| n.get(name.as_str()))
                        .filter_map(Value::as_array)
                        .flatten()
                        .collect();
                }
            }
            if nodes.is_empty() {
                break;
            }
        }

        if projected {
            PathResult::Many(nodes)
        } else {
            match nodes.first() {
                Some(node) => PathResult::One(node),
                None => PathResult::Absent,
            }
        }
    }
}

/// Outcome of evaluating a [`PathQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult<'a> {
    Absent,
    One(&'a Value),
    Many(Vec<&'a Value>),
}

impl<'a> PathResult<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PathResult::Absent)
    }

    /// First resolved node, if any. For projections this is the first
    /// collected element, which covers the "first entry or absent" call sites.
    pub fn first(&self) -> Option<&'a Value> {
        match self {
            PathResult::Absent => None,
            PathResult::One(v) => Some(v),
            PathResult::Many(vs) => vs.first().copied(),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            PathResult::One(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PathResult::One(v) => v.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PathResult::One(v) => v.as_bool(),
            _ => None,
        }
    }

    /// Collect string leaves, dropping anything that is not a string.
    /// Absent and type mismatches collapse to an empty list.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            PathResult::Absent => Vec::new(),
            PathResult::One(Value::String(s)) => vec![s.clone()],
            PathResult::One(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            PathResult::One(_) => Vec::new(),
            PathResult::Many(vs) => vs
                .into_iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        }
    }
}
