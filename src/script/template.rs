use crate::profile::{ProfileField, UserProfile};

/// A message with `{field}` / `{field|fallback}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field {
        field: ProfileField,
        fallback: String,
    },
}

impl Template {
    /// Parses a template. `{{` and `}}` produce literal braces.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(format!("unclosed placeholder '{{{}'", inner));
                    }
                    let (name, fallback) = inner.split_once('|').unwrap_or((inner.as_str(), ""));
                    let field = name
                        .trim()
                        .parse::<ProfileField>()
                        .map_err(|name| format!("unknown profile field '{}'", name))?;
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field {
                        field,
                        fallback: fallback.to_string(),
                    });
                }
                '}' => return Err("unmatched '}'".to_string()),
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Whether rendering depends on the profile.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Text(_)))
    }

    pub fn render(&self, profile: &UserProfile) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { field, fallback } => {
                    out.push_str(profile.get(*field).unwrap_or(fallback.as_str()))
                }
            }
        }
        out
    }
}
