use super::definition::ScriptDefinition;
use crate::error::ScriptConversionError;

/// A trait for custom conversation formats that can be converted into a `ScriptDefinition`.
///
/// Implement it on the structs you parse your own format into (a CMS export, a
/// spreadsheet, YAML) and the result can be compiled like any built-in script.
///
/// # Example
///
/// ```rust,no_run
/// use warmeleads::error::ScriptConversionError;
/// use warmeleads::script::{IntoScript, ScriptDefinition, ScriptNode, ScriptTransition};
///
/// struct Faq {
///     entries: Vec<(String, String)>,
/// }
///
/// impl IntoScript for Faq {
///     fn into_script(self) -> Result<ScriptDefinition, ScriptConversionError> {
///         if self.entries.is_empty() {
///             return Err(ScriptConversionError::ValidationError("no entries".to_string()));
///         }
///         let nodes = self
///             .entries
///             .into_iter()
///             .enumerate()
///             .map(|(i, (question, answer))| ScriptNode {
///                 id: if i == 0 { "welcome".to_string() } else { format!("faq_{i}") },
///                 message: format!("{question}\n\n{answer}"),
///                 options: None,
///                 store: None,
///                 next: Some(ScriptTransition::Goto("end".to_string())),
///                 delay: None,
///             })
///             .collect();
///         Ok(ScriptDefinition {
///             start: "welcome".to_string(),
///             nodes,
///             overrides: Vec::new(),
///         })
///     }
/// }
/// ```
pub trait IntoScript {
    /// Consumes the object and converts it into a conversation script.
    fn into_script(self) -> Result<ScriptDefinition, ScriptConversionError>;
}

impl IntoScript for ScriptDefinition {
    fn into_script(self) -> Result<ScriptDefinition, ScriptConversionError> {
        Ok(self)
    }
}
