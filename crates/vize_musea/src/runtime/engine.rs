//! Scoped evaluation of preview sources.

use super::value::JsValue;
use crate::error::ScriptError;

/// The two bindings a preview script exports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptBindings {
    pub default_props: JsValue,
    pub properties: JsValue,
}

/// A JavaScript engine able to run a preview script in an isolated scope.
///
/// The script only sees its own `defaultProps` and `properties` bindings;
/// the engine returns their values after evaluation.
pub trait ScriptEngine {
    fn evaluate(&mut self, script: &str) -> Result<ScriptBindings, ScriptError>;
}

/// Build the script that evaluates default props and the user's invocation.
pub fn evaluation_script(default_props_source: &str, props_assignment_source: &str) -> String {
    let default_props = match default_props_source.trim() {
        "" => "{}",
        source => source.trim_end_matches(';'),
    };
    format!("let defaultProps = {default_props};\nlet properties = {{}};\n{props_assignment_source}\n")
}
