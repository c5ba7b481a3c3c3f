// ═══════════════════════════════════════════════════════════
// Frenchy scopes: constants, variables and loop temporaries
// ═══════════════════════════════════════════════════════════

use std::collections::HashMap;

use tracing::trace;

use crate::error::Fault;
use crate::value::{ListValue, Value};

/// Which mapping a list was found in, so `pour chaque` can store it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrigin {
    Variables,
    Constants,
}

/// The three name scopes of one evaluation run.
///
/// Reads resolve Variables, then Constants, then Temporaries: an outer
/// variable hides a loop temporary of the same name.
#[derive(Debug, Default)]
pub struct Scopes {
    constants: HashMap<String, Value>,
    variables: HashMap<String, Value>,
    // A stack per name so nested loops reusing a name restore the outer binding.
    temporaries: HashMap<String, Vec<Value>>,
}

impl Scopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a built-in. Only the registry calls this, before the run starts.
    pub(crate) fn seed_constant(&mut self, name: &str, value: Value) {
        self.constants.insert(name.to_string(), value);
    }

    pub fn define(&mut self, name: &str, value: Value) -> Result<(), Fault> {
        if self.constants.contains_key(name) {
            return Err(Fault::constant_redefinition(name));
        }
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Opens a loop temporary. Loop counters and iterated elements must be numeric.
    pub fn define_temporary(&mut self, name: &str, value: Value) -> Result<(), Fault> {
        require_numeric(name, &value)?;
        trace!(name, %value, "define temporary");
        self.temporaries.entry(name.to_string()).or_default().push(value);
        Ok(())
    }

    /// Rebinds the innermost temporary called `name`.
    pub fn set_temporary(&mut self, name: &str, value: Value) -> Result<(), Fault> {
        require_numeric(name, &value)?;
        match self.temporaries.get_mut(name).and_then(|stack| stack.last_mut()) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Fault::undefined(name)),
        }
    }

    /// Closes the innermost temporary called `name`. Safe to call when none is open.
    pub fn remove_temporary(&mut self, name: &str) {
        if let Some(stack) = self.temporaries.get_mut(name) {
            stack.pop();
            if stack.is_empty() {
                self.temporaries.remove(name);
            }
        }
        trace!(name, "remove temporary");
    }

    pub fn lookup(&self, name: &str) -> Result<&Value, Fault> {
        self.variables.get(name)
            .or_else(|| self.constants.get(name))
            .or_else(|| self.temporary(name))
            .ok_or_else(|| Fault::undefined(name))
    }

    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn temporary(&self, name: &str) -> Option<&Value> {
        self.temporaries.get(name).and_then(|stack| stack.last())
    }

    pub fn has_temporaries(&self) -> bool {
        !self.temporaries.is_empty()
    }

    /// Finds a list bound in Variables or Constants. Temporaries never hold lists.
    pub fn list(&self, name: &str) -> Result<(ListOrigin, &ListValue), Fault> {
        let (origin, value) = match (self.variables.get(name), self.constants.get(name)) {
            (Some(v), _) => (ListOrigin::Variables, v),
            (None, Some(v)) => (ListOrigin::Constants, v),
            (None, None) => return Err(Fault::undefined(name)),
        };
        match value {
            Value::List(list) => Ok((origin, list)),
            other => Err(Fault::TypeMismatch(format!(
                "'{}' is {}, not a List", name, other.kind_name()
            ))),
        }
    }

    pub fn store_list(&mut self, origin: ListOrigin, name: &str, list: ListValue) {
        let scope = match origin {
            ListOrigin::Variables => &mut self.variables,
            ListOrigin::Constants => &mut self.constants,
        };
        scope.insert(name.to_string(), Value::List(list));
    }
}

fn require_numeric(name: &str, value: &Value) -> Result<(), Fault> {
    if value.is_numeric() {
        Ok(())
    } else {
        Err(Fault::TypeMismatch(format!(
            "loop variable '{}' must be Integer or Float, got {}", name, value.kind_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ElementType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_define_rejects_constants() {
        let mut scopes = Scopes::new();
        scopes.seed_constant("PI", Value::Float(3.14159));
        let err = scopes.define("PI", Value::Integer(3)).unwrap_err();
        assert!(matches!(err, Fault::TypeMismatch(_)));
        assert_eq!(scopes.lookup("PI").unwrap(), &Value::Float(3.14159));
    }

    #[test]
    fn test_lookup_order_variables_first() {
        let mut scopes = Scopes::new();
        scopes.define_temporary("i", Value::Integer(7)).unwrap();
        assert_eq!(scopes.lookup("i").unwrap(), &Value::Integer(7));
        scopes.define("i", Value::Integer(1)).unwrap();
        assert_eq!(scopes.lookup("i").unwrap(), &Value::Integer(1));
    }

    #[test]
    fn test_lookup_missing_is_name_error() {
        let scopes = Scopes::new();
        let err = scopes.lookup("x").unwrap_err();
        assert_eq!(err.to_string(), "name error: variable 'x' is not defined");
    }

    #[test]
    fn test_temporaries_must_be_numeric() {
        let mut scopes = Scopes::new();
        assert!(scopes.define_temporary("t", Value::Text("a".into())).is_err());
        assert!(scopes.define_temporary("t", Value::Float(1.5)).is_ok());
        assert!(scopes.set_temporary("t", Value::Boolean(true)).is_err());
        assert!(scopes.set_temporary("u", Value::Integer(1)).is_err());
    }

    #[test]
    fn test_nested_temporaries_restore_outer() {
        let mut scopes = Scopes::new();
        scopes.define_temporary("i", Value::Integer(1)).unwrap();
        scopes.define_temporary("i", Value::Integer(2)).unwrap();
        assert_eq!(scopes.temporary("i"), Some(&Value::Integer(2)));
        scopes.remove_temporary("i");
        assert_eq!(scopes.temporary("i"), Some(&Value::Integer(1)));
        scopes.remove_temporary("i");
        scopes.remove_temporary("i");
        assert!(!scopes.has_temporaries());
        assert!(scopes.lookup("i").is_err());
    }

    #[test]
    fn test_list_resolution() {
        let mut scopes = Scopes::new();
        let list = ListValue::new(ElementType::Integer, vec![Value::Integer(1)]).unwrap();
        scopes.define("l", Value::List(list.clone())).unwrap();
        scopes.define("n", Value::Integer(1)).unwrap();

        let (origin, found) = scopes.list("l").unwrap();
        assert_eq!(origin, ListOrigin::Variables);
        assert_eq!(found, &list);
        assert!(matches!(scopes.list("n"), Err(Fault::TypeMismatch(_))));
        assert!(matches!(scopes.list("absent"), Err(Fault::Name(_))));
    }
}
