//! Re-tokenization of computed CSS: literals that a token produces are
//! rewritten back into CSS variable references.

use ns_model::parse_token_ref;
use ns_tokens::{CssVarNaming, ReverseTokenIndex};
use serde_json::{Map, Value};

pub struct Tokenizer<'a> {
    reverse: &'a ReverseTokenIndex,
    naming: &'a CssVarNaming,
}

impl<'a> Tokenizer<'a> {
    pub fn new(reverse: &'a ReverseTokenIndex, naming: &'a CssVarNaming) -> Self {
        Self { reverse, naming }
    }

    pub fn tokenize_value(&self, value: &Value) -> Value {
        let Value::String(s) = value else {
            return value.clone();
        };

        if s.trim_start().starts_with("var(") {
            return value.clone();
        }
        if let Some((group, id)) = parse_token_ref(s) {
            return Value::String(self.naming.variable_ref(group, id));
        }
        match self.reverse.lookup(s) {
            Some(variable) => Value::String(variable.css_variable_ref.clone()),
            None => value.clone(),
        }
    }

    pub fn tokenize_bag(&self, bag: &Map<String, Value>) -> Map<String, Value> {
        bag.iter()
            .map(|(prop, value)| (prop.clone(), self.tokenize_value(value)))
            .collect()
    }
}
