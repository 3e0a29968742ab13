//! Rule registry for looking up rule definitions by kind or name.

use morph_ir::{Rule, Term, TermKind};
use morph_patterns::{arity_mismatch, expected_kind, validate_rule, ReduceError};

use crate::{extract, recursive, restructure, unary};

/// A named, parameterized rule of the library.
pub trait RuleDefinition: Send + Sync {
    /// Name used for lookup and in error trails.
    fn name(&self) -> &'static str;

    /// Names of the parameters `build` expects, in order.
    fn params(&self) -> &'static [&'static str] {
        &[]
    }

    /// Instantiate the rule with concrete parameter terms.
    fn build(&self, args: &[Term]) -> Result<Rule, ReduceError>;
}

/// A library rule backed by a plain constructor function.
pub struct BuiltinRule {
    name: &'static str,
    params: &'static [&'static str],
    make: fn(&[Term]) -> Result<Rule, ReduceError>,
}

impl RuleDefinition for BuiltinRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn params(&self) -> &'static [&'static str] {
        self.params
    }

    fn build(&self, args: &[Term]) -> Result<Rule, ReduceError> {
        if args.len() != self.params.len() {
            return Err(arity_mismatch(self.name, self.params.len(), args.len()));
        }
        let rule = (self.make)(args)?;
        validate_rule(&rule)?;
        Ok(rule)
    }
}

fn text_arg(args: &[Term], index: usize) -> Result<&str, ReduceError> {
    let arg = &args[index];
    arg.as_text().ok_or_else(|| expected_kind(TermKind::Text, arg))
}

fn seq_arg(args: &[Term], index: usize) -> Result<&[Term], ReduceError> {
    let arg = &args[index];
    arg.as_seq().ok_or_else(|| expected_kind(TermKind::Seq, arg))
}

macro_rules! builtin {
    ($name:literal, $make:expr) => {
        BuiltinRule {
            name: $name,
            params: &[],
            make: |_| Ok($make),
        }
    };
    ($name:literal [$($param:literal),+], $make:expr) => {
        BuiltinRule {
            name: $name,
            params: &[$($param),+],
            make: $make,
        }
    };
}

// Static rule instances for 'static lifetime references

// Extraction
static FIRST: BuiltinRule = builtin!("first", extract::first());
static LAST: BuiltinRule = builtin!("last", extract::last());
static SLICE: BuiltinRule = builtin!("slice", extract::slice());
static PROMISE_VALUE: BuiltinRule = builtin!("promise_value", extract::promise_value());
static PARAMETERS: BuiltinRule = builtin!("parameters", extract::parameters());
static RETURN_TYPE: BuiltinRule = builtin!("return_type", extract::return_type());
static THIS_PARAMETER: BuiltinRule = builtin!("this_parameter", extract::this_parameter());
static INSTANCE_TYPE: BuiltinRule = builtin!("instance_type", extract::instance_type());
static CONSTRUCTOR_PARAMETERS: BuiltinRule =
    builtin!("constructor_parameters", extract::constructor_parameters());
static PROP_TYPE: BuiltinRule = builtin!("prop_type" ["key"], |args| {
    Ok(extract::prop_type(text_arg(args, 0)?))
});
static STARTS_WITH: BuiltinRule = builtin!("starts_with" ["prefix"], |args| {
    Ok(extract::starts_with(text_arg(args, 0)?))
});
static REPLACE: BuiltinRule = builtin!("replace" ["from", "to"], |args| {
    Ok(extract::replace(text_arg(args, 0)?, text_arg(args, 1)?))
});

// Restructuring
static PUSH: BuiltinRule = builtin!("push" ["item"], |args| Ok(restructure::push(args[0].clone())));
static UNSHIFT: BuiltinRule = builtin!("unshift" ["item"], |args| {
    Ok(restructure::unshift(args[0].clone()))
});
static ZIP: BuiltinRule = builtin!("zip" ["other"], |args| Ok(restructure::zip(seq_arg(args, 0)?)));
static CAPITALIZE: BuiltinRule = builtin!("capitalize", restructure::capitalize());
static CAMEL_CASE: BuiltinRule = builtin!("camel_case", restructure::camel_case());
static DROP_SUBSTR: BuiltinRule = builtin!("drop_substr" ["sub"], |args| {
    Ok(restructure::drop_substr(text_arg(args, 0)?))
});
static APPEND_ARGUMENT: BuiltinRule = builtin!("append_argument" ["arg"], |args| {
    Ok(restructure::append_argument(args[0].clone()))
});
static MAPPING_TRIPLE: BuiltinRule = builtin!("mapping_triple", restructure::mapping_triple());
static UPPERCASE_KEYS: BuiltinRule = builtin!("uppercase_keys", restructure::uppercase_keys());
static READONLY: BuiltinRule = builtin!("readonly", restructure::readonly());
static PARTIAL: BuiltinRule = builtin!("partial", restructure::partial());
static MUTABLE: BuiltinRule = builtin!("mutable", restructure::mutable());
static REQUIRED: BuiltinRule = builtin!("required", restructure::required());
static FILTER_BY_VALUE_TYPE: BuiltinRule = builtin!("filter_by_value_type" ["value_type"], |args| {
    Ok(restructure::filter_by_value_type(args[0].clone()))
});

// Recursion
static DEEP_PROMISE: BuiltinRule = builtin!("deep_promise", recursive::deep_promise());
static REVERSE: BuiltinRule = builtin!("reverse", recursive::reverse());
static INCLUDES: BuiltinRule = builtin!("includes" ["target"], |args| {
    Ok(recursive::includes(args[0].clone()))
});
static REMOVE_ALL: BuiltinRule = builtin!("remove_all" ["item"], |args| {
    Ok(recursive::remove_all(args[0].clone()))
});
static REPLACE_ALL: BuiltinRule = builtin!("replace_all" ["from", "to"], |args| {
    Ok(recursive::replace_all(text_arg(args, 0)?, text_arg(args, 1)?))
});
static TRIM_LEFT: BuiltinRule = builtin!("trim_left", recursive::trim_left());
static TRIM_RIGHT: BuiltinRule = builtin!("trim_right", recursive::trim_right());
static TRIM: BuiltinRule = builtin!("trim", recursive::trim());
static REVERSE_STR: BuiltinRule = builtin!("reverse_str", recursive::reverse_str());
static DEEP_READONLY: BuiltinRule = builtin!("deep_readonly", recursive::deep_readonly());

// Unary arithmetic
static TO_UNARY: BuiltinRule = builtin!("to_unary", unary::to_unary());
static BUILD_ARRAY: BuiltinRule = builtin!("build_array" ["element"], |args| {
    Ok(unary::build_array(args[0].clone()))
});
static ADD: BuiltinRule = builtin!("add", unary::add());
static SUBTRACT: BuiltinRule = builtin!("subtract", unary::subtract());
static MULTIPLY: BuiltinRule = builtin!("multiply", unary::multiply());
static DIVIDE: BuiltinRule = builtin!("divide", unary::divide());
static GREATER_THAN: BuiltinRule = builtin!("greater_than", unary::greater_than());
static FIBONACCI: BuiltinRule = builtin!("fibonacci", unary::fibonacci());
static STR_LEN: BuiltinRule = builtin!("str_len", unary::str_len());

/// Every rule of the library.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    First,
    Last,
    Slice,
    PromiseValue,
    Parameters,
    ReturnType,
    ThisParameter,
    InstanceType,
    ConstructorParameters,
    PropType,
    StartsWith,
    Replace,
    Push,
    Unshift,
    Zip,
    Capitalize,
    CamelCase,
    DropSubstr,
    AppendArgument,
    MappingTriple,
    UppercaseKeys,
    Readonly,
    Partial,
    Mutable,
    Required,
    FilterByValueType,
    DeepPromise,
    Reverse,
    Includes,
    RemoveAll,
    ReplaceAll,
    TrimLeft,
    TrimRight,
    Trim,
    ReverseStr,
    DeepReadonly,
    ToUnary,
    BuildArray,
    Add,
    Subtract,
    Multiply,
    Divide,
    GreaterThan,
    Fibonacci,
    StrLen,
}

impl RuleKind {
    pub const ALL: [RuleKind; 45] = [
        RuleKind::First,
        RuleKind::Last,
        RuleKind::Slice,
        RuleKind::PromiseValue,
        RuleKind::Parameters,
        RuleKind::ReturnType,
        RuleKind::ThisParameter,
        RuleKind::InstanceType,
        RuleKind::ConstructorParameters,
        RuleKind::PropType,
        RuleKind::StartsWith,
        RuleKind::Replace,
        RuleKind::Push,
        RuleKind::Unshift,
        RuleKind::Zip,
        RuleKind::Capitalize,
        RuleKind::CamelCase,
        RuleKind::DropSubstr,
        RuleKind::AppendArgument,
        RuleKind::MappingTriple,
        RuleKind::UppercaseKeys,
        RuleKind::Readonly,
        RuleKind::Partial,
        RuleKind::Mutable,
        RuleKind::Required,
        RuleKind::FilterByValueType,
        RuleKind::DeepPromise,
        RuleKind::Reverse,
        RuleKind::Includes,
        RuleKind::RemoveAll,
        RuleKind::ReplaceAll,
        RuleKind::TrimLeft,
        RuleKind::TrimRight,
        RuleKind::Trim,
        RuleKind::ReverseStr,
        RuleKind::DeepReadonly,
        RuleKind::ToUnary,
        RuleKind::BuildArray,
        RuleKind::Add,
        RuleKind::Subtract,
        RuleKind::Multiply,
        RuleKind::Divide,
        RuleKind::GreaterThan,
        RuleKind::Fibonacci,
        RuleKind::StrLen,
    ];

    pub fn name(self) -> &'static str {
        RuleRegistry::new().get(self).name()
    }

    /// Look a rule up by its registered name.
    pub fn from_name(name: &str) -> Option<RuleKind> {
        RuleKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Registry mapping [`RuleKind`] to rule definitions.
///
/// All definitions are statics, so lookups hand out `'static` references
/// and the registry itself carries no data.
pub struct RuleRegistry {
    // Marker field to prevent external construction
    _private: (),
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry { _private: () }
    }

    pub fn get(&self, kind: RuleKind) -> &'static dyn RuleDefinition {
        match kind {
            RuleKind::First => &FIRST,
            RuleKind::Last => &LAST,
            RuleKind::Slice => &SLICE,
            RuleKind::PromiseValue => &PROMISE_VALUE,
            RuleKind::Parameters => &PARAMETERS,
            RuleKind::ReturnType => &RETURN_TYPE,
            RuleKind::ThisParameter => &THIS_PARAMETER,
            RuleKind::InstanceType => &INSTANCE_TYPE,
            RuleKind::ConstructorParameters => &CONSTRUCTOR_PARAMETERS,
            RuleKind::PropType => &PROP_TYPE,
            RuleKind::StartsWith => &STARTS_WITH,
            RuleKind::Replace => &REPLACE,
            RuleKind::Push => &PUSH,
            RuleKind::Unshift => &UNSHIFT,
            RuleKind::Zip => &ZIP,
            RuleKind::Capitalize => &CAPITALIZE,
            RuleKind::CamelCase => &CAMEL_CASE,
            RuleKind::DropSubstr => &DROP_SUBSTR,
            RuleKind::AppendArgument => &APPEND_ARGUMENT,
            RuleKind::MappingTriple => &MAPPING_TRIPLE,
            RuleKind::UppercaseKeys => &UPPERCASE_KEYS,
            RuleKind::Readonly => &READONLY,
            RuleKind::Partial => &PARTIAL,
            RuleKind::Mutable => &MUTABLE,
            RuleKind::Required => &REQUIRED,
            RuleKind::FilterByValueType => &FILTER_BY_VALUE_TYPE,
            RuleKind::DeepPromise => &DEEP_PROMISE,
            RuleKind::Reverse => &REVERSE,
            RuleKind::Includes => &INCLUDES,
            RuleKind::RemoveAll => &REMOVE_ALL,
            RuleKind::ReplaceAll => &REPLACE_ALL,
            RuleKind::TrimLeft => &TRIM_LEFT,
            RuleKind::TrimRight => &TRIM_RIGHT,
            RuleKind::Trim => &TRIM,
            RuleKind::ReverseStr => &REVERSE_STR,
            RuleKind::DeepReadonly => &DEEP_READONLY,
            RuleKind::ToUnary => &TO_UNARY,
            RuleKind::BuildArray => &BUILD_ARRAY,
            RuleKind::Add => &ADD,
            RuleKind::Subtract => &SUBTRACT,
            RuleKind::Multiply => &MULTIPLY,
            RuleKind::Divide => &DIVIDE,
            RuleKind::GreaterThan => &GREATER_THAN,
            RuleKind::Fibonacci => &FIBONACCI,
            RuleKind::StrLen => &STR_LEN,
        }
    }

    /// Get all registered rule kinds.
    pub fn kinds(&self) -> impl Iterator<Item = RuleKind> {
        RuleKind::ALL.into_iter()
    }

    pub fn len(&self) -> usize {
        RuleKind::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
