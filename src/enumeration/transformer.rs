//! Enum transformer pipeline
//!
//! A transformer maps an enum value to its wire string in two steps: a name
//! getter produces the value's name, then a chain of string stages rewrites
//! it. Chains are built with [`EnumTransformer::then`].

use std::fmt;
use std::sync::Arc;

use super::case;
use super::codec::SchemaEnum;

type Stage = Arc<dyn Fn(&str) -> String + Send + Sync>;
type NameGetter<E> = Arc<dyn Fn(&E) -> String + Send + Sync>;

/// Maps enum values of type `E` to wire strings
pub struct EnumTransformer<E> {
    name_getter: NameGetter<E>,
    stages: Vec<Stage>,
}

impl<E> Clone for EnumTransformer<E> {
    fn clone(&self) -> Self {
        Self {
            name_getter: Arc::clone(&self.name_getter),
            stages: self.stages.clone(),
        }
    }
}

impl<E> fmt::Debug for EnumTransformer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumTransformer")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<E: SchemaEnum> EnumTransformer<E> {
    fn with_stage<S>(stage: S) -> Self
    where
        S: Fn(&str) -> String + Send + Sync + 'static,
    {
        let stage: Stage = Arc::new(stage);
        Self {
            name_getter: Arc::new(|value: &E| value.variant_name().to_string()),
            stages: vec![stage],
        }
    }

    /// Variant names unchanged
    pub fn basic() -> Self {
        Self::with_stage(str::to_owned)
    }

    /// `myfirstvalue`
    pub fn lowercase() -> Self {
        Self::with_stage(str::to_lowercase)
    }

    /// `MYFIRSTVALUE`
    pub fn uppercase() -> Self {
        Self::with_stage(str::to_uppercase)
    }

    /// `MY_FIRST_VALUE`
    pub fn snake_case_upper() -> Self {
        Self::custom_case(|words| case::join_upper(words, "_"))
    }

    /// `my_first_value`
    pub fn snake_case_lower() -> Self {
        Self::custom_case(|words| case::join_lower(words, "_"))
    }

    /// `MY-FIRST-VALUE`
    pub fn kebab_case_upper() -> Self {
        Self::custom_case(|words| case::join_upper(words, "-"))
    }

    /// `my-first-value`
    pub fn kebab_case_lower() -> Self {
        Self::custom_case(|words| case::join_lower(words, "-"))
    }

    /// `MyFirstValue`
    pub fn pascal_case() -> Self {
        Self::custom_case(case::join_pascal)
    }

    /// `myFirstValue`
    pub fn camel_case() -> Self {
        Self::custom_case(case::join_camel)
    }

    /// Rewrites the name with an arbitrary function
    pub fn custom<S>(stage: S) -> Self
    where
        S: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::with_stage(stage)
    }

    /// Joins the words of the name with an arbitrary function.
    ///
    /// Words are passed as split, lowercased.
    pub fn custom_case<J>(join: J) -> Self
    where
        J: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Self::with_stage(move |name| join(&case::tokenize(name)))
    }
}

impl<E: 'static> EnumTransformer<E> {
    /// Names values with `getter` instead of their variant name.
    ///
    /// Has no effect when passed to [`EnumTransformer::then`], since a chain
    /// always uses the name getter of its head.
    pub fn custom_name<G>(getter: G) -> Self
    where
        G: Fn(&E) -> String + Send + Sync + 'static,
    {
        Self {
            name_getter: Arc::new(getter),
            stages: Vec::new(),
        }
    }
}

impl<E> EnumTransformer<E> {
    /// Appends the stages of `next` to the end of this chain
    pub fn then(mut self, next: EnumTransformer<E>) -> Self {
        self.stages.extend(next.stages);
        self
    }

    /// Runs a name through every stage
    pub fn transform_name(&self, name: &str) -> String {
        self.stages
            .iter()
            .fold(name.to_string(), |current, stage| stage(&current))
    }

    /// Name of a value before any stage runs
    pub fn name(&self, value: &E) -> String {
        (self.name_getter)(value)
    }

    /// Wire string for a value
    pub fn transform(&self, value: &E) -> String {
        self.transform_name(&self.name(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        MyFirstValue,
        Other,
    }

    impl SchemaEnum for Mode {
        fn type_name() -> &'static str {
            "Mode"
        }

        fn variants() -> &'static [Self] {
            &[Mode::MyFirstValue, Mode::Other]
        }

        fn variant_name(&self) -> &'static str {
            match self {
                Mode::MyFirstValue => "MY_FIRST_VALUE",
                Mode::Other => "OTHER",
            }
        }
    }

    #[test]
    fn test_builtin_transformers() {
        let v = Mode::MyFirstValue;
        assert_eq!(EnumTransformer::<Mode>::basic().transform(&v), "MY_FIRST_VALUE");
        assert_eq!(EnumTransformer::<Mode>::lowercase().transform(&v), "my_first_value");
        assert_eq!(EnumTransformer::<Mode>::kebab_case_lower().transform(&v), "my-first-value");
        assert_eq!(EnumTransformer::<Mode>::pascal_case().transform(&v), "MyFirstValue");
        assert_eq!(EnumTransformer::<Mode>::camel_case().transform(&v), "myFirstValue");
    }

    #[test]
    fn test_then_runs_in_order() {
        let chain = EnumTransformer::<Mode>::pascal_case()
            .then(EnumTransformer::custom(|s| format!("x{}", s)))
            .then(EnumTransformer::uppercase());
        assert_eq!(chain.transform(&Mode::Other), "XOTHER");
    }

    #[test]
    fn test_custom_name_ignored_in_chain() {
        let chain = EnumTransformer::<Mode>::basic()
            .then(EnumTransformer::custom_name(|_: &Mode| "ignored".to_string()));
        assert_eq!(chain.transform(&Mode::Other), "OTHER");

        let head = EnumTransformer::custom_name(|m: &Mode| format!("{:?}", m))
            .then(EnumTransformer::snake_case_lower());
        assert_eq!(head.transform(&Mode::MyFirstValue), "my_first_value");
    }
}
