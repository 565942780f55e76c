use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::app::resolve_data::ResolveData;
use crate::error::{EditorialError, Result};

/// A value whose runtime variant selects its transformer.
pub trait Dispatchable {
    type Kind: Copy + Eq + Hash + Display;

    fn kind(&self) -> Self::Kind;
}

/// Turns one value into a response fragment using only already-resolved data.
///
/// Returning `Ok(None)` omits the fragment. Errors are reserved for wiring defects,
/// including a value whose variant the transformer does not claim.
pub trait Transformer<T: Dispatchable, O>: Send + Sync {
    /// Variants this transformer claims. Must be disjoint from every other registered transformer.
    fn supports(&self) -> Vec<T::Kind>;

    fn transform(&self, value: &T, data: &ResolveData, registry: &TransformerRegistry<T, O>) -> Result<Option<O>>;
}

/// Kind-keyed dispatch table, built once at startup.
pub struct TransformerRegistry<T: Dispatchable, O> {
    name: &'static str,
    transformers: Vec<Box<dyn Transformer<T, O>>>,
    by_kind: HashMap<T::Kind, usize>,
}

impl<T: Dispatchable, O> TransformerRegistry<T, O> {
    pub fn new(name: &'static str) -> Self {
        Self { name, transformers: Vec::new(), by_kind: HashMap::new() }
    }

    /// Register a transformer; claiming an already-claimed kind fails immediately.
    pub fn register(&mut self, transformer: Box<dyn Transformer<T, O>>) -> Result<()> {
        let kinds = transformer.supports();
        if let Some(kind) = kinds.iter().find(|k| self.by_kind.contains_key(*k)) {
            return Err(EditorialError::DuplicateTransformer { registry: self.name, kind: kind.to_string() });
        }
        let index = self.transformers.len();
        self.transformers.push(transformer);
        for kind in kinds {
            self.by_kind.insert(kind, index);
        }
        Ok(())
    }

    pub fn dispatch(&self, value: &T, data: &ResolveData) -> Result<Option<O>> {
        let kind = value.kind();
        let index = self
            .by_kind
            .get(&kind)
            .ok_or_else(|| EditorialError::NoTransformer { registry: self.name, kind: kind.to_string() })?;
        self.transformers[*index].transform(value, data, self)
    }

    /// Dispatch every value in order, dropping omitted fragments.
    pub fn dispatch_all(&self, values: &[T], data: &ResolveData) -> Result<Vec<O>> {
        let mut fragments = Vec::with_capacity(values.len());
        for value in values {
            if let Some(fragment) = self.dispatch(value, data)? {
                fragments.push(fragment);
            }
        }
        Ok(fragments)
    }

    /// Error for a transformer handed a variant it does not claim.
    pub fn mismatch(&self, value: &T) -> EditorialError {
        EditorialError::NoTransformer { registry: self.name, kind: value.kind().to_string() }
    }

    pub fn supports(&self, kind: T::Kind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Shape {
        Circle,
        Square,
        Triangle,
    }

    impl fmt::Display for Shape {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl Dispatchable for Shape {
        type Kind = Shape;

        fn kind(&self) -> Shape {
            *self
        }
    }

    struct Namer(Vec<Shape>);

    impl Transformer<Shape, String> for Namer {
        fn supports(&self) -> Vec<Shape> {
            self.0.clone()
        }

        fn transform(&self, value: &Shape, _: &ResolveData, _: &TransformerRegistry<Shape, String>) -> Result<Option<String>> {
            match value {
                Shape::Square => Ok(None),
                other => Ok(Some(format!("{}", other).to_lowercase())),
            }
        }
    }

    #[test]
    fn test_dispatch_to_matching_transformer() {
        let mut registry = TransformerRegistry::new("shape");
        registry.register(Box::new(Namer(vec![Shape::Circle, Shape::Square]))).unwrap();

        let data = ResolveData::new();
        assert_eq!(registry.dispatch(&Shape::Circle, &data).unwrap(), Some("circle".to_string()));
        assert_eq!(registry.dispatch_all(&[Shape::Square, Shape::Circle], &data).unwrap(), vec!["circle"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails_fast() {
        let mut registry: TransformerRegistry<Shape, String> = TransformerRegistry::new("shape");
        registry.register(Box::new(Namer(vec![Shape::Circle]))).unwrap();

        let err = registry.register(Box::new(Namer(vec![Shape::Triangle, Shape::Circle]))).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Circle"));
        // The rejected transformer claims nothing
        assert!(!registry.supports(Shape::Triangle));
    }

    #[test]
    fn test_missing_transformer_names_the_kind() {
        let registry: TransformerRegistry<Shape, String> = TransformerRegistry::new("shape");
        let err = registry.dispatch(&Shape::Triangle, &ResolveData::new()).unwrap_err();
        match err {
            EditorialError::NoTransformer { registry, kind } => {
                assert_eq!(registry, "shape");
                assert_eq!(kind, "Triangle");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
