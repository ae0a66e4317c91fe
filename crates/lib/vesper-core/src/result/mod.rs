/// Any error type that can merge another error of the same kind into itself.
pub trait CombinableError {
    fn combine(&mut self, other: Self);
}

/// Collects every `Ok` item of a sequence of results, and merges every
/// `Err` into one combined error instead of stopping at the first one.
///
/// Used by the derive macro so that one compile run reports all bad
/// attributes at once.
pub struct ResultFlattener<T, E: CombinableError> {
    items: Vec<T>,
    errors: Option<E>,
}

impl<T, E: CombinableError> Default for ResultFlattener<T, E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: None,
        }
    }
}

impl<T, E: CombinableError> ResultFlattener<T, E> {
    pub fn combine(&mut self, result: Result<T, E>) {
        match result {
            Ok(item) => self.items.push(item),
            Err(err) => match &mut self.errors {
                Some(errors) => errors.combine(err),
                None => self.errors = Some(err),
            },
        }
    }

    /// Folding step, to be used with [`Iterator::fold`].
    pub fn fold(mut folder: Self, result: Result<T, E>) -> Self {
        folder.combine(result);
        folder
    }

    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    pub fn finish(self) -> Result<Vec<T>, E> {
        match self.errors {
            Some(errors) => Err(errors),
            None => Ok(self.items),
        }
    }
}

impl<T, E: CombinableError> FromIterator<Result<T, E>> for ResultFlattener<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Messages(Vec<&'static str>);

    impl CombinableError for Messages {
        fn combine(&mut self, mut other: Self) {
            self.0.append(&mut other.0);
        }
    }

    #[test]
    fn collects_items_when_all_ok() {
        let flattened: ResultFlattener<u32, Messages> = vec![Ok(1), Ok(2)].into_iter().collect();
        assert_eq!(flattened.finish().unwrap(), vec![1, 2]);
    }

    #[test]
    fn merges_every_error() {
        let flattened: ResultFlattener<u32, Messages> = vec![
            Ok(1),
            Err(Messages(vec!["first"])),
            Ok(3),
            Err(Messages(vec!["second"])),
        ].into_iter().collect();

        assert!(flattened.has_errors());
        assert_eq!(flattened.finish().unwrap_err(), Messages(vec!["first", "second"]));
    }
}
