//! Structural conversion between entities and DTOs.

/// Field-by-field conversion from `S` into `Self`.
///
/// Implementations copy matching fields and perform no validation.
pub trait MapFrom<S>: Sized {
    /// Build a new value from `source`.
    fn map_from(source: &S) -> Self;

    /// Overwrite the fields of `self` with those of `source`.
    fn map_onto(&mut self, source: &S);
}

/// Map every element of `sources`.
pub fn map_all<S, T: MapFrom<S>>(sources: &[S]) -> Vec<T> {
    sources.iter().map(T::map_from).collect()
}
