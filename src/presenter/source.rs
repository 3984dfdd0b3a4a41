//! The search collaborator seam

use std::future::Future;

/// An asynchronous, opaque search function
///
/// The presenter imposes no protocol beyond "eventually produces a result
/// sequence or fails". Implementations may take arbitrarily long; a slow
/// search never blocks later ones from being issued.
///
/// Any `Fn(String) -> impl Future<Output = anyhow::Result<Vec<T>>>` closure
/// is a `SearchSource`:
///
/// ```rust
/// # use search_presenter::SearchSource;
/// let source = |query: String| async move { anyhow::Ok(vec![query.to_uppercase()]) };
/// # fn assert_source<S: SearchSource<Item = String>>(_: &S) {}
/// # assert_source(&source);
/// ```
pub trait SearchSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    fn search(
        &self,
        query: String,
    ) -> impl Future<Output = anyhow::Result<Vec<Self::Item>>> + Send;
}

impl<F, Fut, T> SearchSource for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<T>>> + Send,
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    fn search(&self, query: String) -> impl Future<Output = anyhow::Result<Vec<T>>> + Send {
        self(query)
    }
}
