use smartfit_ranking::Ranker;

/// Shared application state
///
/// Built once at startup; every request borrows the same ranker.
#[derive(Clone)]
pub struct AppState {
    pub ranker: Ranker,
}

impl AppState {
    pub fn new(ranker: Ranker) -> Self {
        Self { ranker }
    }
}
