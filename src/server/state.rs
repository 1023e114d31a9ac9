//! Shared application state for the API server

use super::DataRefresh;
use crate::dataset::{Dataset, DatasetGenerator};
use crate::view::ViewOptions;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Currently served dataset; replaced wholesale, never mutated in place
    dataset: Arc<RwLock<Arc<Dataset>>>,
    generator: DatasetGenerator,
    refresh: DataRefresh,
    /// Display options for rendered views
    pub view_options: ViewOptions,
}

impl AppState {
    /// Creates application state with an initial dataset from `generator`.
    pub fn new(generator: DatasetGenerator, refresh: DataRefresh, view_options: ViewOptions) -> Self {
        let dataset = generator.generate();
        info!(
            dataset_id = %dataset.id(),
            rows = dataset.len(),
            refresh = ?refresh,
            "Initial dataset generated"
        );

        AppState {
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            generator,
            refresh,
            view_options,
        }
    }

    /// Creates application state around an existing dataset.
    ///
    /// The dataset is served as-is (`PerProcess`); an explicit regeneration
    /// replaces it with freshly drawn data.
    pub fn with_dataset(dataset: Dataset, view_options: ViewOptions) -> Self {
        AppState {
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            generator: DatasetGenerator::new(),
            refresh: DataRefresh::PerProcess,
            view_options,
        }
    }

    pub fn refresh(&self) -> DataRefresh {
        self.refresh
    }

    /// Returns the currently cached dataset.
    pub async fn current(&self) -> Arc<Dataset> {
        Arc::clone(&*self.dataset.read().await)
    }

    /// Returns the dataset a render or export should use.
    ///
    /// With [`DataRefresh::PerProcess`] this is the cached dataset. With
    /// [`DataRefresh::PerRequest`] a dataset is generated for this request
    /// only, replayed from `seed` when the client passes back the seed of a
    /// dataset it already viewed. The cache is never touched here.
    pub async fn dataset_for_request(&self, seed: Option<u64>) -> Arc<Dataset> {
        match self.refresh {
            DataRefresh::PerProcess => self.current().await,
            DataRefresh::PerRequest => {
                let generator = match seed {
                    Some(seed) => DatasetGenerator::with_seed(seed),
                    None => self.generator.clone(),
                };
                Arc::new(generator.generate())
            }
        }
    }

    /// Replaces the cached dataset with a newly generated one.
    pub async fn regenerate(&self) -> Arc<Dataset> {
        let dataset = Arc::new(self.generator.generate());
        let mut guard = self.dataset.write().await;
        *guard = Arc::clone(&dataset);
        drop(guard);

        info!(dataset_id = %dataset.id(), rows = dataset.len(), "Dataset regenerated");
        dataset
    }
}
