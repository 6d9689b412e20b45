//! Cached citation graph
//!
//! The corpus is fetched and the graph laid out once, on first use; every
//! filter and reset afterwards works off the cached snapshot.

use citenet_common::{CorpusSource, LayoutConfig, Result};
use citenet_graph::{CitationPipeline, GraphSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct GraphService {
    source: Arc<dyn CorpusSource>,
    pipeline: CitationPipeline,
    seed: Option<u64>,
    snapshot: RwLock<Option<Arc<GraphSnapshot>>>,
}

impl GraphService {
    pub fn new(source: Arc<dyn CorpusSource>, layout: LayoutConfig) -> Self {
        let seed = layout.seed;
        Self {
            source,
            pipeline: CitationPipeline::new(layout),
            seed,
            snapshot: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &dyn CorpusSource {
        self.source.as_ref()
    }

    /// The cached snapshot, building it on first use
    pub async fn snapshot(&self) -> Result<Arc<GraphSnapshot>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(snapshot.clone());
        }

        let mut slot = self.snapshot.write().await;
        // Another request may have built it while we waited for the lock
        if let Some(snapshot) = slot.as_ref() {
            return Ok(snapshot.clone());
        }

        let snapshot = Arc::new(self.build().await?);
        *slot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Refetch the corpus and replace the cached snapshot. On failure the
    /// previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<GraphSnapshot>> {
        let snapshot = match self.build().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!(error = %e, source = self.source.name(), "Graph refresh failed, keeping cached graph");
                return Err(e);
            }
        };

        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(snapshot)
    }

    async fn build(&self) -> Result<GraphSnapshot> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snapshot = self.pipeline.load(self.source.as_ref(), &mut rng).await?;
        info!(
            source = %snapshot.source,
            nodes = snapshot.stats.node_count,
            edges = snapshot.stats.edge_count,
            connected = snapshot.stats.connected_count,
            "Citation graph cached"
        );
        Ok(snapshot)
    }
}
