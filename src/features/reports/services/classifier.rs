use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::features::reports::models::{Classification, DraftImage, CLASSIFICATIONS};
use crate::shared::random::RandomSource;

/// Assigns a waste material to a photo
#[async_trait]
pub trait WasteClassifier: Send + Sync {
    async fn classify(&self, image: &DraftImage) -> Classification;
}

/// Stand-in classifier: waits a fixed time, then picks one of the known
/// results uniformly at random. The photo itself is not inspected.
pub struct SimulatedClassifier {
    delay: Duration,
    random: Arc<dyn RandomSource>,
}

impl SimulatedClassifier {
    pub fn new(delay: Duration, random: Arc<dyn RandomSource>) -> Self {
        Self { delay, random }
    }
}

#[async_trait]
impl WasteClassifier for SimulatedClassifier {
    async fn classify(&self, image: &DraftImage) -> Classification {
        tracing::debug!(
            "Classifying {} ({} bytes)",
            image.file_name,
            image.data.len()
        );
        tokio::time::sleep(self.delay).await;

        let result = CLASSIFICATIONS[self.random.index(CLASSIFICATIONS.len())];
        tracing::debug!("Classified {} as {}", image.file_name, result.waste_type.as_str());
        result
    }
}
