use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::positions::Position;

/// One partition of a grouped snapshot: the positions classified under
/// a top-level category and their aggregate value in the reporting
/// currency. `category_id` is `None` for the unclassified bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category_id: Option<String>,
    pub category_name: String,
    pub positions: Vec<Position>,
    pub value: Money,
}

/// Snapshot positions partitioned by a taxonomy's top-level categories,
/// with an explicit bucket for positions that match no category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByTaxonomy {
    pub taxonomy_id: String,
    /// One bucket per top-level category that holds positions, in the
    /// taxonomy's category order.
    pub buckets: Vec<CategoryBucket>,
    pub unclassified: CategoryBucket,
}

impl GroupByTaxonomy {
    pub fn bucket(&self, category_id: &str) -> Option<&CategoryBucket> {
        self.buckets
            .iter()
            .find(|b| b.category_id.as_deref() == Some(category_id))
    }
}
