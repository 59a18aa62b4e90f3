use std::collections::HashMap;

use crate::errors::Result;
use crate::grouping::{CategoryBucket, GroupByTaxonomy};
use crate::money::Money;
use crate::positions::Position;
use crate::snapshot::PortfolioSnapshot;
use crate::taxonomies::Taxonomy;

/// Partitions a snapshot's positions by taxonomy in one pass.
///
/// Each position is rolled up to the top-level category of its
/// assignment; positions with no assignment (or an assignment pointing
/// at an unknown category) land in the unclassified bucket. Bucket
/// values are position values converted into the snapshot's reporting
/// currency as of the snapshot date.
pub fn group_by_taxonomy(
    snapshot: &PortfolioSnapshot,
    taxonomy: &Taxonomy,
) -> Result<GroupByTaxonomy> {
    let term_currency = snapshot.currency_converter().term_currency().to_string();

    // category_id -> positions classified under it (rolled up to top level)
    let mut partitions: HashMap<String, Vec<Position>> = HashMap::new();
    let mut unclassified_positions: Vec<Position> = Vec::new();

    for position in snapshot.positions() {
        let top_level = taxonomy
            .classification_of(&position.instrument_id)
            .and_then(|category| taxonomy.top_level_of(&category.id));
        match top_level {
            Some(category) => partitions
                .entry(category.id.clone())
                .or_default()
                .push(position.clone()),
            None => unclassified_positions.push(position.clone()),
        }
    }

    let mut buckets = Vec::new();
    for category in taxonomy.root_categories() {
        if let Some(positions) = partitions.remove(&category.id) {
            let value = aggregate_value(snapshot, &positions, &term_currency)?;
            buckets.push(CategoryBucket {
                category_id: Some(category.id.clone()),
                category_name: category.name.clone(),
                positions,
                value,
            });
        }
    }

    let unclassified_value = aggregate_value(snapshot, &unclassified_positions, &term_currency)?;
    let unclassified = CategoryBucket {
        category_id: None,
        category_name: "Unclassified".to_string(),
        positions: unclassified_positions,
        value: unclassified_value,
    };

    Ok(GroupByTaxonomy {
        taxonomy_id: taxonomy.id.clone(),
        buckets,
        unclassified,
    })
}

fn aggregate_value(
    snapshot: &PortfolioSnapshot,
    positions: &[Position],
    term_currency: &str,
) -> Result<Money> {
    let mut converted = Vec::with_capacity(positions.len());
    for position in positions {
        converted.push(position.value_in(snapshot.currency_converter(), snapshot.as_of())?);
    }
    Money::sum(converted, term_currency.to_string())
}
