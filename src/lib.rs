//! Group words into ordered buckets keyed by a derived property such as
//! their length.
//!
//! ```
//! use namebuckets::{group_words, input, Settings};
//!
//! let groups = group_words(input::sample_items(), &Settings::default());
//! let sizes: Vec<usize> = groups.iter().map(|b| b.items.len()).collect();
//! assert_eq!(sizes, vec![2, 2, 4]);
//! ```

pub mod cli_output;
pub mod config;
pub mod error;
pub mod grouping;
pub mod input;
pub mod key;

pub use config::{Overrides, Settings};
pub use error::{GroupError, Result};
pub use grouping::{Bucket, BucketOrder, Groups};
pub use key::{KeyKind, KeyValue};

use tracing::debug;

/// Group `items` by the key and bucket order in `settings`, deriving keys in
/// parallel once the input reaches the configured threshold.
pub fn group_words(items: Vec<String>, settings: &Settings) -> Groups<KeyValue, String> {
    let kind = settings.key;
    let derive = move |item: &String| kind.derive(item);

    if items.len() >= settings.parallel_threshold {
        debug!(
            "Grouping {} items in parallel by {}",
            items.len(),
            settings.key
        );
        grouping::par_group_by_key(items, derive, settings.order)
    } else {
        debug!("Grouping {} items by {}", items.len(), settings.key);
        grouping::group_by_key_ordered(items, derive, settings.order)
    }
}
