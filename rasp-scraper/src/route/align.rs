//! Positional pairing of per-train DOM collections with the train list.
//!
//! The results page renders the train list, the legends and the seat tables
//! as separate collections; the Nth entry of each belongs to the Nth train.

use tracing::warn;

use super::error::RouteError;
use super::model::TrainModel;

/// What to do when a collection's length differs from the train list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Log a warning and pair up the common prefix. Trains past the end of
    /// the collection keep their empty lists.
    #[default]
    Truncate,
    /// Reject the page.
    FailFast,
}

/// Attach `values[i]` to `trains[i]` through `set`, skipping empty lists.
pub fn attach<T>(
    trains: &mut [TrainModel],
    collection: &'static str,
    values: Vec<Vec<T>>,
    policy: AlignmentPolicy,
    mut set: impl FnMut(&mut TrainModel, Vec<T>),
) -> Result<(), RouteError> {
    if values.len() != trains.len() {
        match policy {
            AlignmentPolicy::FailFast => {
                return Err(RouteError::Misaligned {
                    collection,
                    expected: trains.len(),
                    found: values.len(),
                });
            }
            AlignmentPolicy::Truncate => warn!(
                collection,
                trains = trains.len(),
                found = values.len(),
                "collection does not line up with train list"
            ),
        }
    }

    for (train, value) in trains.iter_mut().zip(values) {
        if !value.is_empty() {
            set(train, value);
        }
    }

    Ok(())
}
