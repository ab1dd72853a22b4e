mod summary;

pub use summary::{MutationOutcome, NewSummary, ObjectType, Summary, SummaryListing, SummaryUpdate};
