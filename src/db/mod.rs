mod repository;
mod schema;
mod statement;

pub use repository::SummaryRepository;
pub use statement::UpdateStatement;
