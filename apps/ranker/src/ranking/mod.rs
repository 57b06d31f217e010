// Ranking: batch pipeline over uploaded resumes, dense ranking, CSV export.
// Text extraction and scoring are delegated to extraction:: and scoring::.

pub mod batch;
pub mod export;
pub mod handlers;
pub mod ranker;
