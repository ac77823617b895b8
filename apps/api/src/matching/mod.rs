pub mod handlers;
pub mod pipeline;
pub mod ranker;
pub mod scorer;
