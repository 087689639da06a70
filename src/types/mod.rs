pub mod headlines;

pub use headlines::{Article, HeadlinesRequest, HeadlinesResponse, ResponseStatus, Source};
