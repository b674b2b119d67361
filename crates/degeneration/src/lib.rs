pub mod report;
pub mod samples;
pub mod signals;
pub mod tokenizer;
pub mod utils;
