// polarity-lab: fetch posts and open data, persist them, score their sentiment.
//
// This is the library root. `sentiment` is the scoring core; the other
// modules supply its inputs and present its outputs.

pub mod ckan;
pub mod config;
pub mod error;
pub mod keys;
pub mod output;
pub mod sentiment;
pub mod storage;
pub mod twitter;
