// Twitter API client: credential check, user timelines, hashtag search.
//
// Read-only, app-only auth. Each submodule handles one area of the API.

pub mod client;
pub mod tweets;
