// Sentiment: lexicon-based polarity scoring.
//
// Raw text is cleaned by the normalizer, split into words, joined against
// the lexicon, and summed per document.

pub mod document;
pub mod lexicon;
pub mod normalize;
pub mod polarity;
pub mod scorer;
pub mod traits;
