// Composition tests: verifying that the pieces chain together correctly.
//
// These tests exercise the full data flow:
//   records on disk -> Document adapter -> Normalizer -> Aggregator
// with a lexicon loaded from a file, and without any network calls.

use std::io::Write;

use polarity_lab::ckan::tables::parse_table;
use polarity_lab::error::SentimentError;
use polarity_lab::sentiment::document::{documents_from_records, DocumentId, Record};
use polarity_lab::sentiment::lexicon::Lexicon;
use polarity_lab::sentiment::scorer::LexiconScorer;
use polarity_lab::sentiment::traits::SentimentScorer;
use polarity_lab::storage::{read_data, save_tweets, write_data};
use polarity_lab::twitter::tweets::Tweet;
use serde_json::Map;

fn lexicon_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "good\t1.9\t0.9434\t[2, 1, 2, 3, 2, 2, 1, 3, 2, 1]\n\
         love\t3.2\t0.4\t[3, 3, 3, 3, 3, 3, 3, 4, 4, 3]\n\
         late\t-0.6\t0.4899\t[0, -1, -1, 0, -1, -1, 0, 0, -1, -1]\n\
         hate\t-2.7\t1.00499\t[-4, -3, -4, -4, -2, -2, -2, -2, -1, -3]\n"
    )
    .unwrap();
    file.flush().unwrap();
    file
}

fn tweet(id: &str, text: &str) -> Tweet {
    Tweet {
        id: id.to_string(),
        text: text.to_string(),
        author_id: None,
        created_at: None,
        extra: Map::new(),
    }
}

// ============================================================
// Chain: saved tweets -> records -> documents -> polarity
// ============================================================

#[test]
fn saved_tweets_score_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ttc_recent_tweets.json");
    save_tweets(
        &[
            tweet("100", "I LOVE the new streetcars!"),
            tweet("101", "Bus is late again... I hate this"),
            tweet("102", "https://t.co/abc"),
        ],
        &path,
    )
    .unwrap();

    let lex = Lexicon::load(lexicon_file().path()).unwrap();
    let records: Vec<Record> = read_data(&path).unwrap();
    let documents = documents_from_records(&records, "id", "text").unwrap();
    let result = LexiconScorer::new(lex).score(&documents).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.get(&DocumentId::from("100")), Some(3.2));
    let late_hate = result.get(&DocumentId::from("101")).unwrap();
    assert!((late_hate - (-3.3)).abs() < 1e-9, "got {late_hate}");
    assert_eq!(result.get(&DocumentId::from("102")), Some(0.0));
}

#[test]
fn tweet_to_document_matches_record_adapter() {
    let t = tweet("55", "good good");
    let from_tweet = t.to_document();

    let value = serde_json::to_value(&t).unwrap();
    let record = value.as_object().unwrap().clone();
    let from_record = documents_from_records(&[record], "id", "text").unwrap();

    assert_eq!(from_tweet.id, from_record[0].id);
    assert_eq!(from_tweet.raw_text, from_record[0].raw_text);
}

// ============================================================
// Chain: CKAN table -> documents -> polarity
// ============================================================

#[test]
fn csv_table_scores_with_custom_fields() {
    let csv = b"event_id,description\nE1,Good stories for kids who love books\nE2,Cancelled\n";
    let table = parse_table("CSV", csv).unwrap();

    let documents = documents_from_records(&table, "event_id", "description").unwrap();
    let lex = Lexicon::from_pairs([("good", 1.9), ("love", 3.2)]);
    let result = LexiconScorer::new(lex).score(&documents).unwrap();

    let e1 = result.get(&DocumentId::from("E1")).unwrap();
    assert!((e1 - 5.1).abs() < 1e-9);
    assert_eq!(result.get(&DocumentId::from("E2")), Some(0.0));
}

#[test]
fn batch_with_missing_text_field_fails_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    let rows = serde_json::json!([
        {"id": 1, "text": "good"},
        {"id": 2, "comment": "no text field here"}
    ]);
    write_data(rows.as_array().unwrap(), &path).unwrap();

    let records: Vec<Record> = read_data(&path).unwrap();
    let err = documents_from_records(&records, "id", "text").unwrap_err();
    assert!(matches!(
        err,
        SentimentError::MissingField { ref field, index: 1 } if field == "text"
    ));
}

#[test]
fn null_id_is_not_silently_dropped() {
    let rows = serde_json::json!([{"id": null, "text": "good"}]);
    let records: Vec<Record> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();
    assert!(documents_from_records(&records, "id", "text").is_err());
}

#[test]
fn json_table_with_numeric_text_is_scored() {
    let json = br#"[{"id": 1, "text": 42}, {"id": 2, "text": "good"}]"#;
    let table = parse_table("JSON", json).unwrap();

    let documents = documents_from_records(&table, "id", "text").unwrap();
    assert_eq!(documents[0].raw_text, "42");

    let lex = Lexicon::from_pairs([("good", 1.9), ("42", 0.5)]);
    let result = LexiconScorer::new(lex).score(&documents).unwrap();
    assert_eq!(result.get(&DocumentId::from(1u64)), Some(0.5));
    assert_eq!(result.get(&DocumentId::from(2u64)), Some(1.9));
}

#[test]
fn numeric_and_string_spellings_of_an_id_are_grouped() {
    let rows = serde_json::json!([
        {"id": 1, "text": "good"},
        {"id": "1", "text": "good"}
    ]);
    let records: Vec<Record> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();
    let documents = documents_from_records(&records, "id", "text").unwrap();

    let lex = Lexicon::from_pairs([("good", 1.0)]);
    let result = LexiconScorer::new(lex).score(&documents).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&DocumentId::from("1")), Some(2.0));
}
