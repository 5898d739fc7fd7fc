use futures::TryStreamExt;
use mongodb::{
    Cursor,
    bson::{Document, doc},
};
use serde::de::DeserializeOwned;

use crate::error::Result;

pub mod competition;
pub mod favorite;
pub mod match_act;
pub mod matches;
pub mod referee;
pub mod team;
pub mod user;
pub mod wrestler;

/// Case-insensitive "contains" match. The term is escaped, so user input is
/// matched literally.
pub(crate) fn contains_ignore_case(term: &str) -> Document {
    doc! { "$regex": escape_regex(term.trim()), "$options": "i" }
}

/// `$or` of a case-insensitive match of `term` against each field
pub(crate) fn search_any(fields: &[&str], term: &str) -> Document {
    let clauses: Vec<Document> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, contains_ignore_case(term));
            clause
        })
        .collect();
    doc! { "$or": clauses }
}

fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub(crate) async fn collect<T>(cursor: Cursor<T>) -> Result<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    Ok(cursor.try_collect().await?)
}

/// Non-blank search terms only
pub(crate) fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_regex_metacharacters() {
        assert_eq!(escape_regex("C.L. (Tao)"), r"C\.L\. \(Tao\)");
        assert_eq!(escape_regex("plain"), "plain");
    }

    #[test]
    fn test_search_any_builds_or_clause() {
        let query = search_any(&["name", "surname"], " Pancho ");
        let clauses = query.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);

        let first = clauses[0].as_document().unwrap();
        let regex = first.get_document("name").unwrap();
        assert_eq!(regex.get_str("$regex").unwrap(), "Pancho");
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_blank_search_is_ignored() {
        assert_eq!(search_term(&Some("   ".to_string())), None);
        assert_eq!(search_term(&Some(" tao ".to_string())), Some("tao"));
        assert_eq!(search_term(&None), None);
    }
}
