#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_missing_key_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get(Key::Transactions).unwrap(), None);
    assert_eq!(db.get(Key::Budget).unwrap(), None);
}

#[test]
fn test_set_and_get() {
    let db = Database::open_in_memory().unwrap();
    db.set(Key::Budget, "500").unwrap();
    assert_eq!(db.get(Key::Budget).unwrap().as_deref(), Some("500"));
}

#[test]
fn test_set_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.set(Key::Theme, "\"light\"").unwrap();
    db.set(Key::Theme, "\"dark\"").unwrap();
    assert_eq!(db.get(Key::Theme).unwrap().as_deref(), Some("\"dark\""));
}

#[test]
fn test_keys_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.set(Key::DisplayName, "\"Ana\"").unwrap();
    db.set(Key::Budget, "100").unwrap();
    db.remove(Key::Budget).unwrap();
    assert_eq!(db.get(Key::Budget).unwrap(), None);
    assert_eq!(db.get(Key::DisplayName).unwrap().as_deref(), Some("\"Ana\""));
}

#[test]
fn test_remove_missing_key_is_ok() {
    let db = Database::open_in_memory().unwrap();
    db.remove(Key::Transactions).unwrap();
}

#[test]
fn test_set_many() {
    let mut db = Database::open_in_memory().unwrap();
    db.set(Key::Budget, "100").unwrap();
    db.set_many(&[(Key::Transactions, Some("[]")), (Key::Budget, None)])
        .unwrap();
    assert_eq!(db.get(Key::Transactions).unwrap().as_deref(), Some("[]"));
    assert_eq!(db.get(Key::Budget).unwrap(), None);
}

#[test]
fn test_key_names() {
    assert_eq!(Key::Transactions.as_str(), "transactions");
    assert_eq!(Key::Budget.as_str(), "budget");
    assert_eq!(Key::DisplayName.as_str(), "displayName");
    assert_eq!(Key::Theme.as_str(), "theme");
}

#[test]
fn test_reopen_file_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unibudget.db");
    {
        let db = Database::open(&path).unwrap();
        db.set(Key::Budget, "42").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get(Key::Budget).unwrap().as_deref(), Some("42"));
}
