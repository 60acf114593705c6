use flip_core::{CurrencyTable, FlipError};

#[test]
fn default_table_resolves_every_known_symbol() {
    let table = CurrencyTable::default();
    assert!(!table.is_empty());
    for symbol in table.symbols() {
        let code = table.resolve(symbol).expect("known symbol resolves");
        assert!(!code.is_empty(), "empty code for {symbol}");
    }
    assert_eq!(table.resolve("chaos").unwrap(), "chaos");
    assert_eq!(table.resolve("exalted").unwrap(), "exalted");
    assert_eq!(table.resolve("alchemy").unwrap(), "alch");
}

#[test]
fn unknown_symbol_is_an_error() {
    let table = CurrencyTable::default();
    let err = table.resolve("dust").unwrap_err();
    assert_eq!(
        err,
        FlipError::UnknownCurrency {
            symbol: "dust".into()
        }
    );
}

#[test]
fn custom_entries_override_and_extend() {
    let table = CurrencyTable::from_entries([("chaos", "c")]).with_entry("ancient", "ancient-orb");
    assert_eq!(table.len(), 2);
    assert_eq!(table.resolve("chaos").unwrap(), "c");
    assert_eq!(table.resolve("ancient").unwrap(), "ancient-orb");
    assert!(!table.contains("exalted"));
    assert!(CurrencyTable::empty().resolve("chaos").is_err());
}

#[test]
fn table_loads_from_json_object() {
    let table: CurrencyTable =
        serde_json::from_str(r#"{"chaos":"chaos","divine":"divine"}"#).expect("valid table");
    assert_eq!(table.symbols(), vec!["chaos", "divine"]);
}
