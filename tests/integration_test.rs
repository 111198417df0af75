//! Integration tests.
//!
//! Tests cover:
//! - Resolve → insert → load_all pipeline against an in-memory store
//! - Load-order guarantee under interleaved reads
//! - File-backed store survival across reopen, configured via INI
//! - Balance overview degradation with a mock quote port

mod common;

use common::*;
use tradelog::adapters::file_config_adapter::FileConfigAdapter;
use tradelog::adapters::sqlite_store::SqliteStore;
use tradelog::domain::overview::{total_known, value_balances};
use tradelog::domain::resolver::resolve;
use tradelog::ports::trade_store_port::TradeStorePort;

mod resolve_and_persist {
    use super::*;

    #[test]
    fn resolved_trade_round_trips_through_store() {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize_schema().unwrap();

        let mut input = make_input("BTCUSDT", 1.0);
        input.entry_price = Some(100.0);
        input.exit_price = Some(110.0);

        let trade = resolve(&input).unwrap();
        let id = store.insert(&trade).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, id);
        assert_eq!(loaded[0].trade, trade);
        assert!((loaded[0].trade.pnl - 9.79).abs() < 1e-9);
    }

    #[test]
    fn target_roi_trade_persists_solved_exit() {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize_schema().unwrap();

        let mut input = make_input("ETHUSDT", 2.0);
        input.entry_value = Some(1000.0);
        input.target_roi = Some(5.0);

        let trade = resolve(&input).unwrap();
        store.insert(&trade).unwrap();

        let loaded = store.load_all().unwrap();
        let stored = &loaded[0].trade;
        assert_eq!(stored.roi, 5.0);
        assert!((stored.exit_price * stored.qty - stored.exit_value).abs() < 1e-9);
    }

    #[test]
    fn load_all_preserves_insertion_order() {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize_schema().unwrap();

        for (pair, exit_price) in [("AAAUSDT", 101.0), ("BBBUSDT", 102.0), ("CCCUSDT", 103.0)] {
            let mut input = make_input(pair, 1.0);
            input.entry_price = Some(100.0);
            input.exit_price = Some(exit_price);
            store.insert(&resolve(&input).unwrap()).unwrap();

            // Interleaved reads must not disturb ordering.
            let seen = store.load_all().unwrap();
            assert_eq!(seen.last().unwrap().trade.pair, pair);
        }

        let loaded = store.load_all().unwrap();
        let ids: Vec<i64> = loaded.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let pairs: Vec<&str> = loaded.iter().map(|t| t.trade.pair.as_str()).collect();
        assert_eq!(pairs, vec!["AAAUSDT", "BBBUSDT", "CCCUSDT"]);
    }

    #[test]
    fn failed_resolution_persists_nothing() {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize_schema().unwrap();

        let input = make_input("BTCUSDT", 0.0);
        assert!(resolve(&input).is_err());

        assert!(store.load_all().unwrap().is_empty());
    }
}

mod file_backed_store {
    use super::*;

    #[test]
    fn config_built_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("trades.db");
        let ini = format!("[store]\npath = {}\npool_size = 1\n", db_path.display());
        let config = FileConfigAdapter::from_string(&ini).unwrap();

        {
            let store = SqliteStore::from_config(&config).unwrap();
            store.initialize_schema().unwrap();

            let mut input = make_input("BTCUSDT", 1.0);
            input.entry_price = Some(100.0);
            input.exit_price = Some(110.0);
            store.insert(&resolve(&input).unwrap()).unwrap();
        }

        let reopened = SqliteStore::from_config(&config).unwrap();
        reopened.initialize_schema().unwrap();

        let loaded = reopened.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].trade.pair, "BTCUSDT");
    }
}

mod balance_overview {
    use super::*;
    use tradelog::ports::quote_port::QuotePort;

    #[test]
    fn overview_degrades_per_asset_and_totals_the_rest() {
        let quotes = MockQuotePort::new()
            .with_price("BTCUSDT", 50_000.0)
            .with_balance("BTC", 0.5, 0.0)
            .with_balance("XYZ", 10.0, 0.0)
            .with_balance("USDT", 100.0, 0.0);

        let balances = quotes.get_balances().unwrap();
        let valued = value_balances(&quotes, &balances, "USDT");

        assert_eq!(valued.len(), 3);
        assert!((valued[0].value.unwrap() - 25_000.0).abs() < 1e-9);
        assert!(valued[1].value.is_none());
        assert!((valued[2].value.unwrap() - 100.0).abs() < 1e-9);

        assert!((total_known(&valued) - 25_100.0).abs() < 1e-9);
    }

    #[test]
    fn balances_failure_is_an_explicit_error() {
        let quotes = MockQuotePort::new().with_balances_error("connection refused");
        let result = quotes.get_balances();
        assert!(result.is_err());
    }
}
