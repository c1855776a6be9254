//! # Rate Feed Tests
//!
//! Exercises the central bank fetcher against a mock HTTP server.

use anyhow::Result;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use currency_bot::bot::{process_message, Incoming};
use currency_bot::dialogue::ConversationState;
use currency_bot::rate_errors::RateError;
use currency_bot::rates::{CbrRateFetcher, RateSource, BASE_CURRENCY};

const FEED_PATH: &str = "/scripts/XML_daily.asp";

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs Date="18.10.2026" name="Foreign Currency Market">
    <Valute ID="R01235">
        <NumCode>840</NumCode>
        <CharCode>USD</CharCode>
        <Nominal>1</Nominal>
        <Name>Доллар США</Name>
        <Value>90,0000</Value>
        <VunitRate>90,0000</VunitRate>
    </Valute>
    <Valute ID="R01239">
        <NumCode>978</NumCode>
        <CharCode>EUR</CharCode>
        <Nominal>1</Nominal>
        <Name>Евро</Name>
        <Value>98,0000</Value>
        <VunitRate>98,0000</VunitRate>
    </Valute>
    <Valute ID="R01335">
        <NumCode>398</NumCode>
        <CharCode>KZT</CharCode>
        <Nominal>100</Nominal>
        <Name>Казахстанских тенге</Name>
        <Value>17,5000</Value>
        <VunitRate>0,175</VunitRate>
    </Valute>
</ValCurs>"#;

async fn feed_server(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn fetcher_for(server: &MockServer) -> CbrRateFetcher {
    CbrRateFetcher::new(format!("{}{}", server.uri(), FEED_PATH))
}

#[tokio::test]
async fn test_fetch_rates_from_feed() -> Result<()> {
    let server = feed_server(ResponseTemplate::new(200).set_body_string(FEED_BODY)).await;
    let fetcher = fetcher_for(&server);

    let table = fetcher.fetch_rates().await;

    assert_eq!(table.len(), 4);
    assert_eq!(table.get(BASE_CURRENCY), Some(1.0));
    assert_eq!(table.get("USD"), Some(90.0));
    assert_eq!(table.get("EUR"), Some(98.0));
    assert!((table.get("KZT").unwrap() - 0.175).abs() < 1e-12);

    Ok(())
}

#[tokio::test]
async fn test_every_call_refetches() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .expect(2)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    fetcher.fetch_rates().await;
    fetcher.fetch_rates().await;

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_yields_empty_table() -> Result<()> {
    let server = feed_server(ResponseTemplate::new(503)).await;
    let fetcher = fetcher_for(&server);

    assert!(fetcher.fetch_rates().await.is_empty());
    assert!(matches!(
        fetcher.try_fetch().await,
        Err(RateError::Status(status)) if status.as_u16() == 503
    ));

    Ok(())
}

#[tokio::test]
async fn test_malformed_body_yields_empty_table() -> Result<()> {
    let server = feed_server(ResponseTemplate::new(200).set_body_string("")).await;
    let fetcher = fetcher_for(&server);

    assert!(fetcher.fetch_rates().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_feed_yields_empty_table() -> Result<()> {
    let server = MockServer::start().await;
    let url = format!("{}{}", server.uri(), FEED_PATH);
    drop(server);

    let fetcher = CbrRateFetcher::new(url);
    assert!(fetcher.fetch_rates().await.is_empty());

    Ok(())
}

/// Feed outage surfaces to the user exactly like a mistyped currency
#[tokio::test]
async fn test_outage_reported_as_unknown_currency() -> Result<()> {
    let server = feed_server(ResponseTemplate::new(500)).await;
    let fetcher = fetcher_for(&server);

    let incoming = Incoming {
        text: "доллар",
        first_name: None,
        bot_username: "rates_bot",
    };
    let transition = process_message(
        ConversationState::AwaitingRateQueryCurrency,
        incoming,
        &fetcher,
    )
    .await;

    assert_eq!(transition.next, ConversationState::AwaitingRateQueryCurrency);
    assert!(transition.replies[0].text.contains("Неправильная валюта"));

    Ok(())
}

#[tokio::test]
async fn test_conversion_against_live_feed_shape() -> Result<()> {
    let server = feed_server(ResponseTemplate::new(200).set_body_string(FEED_BODY)).await;
    let fetcher = fetcher_for(&server);

    let incoming = Incoming {
        text: "тенге",
        first_name: None,
        bot_username: "rates_bot",
    };
    let transition = process_message(
        ConversationState::AwaitingTargetCurrency {
            amount: 1.0,
            source_code: "USD".to_string(),
            source_name: "USD".to_string(),
        },
        incoming,
        &fetcher,
    )
    .await;

    assert_eq!(transition.next, ConversationState::AwaitingRestartConfirmation);
    assert!(transition.replies[0]
        .text
        .contains("1 USD = 514.29 KZT (Казахстанский тенге)"));

    Ok(())
}
