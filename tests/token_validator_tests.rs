use bot_forge::services::token_validator::{
    BotIdentity, TelegramTokenValidator, TokenValidator, ValidationError,
};
use std::time::Duration;
use tokio::net::TcpListener;

fn validator(url: &str) -> TelegramTokenValidator {
    TelegramTokenValidator::new(url, Duration::from_secs(5)).expect("Failed to build validator")
}

#[tokio::test]
async fn test_valid_token_returns_username() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/bot111:AAA/getMe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"id":111,"is_bot":true,"first_name":"Foo","username":"fooBot"}}"#)
        .create_async()
        .await;

    let identity = validator(&server.url()).check("111:AAA").await.unwrap();

    assert_eq!(identity, BotIdentity { id: 111, username: "fooBot".to_string() });
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_token_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/bot111:BAD/getMe")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
        .create_async()
        .await;

    let err = validator(&server.url()).check("111:BAD").await.unwrap_err();
    assert!(matches!(err, ValidationError::Rejected));
}

#[tokio::test]
async fn test_missing_username_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/bot111:AAA/getMe")
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{"id":111}}"#)
        .create_async()
        .await;

    let err = validator(&server.url()).check("111:AAA").await.unwrap_err();
    assert!(matches!(err, ValidationError::Rejected));
}

#[tokio::test]
async fn test_gateway_error_page_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/bot111:AAA/getMe")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = validator(&server.url()).check("111:AAA").await.unwrap_err();
    assert!(matches!(err, ValidationError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    let err = validator("http://127.0.0.1:1").check("111:AAA").await.unwrap_err();

    let reason = match err {
        ValidationError::Network(reason) => reason,
        other => panic!("expected a network error, got {other:?}"),
    };
    assert!(!reason.contains("111:AAA"), "token leaked into error: {reason}");
}

#[tokio::test]
async fn test_silent_api_times_out() {
    // accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let validator = TelegramTokenValidator::new(format!("http://{addr}"), Duration::from_millis(200))
        .expect("Failed to build validator");
    let result = tokio::time::timeout(Duration::from_secs(5), validator.check("111:AAA"))
        .await
        .expect("token check did not honour its timeout");

    match result {
        Err(ValidationError::Network(reason)) => {
            assert!(!reason.contains("111:AAA"), "token leaked into error: {reason}");
        }
        other => panic!("expected a network error, got {other:?}"),
    }
    server.abort();
}
