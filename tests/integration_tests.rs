//! Integration tests using wiremock to simulate HTTP servers.
//!
//! greq blocks the calling thread, so every call is moved onto tokio's
//! blocking pool while the mock server keeps running.

use greq::{with_body, with_body_bytes, with_headers, Client, Error, TransportError};
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{any, body_string, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Command {
    #[serde(default)]
    object_to_fetch: String,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Person {
    name: String,
    hair_color: String,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Book {
    title: String,
    copies_sold: u32,
}

fn james() -> Person {
    Person {
        name: "James".to_string(),
        hair_color: "Brown".to_string(),
    }
}

fn hitchhikers_guide() -> Book {
    Book {
        title: "Hitchhiker's Guide to the Galaxy".to_string(),
        copies_sold: 42,
    }
}

fn book_command() -> Command {
    Command {
        object_to_fetch: "book".to_string(),
    }
}

/// Answers like a small people-and-books service: the `Auth` header unlocks
/// the admin, otherwise the JSON command in the body picks the object.
fn people_and_books(req: &Request) -> ResponseTemplate {
    let ok = ResponseTemplate::new(200);

    if req
        .headers
        .get("Auth")
        .is_some_and(|value| value == "secret-key")
    {
        return ok.set_body_string("{\"name\": \"Admin\", \"hairColor\": \"Gold\"}\n");
    }

    let command = match serde_json::from_slice::<Option<Command>>(&req.body) {
        Ok(command) => command.unwrap_or_default(),
        Err(_) => return ok.set_body_string("error"),
    };

    match command.object_to_fetch.as_str() {
        "book" => ok.set_body_string(
            "{\"title\": \"Hitchhiker's Guide to the Galaxy\", \"copiesSold\": 42}\n",
        ),
        _ => ok.set_body_string("{\"name\": \"James\", \"hairColor\": \"Brown\"}\n"),
    }
}

async fn start_people_and_books() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(people_and_books)
        .mount(&mock_server)
        .await;

    mock_server
}

async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test]
async fn test_regular_get() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || greq::get(uri, [])).await.unwrap();

    let mut person = Person::default();
    response.decode_json(&mut person).unwrap();
    assert_eq!(person, james());
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_with_headers() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || greq::get(uri, [with_headers([("Auth", "secret-key")])]))
        .await
        .unwrap();

    let mut person = Person::default();
    response.decode_json(&mut person).unwrap();
    assert_eq!(
        person,
        Person {
            name: "Admin".to_string(),
            hair_color: "Gold".to_string(),
        }
    );
}

#[tokio::test]
async fn test_post_with_body() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || greq::post(uri, [with_body(&book_command())]))
        .await
        .unwrap();

    let mut book = Book::default();
    response.decode_json(&mut book).unwrap();
    assert_eq!(book, hitchhikers_guide());
}

#[tokio::test]
async fn test_post_with_body_bytes() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || {
        greq::post(uri, [with_body_bytes(r#"{"objectToFetch": "book"}"#)])
    })
    .await
    .unwrap();

    let mut book = Book::default();
    response.decode_json(&mut book).unwrap();
    assert_eq!(book, hitchhikers_guide());
}

#[tokio::test]
async fn test_body_bytes_override_body() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || {
        greq::post(
            uri,
            [
                with_body(&Command {
                    object_to_fetch: "person".to_string(),
                }),
                with_body_bytes(r#"{"objectToFetch": "book"}"#),
            ],
        )
    })
    .await
    .unwrap();

    let mut book = Book::default();
    response.decode_json(&mut book).unwrap();
    assert_eq!(book, hitchhikers_guide());
}

#[tokio::test]
async fn test_builder_style() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || -> Result<_, Error> {
        let client = Client::new()?;
        client
            .new_request(Method::POST, uri)
            .body(&book_command())
            .send()
    })
    .await
    .unwrap();

    let mut book = Book::default();
    response.decode_json(&mut book).unwrap();
    assert_eq!(book, hitchhikers_guide());
}

#[tokio::test]
async fn test_body_and_headers_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/commands"))
        .and(header("Auth", "secret-key"))
        .and(header("User-Agent", "greq-test"))
        .and(body_string(r#"{"objectToFetch":"book"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"accepted": true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/commands", mock_server.uri());
    let response = blocking(move || -> Result<_, Error> {
        let client = Client::builder()
            .default_header("User-Agent", "greq-test")?
            .build()?;
        client.post(
            url,
            [
                with_body(&book_command()),
                with_headers([("Auth", "secret-key")]),
            ],
        )
    })
    .await
    .unwrap();

    let mut accepted = serde_json::Value::Null;
    response.decode_json(&mut accepted).unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(accepted["accepted"], true);
}

#[tokio::test]
async fn test_get_without_body_sends_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(body_string("null"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let response = blocking(move || greq::get(uri, [])).await.unwrap();

    let mut items: Vec<String> = vec!["stale".to_string()];
    response.decode_json(&mut items).unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_put_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/books/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/books/1"))
        .respond_with(ResponseTemplate::new(202).set_body_string(r#"{"deleted": 1}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/books/1", mock_server.uri());
    let (put, delete) = blocking(move || -> Result<_, Error> {
        let client = Client::new()?;
        let put = client.put(url.as_str(), [with_body(&hitchhikers_guide_json())])?;
        let delete = client.delete(url.as_str(), [])?;
        Ok((put, delete))
    })
    .await
    .unwrap();

    // An empty body decodes to nothing and leaves the destination alone.
    let mut book = hitchhikers_guide();
    put.decode_json(&mut book).unwrap();
    assert_eq!(put.status(), StatusCode::NO_CONTENT);
    assert_eq!(book, hitchhikers_guide());

    let mut deleted = serde_json::Value::Null;
    delete.decode_json(&mut deleted).unwrap();
    assert_eq!(deleted["deleted"], 1);
}

fn hitchhikers_guide_json() -> serde_json::Value {
    serde_json::json!({
        "title": "Hitchhiker's Guide to the Galaxy",
        "copiesSold": 42,
    })
}

#[tokio::test]
async fn test_http_error_status_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error": "not found"}"#))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let response = blocking(move || greq::get(url, [])).await.unwrap();

    let mut payload = serde_json::Value::Null;
    response.decode_json(&mut payload).unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(payload["error"], "not found");
}

#[tokio::test]
async fn test_malformed_response_is_decoding_error() {
    let mock_server = start_people_and_books().await;
    let uri = mock_server.uri();

    let response = blocking(move || greq::post(uri, [with_body_bytes("not json")]))
        .await
        .unwrap();

    assert_eq!(response.text(), "error");

    let mut book = Book::default();
    let result = response.decode_json(&mut book);
    match result {
        Err(Error::Decoding(_)) => {}
        _ => panic!("Expected Decoding error, got {:?}", result),
    }
    assert_eq!(book, Book::default());
}

#[tokio::test]
async fn test_unreachable_url_is_transport_error() {
    let result = blocking(|| greq::get("http://127.0.0.1:1/", [])).await;

    match result {
        Err(Error::Transport(TransportError::Network(_))) => {}
        _ => panic!("Expected Transport error, got {:?}", result),
    }
}

#[tokio::test]
async fn test_relative_url_is_transport_error() {
    let result = blocking(|| greq::post("people-and-books.com", [with_body(&book_command())])).await;

    match result {
        Err(Error::Transport(TransportError::InvalidUrl(_))) => {}
        _ => panic!("Expected Transport error, got {:?}", result),
    }
}
