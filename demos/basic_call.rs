//! Basic example demonstrating GET and POST requests in both configuration styles.
//!
//! This example shows how to:
//! - Make one-off requests with the free functions
//! - Reuse a client for several requests
//! - Configure requests with configurers or by chaining calls
//! - Decode response bodies as JSON
//!
//! Run with: `cargo run --example basic_call`

use greq::{with_body, with_headers, Client, Error};
use http::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("greq=debug,basic_call=info")
        .init();

    println!("=== One-off GET ===");
    let response = greq::get("https://jsonplaceholder.typicode.com/posts/1", [])?;
    let mut post = Post::default();
    response.decode_json(&mut post)?;

    println!("Post ID: {}", post.id);
    println!("Title: {}", post.title);
    println!("Status code: {}", response.status());
    println!();

    println!("=== POST with configurers ===");
    let client = Client::builder()
        .default_header("User-Agent", "greq-demo/0.1")?
        .build()?;

    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let response = client.post(
        "https://jsonplaceholder.typicode.com/posts",
        [
            with_body(&new_post),
            with_headers([("Content-Type", "application/json")]),
        ],
    )?;
    response.decode_json(&mut post)?;

    println!("Created post ID: {}", post.id);
    println!("Title: {}", post.title);
    println!();

    println!("=== PUT with the builder ===");
    let response = client
        .new_request(Method::PUT, "https://jsonplaceholder.typicode.com/posts/1")
        .body(&new_post)
        .header("Content-Type", "application/json")
        .send()?;
    response.decode_json(&mut post)?;

    println!("Updated title: {}", post.title);
    println!("Raw response length: {} bytes", response.bytes().len());

    Ok(())
}
