//! Test harness: a live server over a fresh, seeded in-memory store.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

use api_server::startup;
use api_server::state::AppState;
use blog_core::domain::{Author, NewPost};
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua",
];
const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen",
];

pub const SEED_COUNT: usize = 10;

fn pick(rng: &mut impl Rng, from: &[&'static str]) -> &'static str {
    from.choose(rng).copied().unwrap_or("lorem")
}

fn sentence(rng: &mut impl Rng, words: usize) -> String {
    (0..words)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random post payload shaped like a client request.
pub fn generate_post_data() -> Value {
    let mut rng = rand::thread_rng();
    let title_len = rng.gen_range(3..8);
    let content_len = rng.gen_range(20..60);

    json!({
        "title": sentence(&mut rng, title_len),
        "content": sentence(&mut rng, content_len),
        "author": {
            "firstName": pick(&mut rng, FIRST_NAMES),
            "lastName": pick(&mut rng, LAST_NAMES),
        }
    })
}

fn draft_from(value: &Value) -> NewPost {
    NewPost::new(
        value["title"].as_str().unwrap_or_default(),
        value["content"].as_str().unwrap_or_default(),
        Author::new(
            value["author"]["firstName"].as_str().unwrap_or_default(),
            value["author"]["lastName"].as_str().unwrap_or_default(),
        ),
    )
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryPostRepository>,
    pub client: reqwest::Client,
    handle: ServerHandle,
}

impl TestApp {
    /// Start a server on an ephemeral port without seeding.
    pub async fn spawn_empty() -> Self {
        let store = Arc::new(InMemoryPostRepository::new());

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let server = startup::run(listener, AppState::with_repository(store.clone()))
            .expect("failed to start server");
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            address: format!("http://127.0.0.1:{port}"),
            store,
            client: reqwest::Client::new(),
            handle,
        }
    }

    /// Start a server and seed its store with synthetic posts.
    pub async fn spawn() -> Self {
        let app = Self::spawn_empty().await;

        let drafts = (0..SEED_COUNT)
            .map(|_| draft_from(&generate_post_data()))
            .collect();
        app.store.insert_many(drafts).await.expect("seeding failed");

        app
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Empty the store and stop the server.
    pub async fn teardown(self) {
        self.store.reset().await.expect("reset failed");
        self.handle.stop(true).await;
    }
}
