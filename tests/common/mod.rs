use math_practice::config::Settings;
use math_practice::quiz::QuizController;
use math_practice::run;
use math_practice::session::InMemorySessionStore;
use rand::rngs::mock::StepRng;
use std::net::TcpListener;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Every question this app hands out is "What is 1 + 1?".
pub const FIXED_QUESTION: &str = "What is 1 + 1?";
pub const FIXED_ANSWER: &str = "2";

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemorySessionStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// A client with its own cookie jar, i.e. a separate visitor.
    #[allow(dead_code)]
    pub fn new_visitor(&self) -> reqwest::Client {
        visitor_client()
    }

    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn visitor_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemorySessionStore::new());
    let quiz = QuizController::with_rng(store.clone(), StepRng::new(0, 0));

    let server = run(listener, Settings::development(TEST_SECRET), quiz).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        api_client: visitor_client(),
    }
}
