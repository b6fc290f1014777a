use std::sync::{Arc, Once};

use api_server::state::AppState;
use blogpost_core::domain::{Author, BlogPost, NewPost};
use blogpost_core::ports::PostRepository;
use blogpost_infra::InMemoryPostRepository;
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use tracing::subscriber::set_global_default;
use tracing_subscriber::EnvFilter;

pub const SEED_COUNT: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "John", "Ken", "Margaret",
    "Niklaus", "Radia",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Dijkstra", "Hamilton", "Hopper", "Kay", "Knuth", "Liskov", "Lovelace", "McCarthy",
    "Perlman", "Ritchie", "Wirth",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
];

/// A fresh store seeded with generated posts, one per test.
pub struct TestApp {
    pub repo: Arc<InMemoryPostRepository>,
    pub seeded: Vec<BlogPost>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::init_telemetry();

        let repo = Arc::new(InMemoryPostRepository::new());
        let seed: Vec<NewPost> = (0..SEED_COUNT).map(|_| generate_blog_post_data()).collect();
        let seeded = repo
            .insert_many(seed)
            .await
            .expect("Failed to seed blog post data");

        TestApp { repo, seeded }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.repo.clone())
    }

    fn init_telemetry() {
        // Initialize the telemetry setup at most once.
        static INIT_TELEMETRY: Once = Once::new();
        INIT_TELEMETRY.call_once(|| {
            // Only enable the telemetry if the `TEST_LOG` environment variable is set.
            if std::env::var("TEST_LOG").is_ok() {
                let subscriber = tracing_subscriber::fmt::Subscriber::builder()
                    .with_env_filter(
                        EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("debug")),
                    )
                    .finish();
                set_global_default(subscriber).expect("Failed to set a `tracing` global subscriber")
            }
        });
    }
}

/// A post with a random author, a lorem sentence title and a lorem paragraph body.
pub fn generate_blog_post_data() -> NewPost {
    let mut rng = rand::thread_rng();
    NewPost {
        author: Author::new(pick(&mut rng, FIRST_NAMES), pick(&mut rng, LAST_NAMES)),
        title: sentence(&mut rng),
        content: paragraph(&mut rng),
    }
}

/// The JSON body a client would send to create `post`.
pub fn create_body(post: &NewPost) -> Value {
    json!({
        "author": {
            "firstName": post.author.first_name,
            "lastName": post.author.last_name,
        },
        "content": post.content,
        "title": post.title,
    })
}

fn pick(rng: &mut impl Rng, options: &[&str]) -> String {
    options.choose(rng).expect("non-empty word list").to_string()
}

fn sentence(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(4..=9);
    let words: Vec<String> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn paragraph(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(3..=6);
    (0..len).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}
