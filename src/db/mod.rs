use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Quiz, QuizAttempt},
};

pub const QUIZZES_COLLECTION: &str = "quizzes";
pub const QUIZ_ATTEMPTS_COLLECTION: &str = "quiz_attempts";

fn index(name: &str, keys: Document, unique: bool) -> IndexModel {
    let options = IndexOptions::builder()
        .name(name.to_string())
        .unique(unique)
        .build();
    IndexModel::builder().keys(keys).options(options).build()
}

/// Quizzes are looked up by id, and listed per course and per owning teacher.
pub fn quiz_indexes() -> Vec<IndexModel> {
    vec![
        index("id_unique", doc! { "id": 1 }, true),
        index("course_id", doc! { "course_id": 1 }, false),
        index("created_by", doc! { "created_by_user_id": 1 }, false),
    ]
}

/// Results are read per student, newest first.
pub fn quiz_attempt_indexes() -> Vec<IndexModel> {
    vec![
        index("id_unique", doc! { "id": 1 }, true),
        index(
            "student_submitted_at",
            doc! { "student_id": 1, "submitted_at": -1 },
            false,
        ),
        index("quiz_id", doc! { "quiz_id": 1 }, false),
    ]
}

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.app_name = Some("coursequiz-server".to_string());
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db = Self {
            client,
            db_name: config.mongo_db_name.clone(),
        };
        db.health_check().await?;

        log::info!("Connected to MongoDB database '{}'", db.db_name);
        Ok(db)
    }

    fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(name)
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.collection(QUIZZES_COLLECTION)
    }

    pub fn quiz_attempts(&self) -> Collection<QuizAttempt> {
        self.collection(QUIZ_ATTEMPTS_COLLECTION)
    }

    /// Creates every index the repositories rely on. Idempotent.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.quizzes().create_indexes(quiz_indexes()).await?;
        log::info!("Indexes ready on '{}'", QUIZZES_COLLECTION);

        self.quiz_attempts()
            .create_indexes(quiz_attempt_indexes())
            .await?;
        log::info!("Indexes ready on '{}'", QUIZ_ATTEMPTS_COLLECTION);

        Ok(())
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
