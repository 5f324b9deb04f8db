use clap::Parser;
use fake::{faker::name::en::Name, Fake};
use initials_avatar::{
    app::Application,
    config::AppConfig,
    telemetry::{build_telemetry, register_telemetry},
};
use std::sync::LazyLock;

static TELEMETRY: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let telemetry = build_telemetry(subscriber_name, default_filter_level, std::io::stdout);
        register_telemetry(telemetry);
    } else {
        let null_telemetry = build_telemetry(subscriber_name, default_filter_level, std::io::sink);
        register_telemetry(null_telemetry);
    };
});

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub username: String,
}

impl TestApp {
    pub async fn get_avatar(&self, username: &str, query: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/avatar/{}", &self.address, username))
            .query(query)
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn get_avatar_data_uri(
        &self,
        username: &str,
        query: &[(&str, &str)],
    ) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/avatar/{}/data-uri", &self.address, username))
            .query(query)
            .send()
            .await
            .expect("failed to execute request")
    }

    pub async fn post_avatar<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/avatar", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(&[]).await
}

/// Spawns the service with extra command line flags, e.g. avatar defaults.
pub async fn spawn_app_with(args: &[&str]) -> TestApp {
    LazyLock::force(&TELEMETRY);

    // Use a random OS port
    let app_config = AppConfig::parse_from(
        ["initials-avatar", "--app-application-port", "0"]
            .iter()
            .chain(args.iter()),
    );

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let app = Application::build(app_config).await.unwrap();

    let test_app = TestApp {
        address: format!("http://localhost:{}", &app.port),
        api_client,
        username: Name().fake(),
    };

    _ = tokio::spawn(app.run_until_stopped());

    test_app
}
