use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tmp dir"),
        }
    }

    fn majex(&self, server: &MockServer) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("majex"));
        cmd.current_dir(self.dir.path())
            .env_remove("MAJEX_CONFIG_FILE")
            .env_remove("MAJEX_PASSWORD")
            .env("RUST_LOG", "warn")
            .arg("--api-url")
            .arg(server.url("/api"))
            .arg("--session-file")
            .arg(self.dir.path().join("session.json"));
        cmd
    }
}

#[test]
fn asset_url_resolves_against_the_backend_origin() {
    let server = MockServer::start();
    let catalog = server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"logo":[{"id":1,"key":"logo-main","category":"logo","label":"Logo","url":"/storage/logo.png","alt_text":null,"sort_order":0,"is_active":true}]}}"#);
    });

    let workspace = Workspace::new();
    workspace
        .majex(&server)
        .args(["assets", "url", "logo-main"])
        .assert()
        .success()
        .stdout(contains(format!("{}/storage/logo.png", server.base_url())));
    catalog.assert();
}

#[test]
fn asset_url_falls_back_when_backend_is_down() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(503);
    });

    let workspace = Workspace::new();
    workspace
        .majex(&server)
        .args(["assets", "url", "service-formation"])
        .assert()
        .success()
        .stdout(contains("assets/images/pic5.jpg"));
}

#[test]
fn admin_commands_require_a_session() {
    let server = MockServer::start();
    let stats = server.mock(|when, then| {
        when.method("GET").path("/api/contacts/stats");
        then.status(200).body(r#"{"success":true,"data":{}}"#);
    });

    let workspace = Workspace::new();
    workspace
        .majex(&server)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("majex login"));
    stats.assert_calls(0);
}

#[test]
fn login_then_dashboard_uses_the_stored_token() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method("POST").path("/api/login");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"token":"cli-token","user":{"id":1,"name":"Admin","email":"admin@majex.test"}}}"#);
    });
    let user = server.mock(|when, then| {
        when.method("GET")
            .path("/api/user")
            .header("authorization", "Bearer cli-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"id":1,"name":"Admin","email":"admin@majex.test"}}"#);
    });
    let events = server.mock(|when, then| {
        when.method("GET")
            .path("/api/events")
            .header("authorization", "Bearer cli-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"current_page":1,"last_page":1,"total":2,"data":[
                {"id":1,"title":"Formation","description":"d","type":"formation","date":"2030-01-10 09:00:00","location":"Abidjan","status":"published"},
                {"id":2,"title":"Séminaire","description":"d","type":"seminaire","date":"2030-02-10 09:00:00","location":"Abidjan","status":"draft"}
            ]}}"#);
    });
    let stats = server.mock(|when, then| {
        when.method("GET")
            .path("/api/contacts/stats")
            .header("authorization", "Bearer cli-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"total":3,"unread":1,"replied":2,"this_week":1}}"#);
    });

    let workspace = Workspace::new();
    workspace
        .majex(&server)
        .args(["login", "--email", "admin@majex.test"])
        .env("MAJEX_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(contains("\"email\": \"admin@majex.test\""));

    workspace
        .majex(&server)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(contains("\"published_events\": 1"))
        .stdout(contains("\"reply_rate\": 67"));

    login.assert();
    user.assert();
    events.assert();
    stats.assert();
}

#[test]
fn expired_session_is_discarded_at_startup() {
    let server = MockServer::start();
    let user = server.mock(|when, then| {
        when.method("GET")
            .path("/api/user")
            .header("authorization", "Bearer expired-token");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"message":"Unauthenticated."}"#);
    });
    let stats = server.mock(|when, then| {
        when.method("GET").path("/api/contacts/stats");
        then.status(200).body(r#"{"success":true,"data":{}}"#);
    });

    let workspace = Workspace::new();
    let session_file = workspace.dir.path().join("session.json");
    std::fs::write(
        &session_file,
        r#"{"auth_token":"expired-token","auth_user":{"id":1,"name":"Admin","email":"admin@majex.test"}}"#,
    )
    .expect("seed session");

    workspace
        .majex(&server)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(contains("majex login"));

    assert!(!session_file.exists());
    user.assert();
    stats.assert_calls(0);
}

#[test]
fn rejected_write_reports_backend_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/contact");
        then.status(422)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Le champ message est obligatoire."}"#);
    });

    let workspace = Workspace::new();
    workspace
        .majex(&server)
        .args([
            "contacts",
            "send",
            "--name",
            "Awa",
            "--email",
            "awa@example.com",
            "--subject",
            "Formation",
            "--message",
            "Bonjour",
        ])
        .assert()
        .failure()
        .stderr(contains("Le champ message est obligatoire."));
}
