use std::sync::Arc;

use httpmock::MockServer;
use majex::assets::{AssetForm, FallbackTable};
use majex::http::ApiError;
use majex::session::{MemorySessionStore, Session};
use majex::site::Site;
use majex::upload::ImageUpload;
use majex_api_types::{AssetCategory, ReorderItem, User};
use url::Url;

const CATALOG: &str = r#"{
  "success": true,
  "data": {
    "logo": [
      {"id":1,"key":"logo-main","category":"logo","label":"Logo principal","url":"/storage/assets/logo.png","alt_text":"MAJEX","sort_order":0,"is_active":true}
    ],
    "hero": [
      {"id":2,"key":"hero-main","category":"hero","label":"Bannière","url":null,"alt_text":null,"sort_order":0,"is_active":true}
    ],
    "partner": [
      {"id":4,"key":"partner-rti","category":"partner","label":"RTI","url":"https://cdn.majex.test/rti.webp","alt_text":null,"sort_order":1,"is_active":true},
      {"id":5,"key":"partner-anac","category":"partner","label":"ANAC","url":"/storage/anac.png","alt_text":null,"sort_order":2,"is_active":true},
      {"id":6,"key":"partner-oscn","category":"partner","label":"OSCN","url":"/storage/oscn.png","alt_text":null,"sort_order":3,"is_active":true}
    ]
  }
}"#;

const SAVED_ASSET: &str = r#"{"success":true,"data":{"id":7,"key":"partner-kaera","category":"partner","label":"Kaera","url":"/storage/kaera.svg","alt_text":null,"sort_order":4,"is_active":true}}"#;

fn signed_in_site(server: &MockServer) -> Site {
    let sessions = Arc::new(MemorySessionStore::with_session(Session {
        token: "tok-admin".into(),
        user: User {
            id: 1,
            name: "Admin".into(),
            email: "admin@majex.test".into(),
        },
    }));
    let api = Url::parse(&server.url("/api")).expect("api url");
    let assets = Url::parse(&server.base_url()).expect("asset url");
    Site::build(&api, &assets, FallbackTable::default(), sessions).expect("site")
}

#[tokio::test]
async fn startup_loads_catalog_once_and_resolves_urls() {
    let server = MockServer::start_async().await;
    let catalog = server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(CATALOG);
    });

    let site = signed_in_site(&server);
    let (first, second) = tokio::join!(site.start(), site.assets.load_all());
    assert!(Arc::ptr_eq(&first, &second));

    assert_eq!(
        site.assets.get_url("logo-main"),
        format!("{}/storage/assets/logo.png", server.base_url())
    );
    assert_eq!(site.assets.get_url("hero-main"), "assets/images/pic4.jpg");
    assert_eq!(
        site.assets.get_url("partner-rti"),
        "https://cdn.majex.test/rti.webp"
    );
    assert_eq!(
        site.assets.get_url("no-such-key"),
        "assets/images/placeholder.png"
    );

    let partners: Vec<_> = site
        .assets
        .get_by_category(AssetCategory::Partner)
        .into_iter()
        .map(|asset| asset.key)
        .collect();
    assert_eq!(partners, ["partner-rti", "partner-anac", "partner-oscn"]);
    catalog.assert();
}

#[tokio::test]
async fn catalog_failure_degrades_to_fallbacks() {
    let server = MockServer::start_async().await;
    let catalog = server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(500)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Server Error"}"#);
    });

    let site = signed_in_site(&server);
    assert!(site.start().await.is_empty());
    assert!(site.assets.load_all().await.is_empty());

    for category in AssetCategory::ALL {
        assert!(site.assets.get_by_category(category).is_empty());
    }
    assert_eq!(
        site.assets.get_url("logo-main"),
        "assets/logos/0-removebg-preview 1.png"
    );
    catalog.assert_calls(1);
}

#[tokio::test]
async fn unexpected_catalog_shape_loads_empty() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"footer":[]}}"#);
    });

    let site = signed_in_site(&server);
    assert!(site.start().await.is_empty());
}

#[tokio::test]
async fn create_uploads_multipart_and_invalidates() {
    let server = MockServer::start_async().await;
    let catalog = server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(CATALOG);
    });
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/admin/assets")
            .header("authorization", "Bearer tok-admin")
            .body_includes("name=\"key\"")
            .body_includes("partner-kaera")
            .body_includes("name=\"image\"; filename=\"kaera.svg\"");
        then.status(201)
            .header("content-type", "application/json")
            .body(SAVED_ASSET);
    });

    let site = signed_in_site(&server);
    site.start().await;

    let mut form = AssetForm::new("partner-kaera", AssetCategory::Partner, "Kaera");
    form.sort_order = 4;
    form.image = Some(ImageUpload::new("kaera.svg", b"<svg/>".to_vec()));
    let created = site.assets.create(form).await.expect("created");
    assert_eq!(created.id, 7);
    assert!(site.assets.cached().is_none());

    site.assets.load_all().await;
    create.assert();
    catalog.assert_calls(2);
}

#[tokio::test]
async fn update_tunnels_put_through_post() {
    let server = MockServer::start_async().await;
    let update = server.mock(|when, then| {
        when.method("POST")
            .path("/api/admin/assets/7")
            .body_includes("name=\"_method\"")
            .body_includes("PUT")
            .body_includes("name=\"is_active\"");
        then.status(200)
            .header("content-type", "application/json")
            .body(SAVED_ASSET);
    });

    let site = signed_in_site(&server);
    let form = AssetForm::new("partner-kaera", AssetCategory::Partner, "Kaera");
    site.assets.update(7, form).await.expect("updated");
    update.assert();
}

#[tokio::test]
async fn rejected_mutation_surfaces_message_and_keeps_cache() {
    let server = MockServer::start_async().await;
    let catalog = server.mock(|when, then| {
        when.method("GET").path("/api/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(CATALOG);
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/assets/4");
        then.status(422)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Cet asset est utilisé."}"#);
    });

    let site = signed_in_site(&server);
    let before = site.start().await;

    let err = site.assets.delete(4).await.expect_err("rejected");
    assert!(matches!(err, ApiError::Rejected { .. }));
    assert_eq!(err.user_message(), "Cet asset est utilisé.");

    let after = site.assets.cached().expect("still cached");
    assert!(Arc::ptr_eq(&before, &after));
    delete.assert();
    catalog.assert_calls(1);
}

#[tokio::test]
async fn toggle_and_reorder_hit_their_endpoints() {
    let server = MockServer::start_async().await;
    let toggle = server.mock(|when, then| {
        when.method("PATCH").path("/api/admin/assets/5/toggle");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"id":5,"key":"partner-anac","category":"partner","label":"ANAC","url":null,"alt_text":null,"sort_order":2,"is_active":false}}"#);
    });
    let reorder = server.mock(|when, then| {
        when.method("PATCH")
            .path("/api/admin/assets/reorder")
            .json_body_includes(r#"{"items":[{"id":6,"sort_order":1},{"id":4,"sort_order":2}]}"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Ordre mis à jour"}"#);
    });

    let site = signed_in_site(&server);
    let toggled = site.assets.toggle(5).await.expect("toggled");
    assert!(!toggled.is_active);

    site.assets
        .reorder(vec![
            ReorderItem { id: 6, sort_order: 1 },
            ReorderItem { id: 4, sort_order: 2 },
        ])
        .await
        .expect("reordered");

    toggle.assert();
    reorder.assert();
}

#[tokio::test]
async fn admin_list_includes_inactive_assets() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method("GET").path("/api/admin/assets");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":[
                {"id":1,"key":"logo-main","category":"logo","label":"Logo","url":null,"alt_text":null,"sort_order":0,"is_active":true},
                {"id":9,"key":"partner-old","category":"partner","label":"Ancien","url":null,"alt_text":null,"sort_order":9,"is_active":false}
            ]}"#);
    });

    let site = signed_in_site(&server);
    let assets = site.assets.admin_list().await.expect("listed");
    assert_eq!(assets.len(), 2);
    assert!(assets.iter().any(|asset| !asset.is_active));
}
