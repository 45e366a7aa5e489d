//! Integration tests for entity configuration listing and loading.

mod helpers;

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use marketdesk_core::config::EntityConfigSettings;
use marketdesk_core::traits::EntityApi;
use marketdesk_entity::user::{CurrentUser, UserRole};
use marketdesk_service::entity_config::{EntityApiConfigSource, StaticUserSource};
use marketdesk_service::{EntityConfigProvider, LoadPhase, use_entity_configs};

use helpers::TestApp;

fn seed_configs(app: &TestApp) {
    let records = [
        json!({"entity_name": "Watchlist", "enabled": true, "user_visible": true, "admin_visible": true}),
        json!({"entity_name": "Notification", "enabled": true, "user_visible": false, "admin_visible": true}),
        json!({"entity_name": "Portfolio", "enabled": false, "user_visible": true}),
        json!({"enabled": true}),
    ];
    app.store.seed(
        "EntityConfig",
        records.into_iter().filter_map(|r| r.as_object().cloned()),
    );
}

#[tokio::test]
async fn test_list_configs_endpoint_skips_malformed() {
    let app = TestApp::new();
    seed_configs(&app);

    let response = app.get("/api/entity-configs").await;
    assert!(response.success());
    assert_eq!(response.body["count"], 3);
    assert_eq!(response.data()[0]["entity_name"], "Watchlist");
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();
    let response = app.get("/api/health").await;
    assert!(response.success());
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}

#[tokio::test(start_paused = true)]
async fn test_admin_provider_loads_from_store() {
    let app = TestApp::new();
    seed_configs(&app);
    let api: Arc<dyn EntityApi> = Arc::new(app.store.clone());

    let provider = EntityConfigProvider::mount(
        Arc::new(StaticUserSource(Some(CurrentUser::new(
            Uuid::new_v4(),
            UserRole::Admin,
        )))),
        Arc::new(EntityApiConfigSource::new(api)),
        EntityConfigSettings::default(),
    );

    let state = provider.loaded().await;
    assert_eq!(state.phase, LoadPhase::Loaded);

    let view = use_entity_configs(Some(&provider));
    assert_eq!(view.configs().len(), 3);
    assert_eq!(view.enabled_configs().len(), 2);
    assert_eq!(view.user_visible_configs().len(), 1);
    assert_eq!(view.admin_visible_configs().len(), 2);
    assert!(view.config_by_entity_name("Portfolio").is_some());
    assert!(view.config_by_entity_name("Orders").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_regular_user_provider_stays_empty() {
    let app = TestApp::new();
    seed_configs(&app);
    let api: Arc<dyn EntityApi> = Arc::new(app.store.clone());

    let provider = EntityConfigProvider::mount(
        Arc::new(StaticUserSource(Some(CurrentUser::new(
            Uuid::new_v4(),
            UserRole::User,
        )))),
        Arc::new(EntityApiConfigSource::new(api)),
        EntityConfigSettings::default(),
    );

    let view = use_entity_configs(Some(&provider));
    provider.loaded().await;
    let view_after = use_entity_configs(Some(&provider));

    assert!(view.configs().is_empty());
    assert!(view_after.configs().is_empty());
    assert!(!view_after.is_loading());
}
