//! ZITADEL REST client against a mock HTTP gateway.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zitadel_init::identity::{
    is_no_op_update, ConflictSignals, CreateApplication, CreateProject, ErrorCode,
    IdentityError, IdentityService, OidcSettings, ResourceKind, RestClientConfig, SecretString,
    UpdateApplication, UpdateHumanUser, ZitadelRestClient,
};
use zitadel_init::runtime::initialization::install_crypto_provider;

const PAT: &str = "test-pat";
const EXTERNAL_DOMAIN: &str = "auth.example.com";

// =============================================================================
// Test Helpers
// =============================================================================

fn client(server: &MockServer) -> ZitadelRestClient {
    install_crypto_provider();
    ZitadelRestClient::new(RestClientConfig {
        base_url: server.uri(),
        token: SecretString::from(PAT),
        external_domain: Some(EXTERNAL_DOMAIN.to_string()),
        skip_verify_tls: false,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn oidc(redirect_uri: &str) -> OidcSettings {
    OidcSettings {
        redirect_uris: vec![redirect_uri.to_string()],
        post_logout_redirect_uris: Vec::new(),
    }
}

fn create_application_request() -> CreateApplication {
    CreateApplication {
        project_id: "p1".to_string(),
        application_id: "app1".to_string(),
        name: "demo-app".to_string(),
        oidc: oidc("https://a/cb"),
    }
}

fn grpc_error(status: u16, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "code": code,
        "message": message,
        "details": [],
    }))
}

// =============================================================================
// Request Tests
// =============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token_and_host_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2beta/projects"))
        .and(header("authorization", "Bearer test-pat"))
        .and(header("host", EXTERNAL_DOMAIN))
        .and(body_partial_json(json!({
            "organizationId": "org-1",
            "id": "p1",
            "name": "demo",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "creationDate": "2025-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = client(&server)
        .create_project(&CreateProject {
            organization_id: "org-1".to_string(),
            project_id: "p1".to_string(),
            name: "demo".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(project.id, "p1");
    assert_eq!(project.name, "demo");
}

#[tokio::test]
async fn test_default_organization_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/organizations/_search"))
        .and(body_partial_json(json!({"queries": [{"defaultQuery": {}}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "details": {"totalResult": "1"},
            "result": [{"id": "org-1", "name": "ZITADEL", "state": "ORGANIZATION_STATE_ACTIVE"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let organization = client(&server).default_organization().await.unwrap().unwrap();

    assert_eq!(organization.id, "org-1");
    assert_eq!(organization.name, "ZITADEL");
}

#[tokio::test]
async fn test_create_application_returns_issued_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2beta/applications"))
        .and(body_partial_json(json!({
            "projectId": "p1",
            "id": "app1",
            "oidcRequest": {
                "redirectUris": ["https://a/cb"],
                "authMethodType": "OIDC_AUTH_METHOD_TYPE_POST",
                "appType": "OIDC_APP_TYPE_WEB",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appId": "app-2",
            "oidcResponse": {"clientId": "app-2@p1", "clientSecret": "issued"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_application(&create_application_request())
        .await
        .unwrap();

    assert_eq!(created.application_id, "app-2");
    assert_eq!(created.client_id.as_deref(), Some("app-2@p1"));
    assert_eq!(created.client_secret.unwrap().expose(), "issued");
}

#[tokio::test]
async fn test_create_application_without_oidc_response_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2beta/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appId": "app1"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_application(&create_application_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IdentityError::InvalidResponse {
            operation: "create application",
            ..
        }
    ));
}

#[tokio::test]
async fn test_get_application_reads_oidc_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2beta/applications/app1"))
        .and(query_param("projectId", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app": {
                "id": "app1",
                "name": "demo-app",
                "oidcConfig": {
                    "clientId": "app1@p1",
                    "redirectUris": ["https://a/cb"],
                    "postLogoutRedirectUris": ["https://console/"],
                },
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let application = client(&server).get_application("p1", "app1").await.unwrap();

    assert_eq!(application.client_id.as_deref(), Some("app1@p1"));
    assert_eq!(application.redirect_uris, vec!["https://a/cb"]);
    assert_eq!(application.post_logout_redirect_uris, vec!["https://console/"]);
}

#[tokio::test]
async fn test_find_user_ids_by_exact_username() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/users"))
        .and(body_partial_json(json!({
            "queries": [{
                "userNameQuery": {
                    "userName": "admin@example.com",
                    "method": "TEXT_QUERY_METHOD_EQUALS",
                },
            }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "details": {"totalResult": "1"},
            "result": [{"userId": "228731466716839938", "username": "admin@example.com"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client(&server).find_user_ids("admin@example.com").await.unwrap();

    assert_eq!(ids, vec!["228731466716839938"]);
}

#[tokio::test]
async fn test_update_user_is_addressed_by_id_and_ignores_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/users/228731466716839938"))
        .and(body_partial_json(json!({
            "username": "admin@example.com",
            "human": {"profile": {"givenName": "Admin", "familyName": "User"}},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "details": {"sequence": "12", "changeDate": "2025-01-01T00:00:00Z"},
            "emailCode": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_human_user(&UpdateHumanUser {
            user_id: "228731466716839938".to_string(),
            username: "admin@example.com".to_string(),
            given_name: "Admin".to_string(),
            family_name: "User".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_identity_providers_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/v1/idps/templates/_search"))
        .and(body_partial_json(json!({
            "queries": [{"idpNameQuery": {"name": "github", "method": "TEXT_QUERY_METHOD_EQUALS"}}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": "idp-1", "name": "github", "type": "IDP_TYPE_OIDC"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let providers = client(&server).list_identity_providers("github").await.unwrap();

    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].id, "idp-1");
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_already_exists_code_is_a_conflict_signal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2beta/projects"))
        .respond_with(grpc_error(409, 6, "Project already exists (PROJECT-3M9sd)"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_project(&CreateProject {
            organization_id: "org-1".to_string(),
            project_id: "p1".to_string(),
            name: "demo".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::AlreadyExists));
    assert_eq!(err.message(), "Project already exists (PROJECT-3M9sd)");
    assert!(ConflictSignals::zitadel().is_conflict(ResourceKind::Project, &err));
}

#[tokio::test]
async fn test_no_changes_answer_is_a_no_op_update() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v2beta/applications/app1"))
        .and(body_partial_json(json!({
            "projectId": "p1",
            "oidcConfigurationRequest": {"redirectUris": ["https://a/cb"]},
        })))
        .respond_with(grpc_error(400, 9, "No changes (COMMAND-1m88i)"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .update_application(&UpdateApplication {
            project_id: "p1".to_string(),
            application_id: "app1".to_string(),
            oidc: oidc("https://a/cb"),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::FailedPrecondition));
    assert!(is_no_op_update(&err));
}

#[tokio::test]
async fn test_error_without_grpc_code_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2beta/projects/p1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client(&server).get_project("p1").await.unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::Unavailable));
    assert_eq!(err.message(), "HTTP 503: upstream unavailable");
}
