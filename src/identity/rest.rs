//! ZITADEL REST Client
//!
//! Native REST implementation of [`IdentityService`] on top of the ZITADEL
//! HTTP gateway. Uses reqwest for HTTP requests and a personal access token
//! for authentication.
//!
//! This implementation:
//! - Talks to the v2 user/organization services, the v2beta project and
//!   application services, and the v1 admin API for identity providers
//! - Maps error bodies (`{"code": <grpc code>, "message": ...}`) to [`ErrorCode`]
//!
//! References:
//! - [ZITADEL APIs](https://zitadel.com/docs/apis/introduction)

use super::{
    Application, CreateApplication, CreateHumanUser, CreateProject, CreatedApplication, ErrorCode,
    GenericOidcProvider, IdentityError, IdentityProvider, IdentityService, OidcSettings,
    Organization, Project, SecretString, UpdateApplication, UpdateHumanUser,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, HOST};
use reqwest::{Client, Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use zeroize::Zeroizing;

const EQUALS_FILTER: &str = "TEXT_FILTER_METHOD_EQUALS";
const EQUALS_QUERY: &str = "TEXT_QUERY_METHOD_EQUALS";
const IDP_OWNER_TYPE_SYSTEM: &str = "IDP_OWNER_TYPE_SYSTEM";

/// Connection parameters of the REST client
#[derive(Clone)]
pub struct RestClientConfig {
    /// Scheme, host and port, e.g. `http://zitadel:8080`
    pub base_url: String,
    pub token: SecretString,
    /// Sent as `Host` header when the instance is reached through another name
    pub external_domain: Option<String>,
    pub skip_verify_tls: bool,
    pub timeout: Duration,
}

impl std::fmt::Debug for RestClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientConfig")
            .field("base_url", &self.base_url)
            .field("external_domain", &self.external_domain)
            .field("skip_verify_tls", &self.skip_verify_tls)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// ZITADEL REST client
pub struct ZitadelRestClient {
    http_client: Client,
    base_url: String,
    token: Zeroizing<String>,
}

impl std::fmt::Debug for ZitadelRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZitadelRestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Wire format
// ============================================================================
// The gateway speaks camelCase JSON. Only the fields the bootstrap run reads
// are modelled; unknown fields are ignored.
// ============================================================================

/// Error body returned by the gateway
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOrganizationsRequest {
    queries: Vec<OrganizationQuery>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationQuery {
    default_query: Empty,
}

#[derive(Debug, Serialize)]
#[expect(clippy::empty_structs_with_brackets, reason = "serializes as {} instead of null")]
struct Empty {}

#[derive(Debug, Deserialize)]
struct ListOrganizationsResponse {
    #[serde(default)]
    result: Vec<OrganizationBody>,
}

#[derive(Debug, Deserialize)]
struct OrganizationBody {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectRequest<'a> {
    organization_id: &'a str,
    id: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateProjectResponse {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListProjectsRequest<'a> {
    filters: Vec<ProjectFilter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum ProjectFilter<'a> {
    ProjectNameFilter {
        #[serde(rename = "projectName")]
        project_name: &'a str,
        method: &'static str,
    },
    ProjectOrganizationIdFilter {
        #[serde(rename = "organizationId")]
        organization_id: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct ListProjectsResponse {
    #[serde(default)]
    projects: Vec<ProjectBody>,
}

#[derive(Debug, Deserialize)]
struct GetProjectResponse {
    project: ProjectBody,
}

#[derive(Debug, Deserialize)]
struct ProjectBody {
    id: String,
    #[serde(default)]
    name: String,
}

impl From<ProjectBody> for Project {
    fn from(body: ProjectBody) -> Self {
        Self {
            id: body.id,
            name: body.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateApplicationRequest<'a> {
    project_id: &'a str,
    id: &'a str,
    name: &'a str,
    oidc_request: OidcRequest<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OidcRequest<'a> {
    redirect_uris: &'a [String],
    post_logout_redirect_uris: &'a [String],
    response_types: [&'static str; 1],
    grant_types: [&'static str; 1],
    app_type: &'static str,
    auth_method_type: &'static str,
    access_token_type: &'static str,
    version: &'static str,
}

impl<'a> OidcRequest<'a> {
    fn new(oidc: &'a OidcSettings) -> Self {
        Self {
            redirect_uris: &oidc.redirect_uris,
            post_logout_redirect_uris: &oidc.post_logout_redirect_uris,
            response_types: [OidcSettings::RESPONSE_TYPE],
            grant_types: [OidcSettings::GRANT_TYPE],
            app_type: OidcSettings::APP_TYPE,
            auth_method_type: OidcSettings::AUTH_METHOD_TYPE,
            access_token_type: OidcSettings::ACCESS_TOKEN_TYPE,
            version: OidcSettings::VERSION,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateApplicationResponse {
    app_id: String,
    #[serde(default)]
    oidc_response: Option<OidcResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OidcResponse {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
}

impl std::fmt::Debug for OidcResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcResponse")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListApplicationsRequest<'a> {
    project_id: &'a str,
    filters: Vec<ApplicationFilter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationFilter<'a> {
    name_filter: NameFilter<'a>,
}

#[derive(Debug, Serialize)]
struct NameFilter<'a> {
    name: &'a str,
    method: &'static str,
}

#[derive(Debug, Deserialize)]
struct ListApplicationsResponse {
    #[serde(default)]
    applications: Vec<ApplicationBody>,
}

#[derive(Debug, Deserialize)]
struct GetApplicationResponse {
    app: ApplicationBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationBody {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    oidc_config: Option<OidcConfigBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OidcConfigBody {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    redirect_uris: Vec<String>,
    #[serde(default)]
    post_logout_redirect_uris: Vec<String>,
}

impl From<ApplicationBody> for Application {
    fn from(body: ApplicationBody) -> Self {
        let oidc = body.oidc_config.unwrap_or_default();
        Self {
            id: body.id,
            name: body.name,
            client_id: oidc.client_id.filter(|id| !id.is_empty()),
            redirect_uris: oidc.redirect_uris,
            post_logout_redirect_uris: oidc.post_logout_redirect_uris,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateApplicationRequest<'a> {
    project_id: &'a str,
    oidc_configuration_request: OidcConfigurationRequest<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OidcConfigurationRequest<'a> {
    redirect_uris: &'a [String],
    post_logout_redirect_uris: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateClientSecretRequest<'a> {
    project_id: &'a str,
    is_oidc: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateClientSecretResponse {
    client_secret: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    organization_id: &'a str,
    user_id: &'a str,
    username: &'a str,
    human: HumanRequest<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HumanRequest<'a> {
    profile: ProfileBody<'a>,
    email: EmailBody<'a>,
    password: PasswordBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody<'a> {
    given_name: &'a str,
    family_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailBody<'a> {
    email: &'a str,
    is_verified: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody<'a> {
    password: &'a str,
    change_required: bool,
}

#[derive(Debug, Deserialize)]
struct CreateUserResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct ListUsersRequest<'a> {
    queries: Vec<UserQuery<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery<'a> {
    user_name_query: UserNameQuery<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserNameQuery<'a> {
    user_name: &'a str,
    method: &'static str,
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
    #[serde(default)]
    result: Vec<UserBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserBody {
    user_id: String,
}

#[derive(Debug, Serialize)]
struct UpdateUserRequest<'a> {
    username: &'a str,
    human: UpdateHumanRequest<'a>,
}

#[derive(Debug, Serialize)]
struct UpdateHumanRequest<'a> {
    profile: ProfileBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListProvidersRequest<'a> {
    queries: Vec<ProviderQuery<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderQuery<'a> {
    idp_name_query: NameFilter<'a>,
}

#[derive(Debug, Deserialize)]
struct ListProvidersResponse {
    #[serde(default)]
    result: Vec<ProviderBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderBody {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenericOidcProviderRequest<'a> {
    name: &'a str,
    issuer: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    scopes: &'a [String],
    provider_options: ProviderOptions,
    is_id_token_mapping: bool,
}

impl<'a> GenericOidcProviderRequest<'a> {
    fn new(provider: &'a GenericOidcProvider) -> Self {
        Self {
            name: &provider.name,
            issuer: &provider.issuer,
            client_id: &provider.client_id,
            client_secret: provider.client_secret.expose(),
            scopes: &provider.scopes,
            provider_options: ProviderOptions::default(),
            is_id_token_mapping: false,
        }
    }
}

/// Federated users may link to and be created from the provider
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[expect(clippy::struct_excessive_bools, reason = "mirrors the API options")]
struct ProviderOptions {
    is_linking_allowed: bool,
    is_creation_allowed: bool,
    is_auto_creation: bool,
    is_auto_update: bool,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            is_linking_allowed: true,
            is_creation_allowed: true,
            is_auto_creation: true,
            is_auto_update: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddProviderResponse {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddLoginPolicyProviderRequest<'a> {
    idp_id: &'a str,
    owner_type: &'static str,
}

// ============================================================================
// Client
// ============================================================================

impl ZitadelRestClient {
    /// Build a client. No request is sent.
    pub fn new(config: RestClientConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();
        if let Some(domain) = config.external_domain.as_deref().filter(|d| !d.is_empty()) {
            let value = HeaderValue::from_str(domain).map_err(|e| IdentityError::InvalidResponse {
                operation: "build client",
                reason: format!("invalid external domain '{domain}': {e}"),
            })?;
            headers.insert(HOST, value);
        }

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.skip_verify_tls)
            .use_rustls_tls()
            .build()
            .map_err(|source| IdentityError::Transport {
                operation: "build client",
                source,
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Zeroizing::new(config.token.expose().to_string()),
        })
    }

    async fn call<B, T>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, IdentityError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let span = info_span!("zitadel.request", operation, http.method = %method, http.path = path);

        async move {
            let mut request = self
                .http_client
                .request(method, &url)
                .bearer_auth(self.token.as_str());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|source| IdentityError::Transport { operation, source })?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let error = error_from_body(operation, status, &text);
                debug!(status = status.as_u16(), error = %error, "ZITADEL request failed");
                return Err(error);
            }

            response
                .json::<T>()
                .await
                .map_err(|e| IdentityError::InvalidResponse {
                    operation,
                    reason: e.to_string(),
                })
        }
        .instrument(span)
        .await
    }
}

/// Turn a non-success response into an [`IdentityError::Api`]
fn error_from_body(operation: &'static str, status: StatusCode, text: &str) -> IdentityError {
    let parsed = serde_json::from_str::<ErrorBody>(text).ok();
    let code = parsed
        .as_ref()
        .and_then(|body| body.code)
        .map_or_else(|| ErrorCode::from_http_status(status), ErrorCode::from_grpc);
    let message = parsed
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), text.trim()));
    IdentityError::Api {
        operation,
        code,
        message,
    }
}

#[async_trait]
impl IdentityService for ZitadelRestClient {
    async fn default_organization(&self) -> Result<Option<Organization>, IdentityError> {
        let request = ListOrganizationsRequest {
            queries: vec![OrganizationQuery {
                default_query: Empty {},
            }],
        };
        let response: ListOrganizationsResponse = self
            .call(
                "list organizations",
                Method::POST,
                "/v2/organizations/_search",
                Some(&request),
            )
            .await?;
        Ok(response.result.into_iter().next().map(|org| Organization {
            id: org.id,
            name: org.name,
        }))
    }

    async fn create_project(&self, request: &CreateProject) -> Result<Project, IdentityError> {
        let body = CreateProjectRequest {
            organization_id: &request.organization_id,
            id: &request.project_id,
            name: &request.name,
        };
        let response: CreateProjectResponse = self
            .call("create project", Method::POST, "/v2beta/projects", Some(&body))
            .await?;
        Ok(Project {
            id: response.id,
            name: request.name.clone(),
        })
    }

    async fn list_projects(
        &self,
        organization_id: &str,
        name: &str,
    ) -> Result<Vec<Project>, IdentityError> {
        let body = ListProjectsRequest {
            filters: vec![
                ProjectFilter::ProjectNameFilter {
                    project_name: name,
                    method: EQUALS_FILTER,
                },
                ProjectFilter::ProjectOrganizationIdFilter { organization_id },
            ],
        };
        let response: ListProjectsResponse = self
            .call("list projects", Method::POST, "/v2beta/projects/search", Some(&body))
            .await?;
        Ok(response.projects.into_iter().map(Project::from).collect())
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, IdentityError> {
        let response: GetProjectResponse = self
            .call::<Empty, _>(
                "get project",
                Method::GET,
                &format!("/v2beta/projects/{project_id}"),
                None,
            )
            .await?;
        Ok(response.project.into())
    }

    async fn create_application(
        &self,
        request: &CreateApplication,
    ) -> Result<CreatedApplication, IdentityError> {
        let body = CreateApplicationRequest {
            project_id: &request.project_id,
            id: &request.application_id,
            name: &request.name,
            oidc_request: OidcRequest::new(&request.oidc),
        };
        let response: CreateApplicationResponse = self
            .call(
                "create application",
                Method::POST,
                "/v2beta/applications",
                Some(&body),
            )
            .await?;

        let oidc = response
            .oidc_response
            .ok_or_else(|| IdentityError::InvalidResponse {
                operation: "create application",
                reason: "no oidc response found in application creation response".to_string(),
            })?;

        Ok(CreatedApplication {
            application_id: response.app_id,
            client_id: oidc.client_id.filter(|id| !id.is_empty()),
            client_secret: oidc
                .client_secret
                .filter(|secret| !secret.is_empty())
                .map(SecretString::from),
        })
    }

    async fn list_applications(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Vec<Application>, IdentityError> {
        let body = ListApplicationsRequest {
            project_id,
            filters: vec![ApplicationFilter {
                name_filter: NameFilter {
                    name,
                    method: EQUALS_FILTER,
                },
            }],
        };
        let response: ListApplicationsResponse = self
            .call(
                "list applications",
                Method::POST,
                "/v2beta/applications/search",
                Some(&body),
            )
            .await?;
        Ok(response
            .applications
            .into_iter()
            .map(Application::from)
            .collect())
    }

    async fn get_application(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<Application, IdentityError> {
        let response: GetApplicationResponse = self
            .call::<Empty, _>(
                "get application",
                Method::GET,
                &format!("/v2beta/applications/{application_id}?projectId={project_id}"),
                None,
            )
            .await?;
        Ok(response.app.into())
    }

    async fn update_application(&self, request: &UpdateApplication) -> Result<(), IdentityError> {
        let body = UpdateApplicationRequest {
            project_id: &request.project_id,
            oidc_configuration_request: OidcConfigurationRequest {
                redirect_uris: &request.oidc.redirect_uris,
                post_logout_redirect_uris: &request.oidc.post_logout_redirect_uris,
            },
        };
        let _: IgnoredAny = self
            .call(
                "update application",
                Method::PATCH,
                &format!("/v2beta/applications/{}", request.application_id),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn regenerate_client_secret(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<SecretString, IdentityError> {
        let body = GenerateClientSecretRequest {
            project_id,
            is_oidc: true,
        };
        let response: GenerateClientSecretResponse = self
            .call(
                "regenerate client secret",
                Method::POST,
                &format!("/v2beta/applications/{application_id}/generate_client_secret"),
                Some(&body),
            )
            .await?;
        Ok(SecretString::from(response.client_secret))
    }

    async fn create_human_user(&self, request: &CreateHumanUser) -> Result<String, IdentityError> {
        let body = CreateUserRequest {
            organization_id: &request.organization_id,
            user_id: &request.user_id,
            username: &request.username,
            human: HumanRequest {
                profile: ProfileBody {
                    given_name: &request.given_name,
                    family_name: &request.family_name,
                },
                email: EmailBody {
                    email: &request.email,
                    is_verified: true,
                },
                password: PasswordBody {
                    password: request.password.expose(),
                    change_required: request.password_change_required,
                },
            },
        };
        let response: CreateUserResponse = self
            .call("create user", Method::POST, "/v2/users/new", Some(&body))
            .await?;
        Ok(response.id)
    }

    async fn find_user_ids(&self, username: &str) -> Result<Vec<String>, IdentityError> {
        let body = ListUsersRequest {
            queries: vec![UserQuery {
                user_name_query: UserNameQuery {
                    user_name: username,
                    method: EQUALS_QUERY,
                },
            }],
        };
        let response: ListUsersResponse = self
            .call("list users", Method::POST, "/v2/users", Some(&body))
            .await?;
        Ok(response.result.into_iter().map(|user| user.user_id).collect())
    }

    async fn update_human_user(&self, request: &UpdateHumanUser) -> Result<(), IdentityError> {
        let body = UpdateUserRequest {
            username: &request.username,
            human: UpdateHumanRequest {
                profile: ProfileBody {
                    given_name: &request.given_name,
                    family_name: &request.family_name,
                },
            },
        };
        let _: IgnoredAny = self
            .call(
                "update user",
                Method::PATCH,
                &format!("/v2/users/{}", request.user_id),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn list_identity_providers(
        &self,
        name: &str,
    ) -> Result<Vec<IdentityProvider>, IdentityError> {
        let body = ListProvidersRequest {
            queries: vec![ProviderQuery {
                idp_name_query: NameFilter {
                    name,
                    method: EQUALS_QUERY,
                },
            }],
        };
        let response: ListProvidersResponse = self
            .call(
                "list identity providers",
                Method::POST,
                "/admin/v1/idps/templates/_search",
                Some(&body),
            )
            .await?;
        Ok(response
            .result
            .into_iter()
            .map(|idp| IdentityProvider { id: idp.id })
            .collect())
    }

    async fn add_generic_oidc_provider(
        &self,
        provider: &GenericOidcProvider,
    ) -> Result<String, IdentityError> {
        let response: AddProviderResponse = self
            .call(
                "add identity provider",
                Method::POST,
                "/admin/v1/idps/generic_oidc",
                Some(&GenericOidcProviderRequest::new(provider)),
            )
            .await?;
        Ok(response.id)
    }

    async fn update_generic_oidc_provider(
        &self,
        provider_id: &str,
        provider: &GenericOidcProvider,
    ) -> Result<(), IdentityError> {
        let _: IgnoredAny = self
            .call(
                "update identity provider",
                Method::PUT,
                &format!("/admin/v1/idps/generic_oidc/{provider_id}"),
                Some(&GenericOidcProviderRequest::new(provider)),
            )
            .await?;
        Ok(())
    }

    async fn add_provider_to_login_policy(&self, provider_id: &str) -> Result<(), IdentityError> {
        let body = AddLoginPolicyProviderRequest {
            idp_id: provider_id,
            owner_type: IDP_OWNER_TYPE_SYSTEM,
        };
        let _: IgnoredAny = self
            .call(
                "add identity provider to login policy",
                Method::POST,
                "/admin/v1/policies/login/idps",
                Some(&body),
            )
            .await?;
        Ok(())
    }
}
