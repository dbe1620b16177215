// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! REST gateway backend.
//!
//! Talks to a hosted PostgREST-style endpoint plus its authentication
//! subsystem. Every operation is one independent round trip returning
//! `{data, error}`; there is no cross-call transaction. Error bodies carry a
//! `code` field which is translated into the gateway error taxonomy so that
//! optional-schema failures (`42703` undefined column, `42P01` undefined
//! table) stay distinguishable from real faults.

use crate::error::GatewayError;
use crate::rows::{
    AccountRow, EventPatch, EventRow, EventStatusSummary, MemberPatch, NewAccount, NewEvent,
    NewOrganization, NewOrganizationMember, NewStudent, NewStudentEvent, OrganizationMemberRow,
    OrganizationRow, StudentDirectoryRow, StudentEventRow, StudentPatch, StudentRow,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Connection settings for the REST backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the hosted backend, without a trailing slash.
    pub base_url: String,
    /// The anonymous API key sent with every request.
    pub api_key: String,
    /// The privileged key required for the authentication admin surface.
    pub service_role_key: Option<String>,
}

/// The REST backend.
#[derive(Debug)]
pub struct RestBackend {
    http: Client,
    config: GatewayConfig,
}

/// Shape of a PostgREST error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StudentIdOnly {
    student_id: i64,
}

#[derive(Debug, Deserialize)]
struct EventIdOnly {
    event_id: i64,
}

#[derive(Debug, Deserialize)]
struct OrgTitleWire {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaderIdWire {
    #[serde(default)]
    leader_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StudentWithOrgWire {
    id: i64,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    student_number: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    organization_id: Option<i64>,
    #[serde(default)]
    organizations: Option<OrgTitleWire>,
}

#[derive(Debug, Deserialize)]
struct StatusOnlyWire {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventStatsWire {
    id: i64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    student_events: Vec<StatusOnlyWire>,
}

#[derive(Debug, Deserialize)]
struct AdminUserWire {
    id: String,
    #[serde(default)]
    email: Option<String>,
    created_at: String,
    #[serde(default)]
    user_metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct AdminUserListWire {
    #[serde(default)]
    users: Vec<AdminUserWire>,
}

impl AdminUserWire {
    fn into_account(self) -> AccountRow {
        let full_name: Option<String> = self
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("full_name"))
            .and_then(|v| v.as_str())
            .map(ToString::to_string);
        let role_id: Option<i64> = self
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("role"))
            .and_then(serde_json::Value::as_i64);
        AccountRow {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
            full_name,
            role_id,
        }
    }
}

impl RestBackend {
    /// Creates a new REST backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP
    /// client cannot be constructed.
    pub fn connect(mut config: GatewayConfig) -> Result<Self, GatewayError> {
        if config.base_url.is_empty() {
            return Err(GatewayError::Configuration(String::from(
                "base_url must not be empty",
            )));
        }
        if config.api_key.is_empty() {
            return Err(GatewayError::Configuration(String::from(
                "api_key must not be empty",
            )));
        }
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }
        let http: Client = Client::builder()
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url)
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/auth/v1/admin/{path}", self.config.base_url)
    }

    fn data_key(&self) -> &str {
        self.config
            .service_role_key
            .as_deref()
            .unwrap_or(&self.config.api_key)
    }

    fn admin_key(&self) -> Result<&str, GatewayError> {
        self.config
            .service_role_key
            .as_deref()
            .ok_or_else(|| {
                GatewayError::Configuration(String::from(
                    "service_role_key is required for account administration",
                ))
            })
    }

    fn with_data_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.data_key()))
    }

    fn with_admin_auth(&self, builder: RequestBuilder) -> Result<RequestBuilder, GatewayError> {
        let key: &str = self.admin_key()?;
        Ok(builder
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {key}")))
    }

    /// Checks a response status and translates error bodies.
    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status: u16 = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let body: String = response.text().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or(ErrorBody {
            code: None,
            message: None,
        });
        let message: String = parsed.message.unwrap_or(body);
        match parsed.code.as_deref() {
            Some("42703") => Err(GatewayError::MissingColumn(extract_quoted(
                &message, "column",
            ))),
            Some("42P01") => Err(GatewayError::MissingTable(extract_quoted(
                &message, "relation",
            ))),
            Some("PGRST116") => Err(GatewayError::RowNotFound),
            _ => Err(GatewayError::Http { status, message }),
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;
        Self::json(Self::check(response).await?).await
    }

    async fn first_row<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, GatewayError> {
        let mut rows: Vec<T> = Self::json(Self::check(response).await?).await?;
        if rows.is_empty() {
            return Err(GatewayError::RowNotFound);
        }
        Ok(rows.swap_remove(0))
    }

    // ---- students ----

    pub async fn list_students(&self) -> Result<Vec<StudentRow>, GatewayError> {
        self.fetch_rows(
            "students",
            &[("select", "*"), ("order", "full_name.asc")],
        )
        .await
    }

    pub async fn list_students_with_organization(
        &self,
    ) -> Result<Vec<StudentDirectoryRow>, GatewayError> {
        let rows: Vec<StudentWithOrgWire> = self
            .fetch_rows(
                "students",
                &[
                    (
                        "select",
                        "id,full_name,student_number,email,status,organization_id,organizations(title)",
                    ),
                    ("order", "full_name.asc"),
                ],
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| StudentDirectoryRow {
                id: r.id,
                full_name: r.full_name,
                student_number: r.student_number,
                email: r.email,
                status: r.status,
                organization_id: r.organization_id,
                organization_title: r.organizations.and_then(|o| o.title),
            })
            .collect())
    }

    pub async fn insert_student(&self, new: NewStudent) -> Result<StudentRow, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("students")))
            .header("Prefer", "return=representation")
            .json(&vec![new])
            .send()
            .await?;
        Self::first_row(response).await
    }

    pub async fn update_student_status(
        &self,
        student_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("students")))
            .query(&[("id", format!("eq.{student_id}"))])
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn find_student_by_account(
        &self,
        user_id: &str,
    ) -> Result<Option<StudentRow>, GatewayError> {
        let filter: String = format!("eq.{user_id}");
        let mut rows: Vec<StudentRow> = self
            .fetch_rows("students", &[("select", "*"), ("user_id", &filter)])
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    pub async fn update_student_by_account(
        &self,
        user_id: &str,
        patch: &StudentPatch,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("students")))
            .query(&[("user_id", format!("eq.{user_id}"))])
            .json(patch)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete_student_by_account(&self, user_id: &str) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("students")))
            .query(&[("user_id", format!("eq.{user_id}"))])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    // ---- organizations ----

    pub async fn list_organizations(&self) -> Result<Vec<OrganizationRow>, GatewayError> {
        self.fetch_rows(
            "organizations",
            &[
                ("select", "id,title,created_at,leader_id"),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }

    pub async fn insert_organization(
        &self,
        new: NewOrganization,
    ) -> Result<OrganizationRow, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("organizations")))
            .header("Prefer", "return=representation")
            .json(&vec![new])
            .send()
            .await?;
        Self::first_row(response).await
    }

    pub async fn update_organization(
        &self,
        organization_id: i64,
        patch: &NewOrganization,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("organizations")))
            .query(&[("id", format!("eq.{organization_id}"))])
            .json(patch)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete_organization(&self, organization_id: i64) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("organizations")))
            .query(&[("id", format!("eq.{organization_id}"))])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn count_organizations(&self) -> Result<u64, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.get(self.table_url("organizations")))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await?;
        let response: Response = Self::check(response).await?;
        let total: Option<u64> = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|v| v.parse::<u64>().ok());
        total.ok_or_else(|| {
            GatewayError::Decode(String::from("missing content-range header on count"))
        })
    }

    pub async fn assigned_leader_ids(&self) -> Result<Vec<String>, GatewayError> {
        let rows: Vec<LeaderIdWire> = self
            .fetch_rows(
                "organizations",
                &[("select", "leader_id"), ("leader_id", "not.is.null")],
            )
            .await?;
        Ok(rows.into_iter().filter_map(|r| r.leader_id).collect())
    }

    // ---- organization members ----

    pub async fn members_of_organization(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        let filter: String = format!("eq.{organization_id}");
        self.fetch_rows(
            "organization_members",
            &[
                (
                    "select",
                    "*,student:students(id,user_id,full_name,student_number,email)",
                ),
                ("organization_id", &filter),
                ("order", "joined_at.desc"),
            ],
        )
        .await
    }

    pub async fn memberships_of_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<OrganizationMemberRow>, GatewayError> {
        let filter: String = format!("eq.{student_id}");
        self.fetch_rows(
            "organization_members",
            &[
                ("select", "*,organization:organizations(id,title)"),
                ("student_id", &filter),
                ("order", "joined_at.desc"),
            ],
        )
        .await
    }

    pub async fn member_student_ids(
        &self,
        organization_id: i64,
    ) -> Result<Vec<i64>, GatewayError> {
        let filter: String = format!("eq.{organization_id}");
        let rows: Vec<StudentIdOnly> = self
            .fetch_rows(
                "organization_members",
                &[("select", "student_id"), ("organization_id", &filter)],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.student_id).collect())
    }

    pub async fn insert_member(&self, new: NewOrganizationMember) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("organization_members")))
            .json(&vec![new])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn update_member(
        &self,
        member_id: i64,
        patch: &MemberPatch,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("organization_members")))
            .query(&[("id", format!("eq.{member_id}"))])
            .json(patch)
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete_member(&self, member_id: i64) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("organization_members")))
            .query(&[("id", format!("eq.{member_id}"))])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    // ---- events ----

    pub async fn list_events(&self) -> Result<Vec<EventRow>, GatewayError> {
        self.fetch_rows("events", &[("select", "*"), ("order", "created_at.desc")])
            .await
    }

    pub async fn fetch_event(&self, event_id: i64) -> Result<Option<EventRow>, GatewayError> {
        let filter: String = format!("eq.{event_id}");
        let mut rows: Vec<EventRow> = self
            .fetch_rows("events", &[("select", "*"), ("id", &filter)])
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    pub async fn insert_event(&self, new: NewEvent) -> Result<EventRow, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("events")))
            .header("Prefer", "return=representation")
            .json(&vec![new])
            .send()
            .await?;
        Self::first_row(response).await
    }

    pub async fn update_event(
        &self,
        event_id: i64,
        patch: &EventPatch,
    ) -> Result<EventRow, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("events")))
            .query(&[("id", format!("eq.{event_id}"))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        Self::first_row(response).await
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("events")))
            .query(&[("id", format!("eq.{event_id}"))])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn set_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("events")))
            .query(&[("id", format!("eq.{event_id}"))])
            .json(&json!({ "organization_id": organization_id }))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn insert_event_organization(
        &self,
        event_id: i64,
        organization_id: i64,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("event_organizations")))
            .json(&vec![json!({
                "event_id": event_id,
                "organization_id": organization_id,
            })])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn junction_event_ids(
        &self,
        organization_id: i64,
    ) -> Result<Vec<i64>, GatewayError> {
        let filter: String = format!("eq.{organization_id}");
        let rows: Vec<EventIdOnly> = self
            .fetch_rows(
                "event_organizations",
                &[("select", "event_id"), ("organization_id", &filter)],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.event_id).collect())
    }

    pub async fn events_by_organization_column(
        &self,
        organization_id: i64,
    ) -> Result<Vec<EventRow>, GatewayError> {
        let filter: String = format!("eq.{organization_id}");
        self.fetch_rows(
            "events",
            &[
                ("select", "*"),
                ("organization_id", &filter),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }

    pub async fn events_with_registration_statuses(
        &self,
    ) -> Result<Vec<EventStatusSummary>, GatewayError> {
        let rows: Vec<EventStatsWire> = self
            .fetch_rows("events", &[("select", "id,date,student_events(status)")])
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| EventStatusSummary {
                event_id: r.id,
                date: r.date,
                statuses: r
                    .student_events
                    .into_iter()
                    .filter_map(|s| s.status)
                    .collect(),
            })
            .collect())
    }

    // ---- ledger ----

    pub async fn registrations_for_event(
        &self,
        event_id: i64,
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        let filter: String = format!("eq.{event_id}");
        self.fetch_rows(
            "student_events",
            &[
                ("select", "*"),
                ("event_id", &filter),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }

    pub async fn event_registrations<T: DeserializeOwned>(
        &self,
        event_id: i64,
        include_presence: bool,
    ) -> Result<Vec<T>, GatewayError> {
        let filter: String = format!("eq.{event_id}");
        let select: &str = if include_presence {
            "id,student_id,event_id,status,present,created_at,student:students(id,user_id,full_name,student_number,email)"
        } else {
            "id,student_id,event_id,status,created_at,student:students(id,user_id,full_name,student_number,email)"
        };
        self.fetch_rows(
            "student_events",
            &[
                ("select", select),
                ("event_id", &filter),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }

    pub async fn student_registrations<T: DeserializeOwned>(
        &self,
        student_id: i64,
        include_presence: bool,
    ) -> Result<Vec<T>, GatewayError> {
        let filter: String = format!("eq.{student_id}");
        let select: &str = if include_presence {
            "id,student_id,event_id,status,present,created_at,event:events(id,title,date)"
        } else {
            "id,student_id,event_id,status,created_at,event:events(id,title,date)"
        };
        self.fetch_rows(
            "student_events",
            &[
                ("select", select),
                ("student_id", &filter),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }

    pub async fn ledger_rows_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<StudentEventRow>, GatewayError> {
        let event_filter: String = format!("eq.{event_id}");
        let student_filter: String = format!("in.({})", join_ids(student_ids));
        self.fetch_rows(
            "student_events",
            &[
                ("select", "*"),
                ("event_id", &event_filter),
                ("student_id", &student_filter),
            ],
        )
        .await
    }

    pub async fn insert_registrations(
        &self,
        rows: &[NewStudentEvent],
    ) -> Result<u64, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("student_events")))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        let inserted: Vec<StudentEventRow> = Self::json(Self::check(response).await?).await?;
        Ok(inserted.len() as u64)
    }

    pub async fn set_status_for_students(
        &self,
        event_id: i64,
        student_ids: &[i64],
        status: &str,
    ) -> Result<u64, GatewayError> {
        let event_filter: String = format!("eq.{event_id}");
        let student_filter: String = format!("in.({})", join_ids(student_ids));
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("student_events")))
            .query(&[
                ("event_id", event_filter.as_str()),
                ("student_id", student_filter.as_str()),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "status": status }))
            .send()
            .await?;
        let updated: Vec<StudentEventRow> = Self::json(Self::check(response).await?).await?;
        Ok(updated.len() as u64)
    }

    pub async fn find_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<Option<StudentEventRow>, GatewayError> {
        let student_filter: String = format!("eq.{student_id}");
        let event_filter: String = format!("eq.{event_id}");
        let mut rows: Vec<StudentEventRow> = self
            .fetch_rows(
                "student_events",
                &[
                    ("select", "*"),
                    ("student_id", &student_filter),
                    ("event_id", &event_filter),
                ],
            )
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    pub async fn insert_registration(
        &self,
        row: NewStudentEvent,
    ) -> Result<StudentEventRow, GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("student_events")))
            .header("Prefer", "return=representation")
            .json(&vec![row])
            .send()
            .await?;
        Self::first_row(response).await
    }

    pub async fn delete_registration(
        &self,
        student_id: i64,
        event_id: i64,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("student_events")))
            .query(&[
                ("student_id", format!("eq.{student_id}")),
                ("event_id", format!("eq.{event_id}")),
            ])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete_registrations_for_student(
        &self,
        student_id: i64,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.delete(self.table_url("student_events")))
            .query(&[("student_id", format!("eq.{student_id}"))])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn update_registration_status(
        &self,
        student_id: i64,
        event_id: i64,
        status: &str,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("student_events")))
            .query(&[
                ("student_id", format!("eq.{student_id}")),
                ("event_id", format!("eq.{event_id}")),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "status": status }))
            .send()
            .await?;
        let updated: Vec<StudentEventRow> = Self::json(Self::check(response).await?).await?;
        if updated.is_empty() {
            return Err(GatewayError::RowNotFound);
        }
        Ok(())
    }

    /// Upserts the presence flag for one (student, event) pair.
    ///
    /// An existing row keeps its status; only `present` changes. A missing
    /// row is created with status `blocked`. The insert path goes through
    /// the conflict target so two racing first-time writes converge to one
    /// row.
    pub async fn upsert_registration_presence(
        &self,
        student_id: i64,
        event_id: i64,
        present: bool,
    ) -> Result<(), GatewayError> {
        let response: Response = self
            .with_data_auth(self.http.patch(self.table_url("student_events")))
            .query(&[
                ("student_id", format!("eq.{student_id}")),
                ("event_id", format!("eq.{event_id}")),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "present": present }))
            .send()
            .await?;
        let updated: Vec<StudentEventRow> = Self::json(Self::check(response).await?).await?;
        if !updated.is_empty() {
            return Ok(());
        }
        let response: Response = self
            .with_data_auth(self.http.post(self.table_url("student_events")))
            .query(&[("on_conflict", "student_id,event_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&vec![json!({
                "student_id": student_id,
                "event_id": event_id,
                "status": "blocked",
                "present": present,
            })])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    // ---- accounts ----

    pub async fn list_accounts(&self) -> Result<Vec<AccountRow>, GatewayError> {
        let builder: RequestBuilder =
            self.with_admin_auth(self.http.get(self.admin_url("users")))?;
        let response: Response = builder.send().await?;
        let wire: AdminUserListWire = Self::json(Self::check(response).await?).await?;
        Ok(wire
            .users
            .into_iter()
            .map(AdminUserWire::into_account)
            .collect())
    }

    pub async fn create_account(&self, new: NewAccount) -> Result<AccountRow, GatewayError> {
        let body = json!({
            "email": new.email,
            "password": new.password,
            "email_confirm": true,
            "user_metadata": {
                "full_name": new.full_name,
                "role": new.role_id,
            },
        });
        let builder: RequestBuilder =
            self.with_admin_auth(self.http.post(self.admin_url("users")))?;
        let response: Response = builder.json(&body).send().await?;
        let wire: AdminUserWire = Self::json(Self::check(response).await?).await?;
        Ok(wire.into_account())
    }

    pub async fn update_account_role(
        &self,
        account_id: &str,
        role_id: i64,
    ) -> Result<(), GatewayError> {
        let url: String = self.admin_url(&format!("users/{account_id}"));
        let builder: RequestBuilder = self.with_admin_auth(self.http.put(url))?;
        let response: Response = builder
            .json(&json!({ "user_metadata": { "role": role_id } }))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete_account(&self, account_id: &str) -> Result<(), GatewayError> {
        let url: String = self.admin_url(&format!("users/{account_id}"));
        let builder: RequestBuilder = self.with_admin_auth(self.http.delete(url))?;
        let response: Response = builder.send().await?;
        Self::check(response).await.map(|_| ())
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(",")
}

/// Pulls the quoted identifier out of a database error message, e.g.
/// `column student_events.present does not exist` or
/// `relation "event_organizations" does not exist`.
fn extract_quoted(message: &str, kind: &str) -> String {
    let after: Option<&str> = message
        .split_once(kind)
        .map(|(_, rest)| rest.trim_start());
    let Some(after) = after else {
        return message.to_string();
    };
    let token: &str = after.split_whitespace().next().unwrap_or(message);
    let token: &str = token.trim_matches(|c| c == '"' || c == '\'');
    token
        .rsplit('.')
        .next()
        .map_or_else(|| message.to_string(), ToString::to_string)
}
