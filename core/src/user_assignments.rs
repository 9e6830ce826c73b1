//! Operations on `/projects/{project_id}/user_assignments`.
//!
//! Every operation exists three ways: a pure `build_*` producing the request,
//! a pure `parse_*` interpreting the response, and a method that sends the
//! request through a `Transport` and parses the result.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::client::{parse_json, HarvestClient};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{UserAssignment, UserAssignmentCreateOptions, UserAssignmentOptions, UserAssignmentUpdate};

/// Format of the `updated_since` query parameter.
pub const UPDATED_SINCE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The only status the service returns for a successful delete.
pub const DELETE_OK: u16 = 200;

fn collection_path(project_id: i64) -> String {
    format!("projects/{project_id}/user_assignments")
}

fn member_path(project_id: i64, user_assignment_id: i64) -> String {
    format!("projects/{project_id}/user_assignments/{user_assignment_id}")
}

impl HarvestClient {
    pub fn build_list_user_assignments(&self, project_id: i64, updated_since: Option<NaiveDateTime>) -> HttpRequest {
        let request = self.build_request(&collection_path(project_id), HttpMethod::Get);
        match updated_since {
            Some(since) => request.with_query("updated_since", since.format(UPDATED_SINCE_FORMAT).to_string()),
            None => request,
        }
    }

    pub fn build_get_user_assignment(&self, project_id: i64, user_assignment_id: i64) -> HttpRequest {
        self.build_request(&member_path(project_id, user_assignment_id), HttpMethod::Get)
    }

    pub fn build_create_user_assignment(&self, project_id: i64, user_id: i64) -> Result<HttpRequest> {
        self.build_request(&collection_path(project_id), HttpMethod::Post)
            .with_json_body(&UserAssignmentCreateOptions { id: user_id })
    }

    pub fn build_update_user_assignment(
        &self,
        project_id: i64,
        user_assignment_id: i64,
        options: &UserAssignmentOptions,
    ) -> Result<HttpRequest> {
        self.build_request(&member_path(project_id, user_assignment_id), HttpMethod::Put)
            .with_json_body(options)
    }

    pub fn build_delete_user_assignment(&self, project_id: i64, user_assignment_id: i64) -> HttpRequest {
        self.build_request(&member_path(project_id, user_assignment_id), HttpMethod::Delete)
    }

    pub fn parse_list_user_assignments(&self, response: HttpResponse) -> Result<Vec<UserAssignment>> {
        parse_json(response)
    }

    pub fn parse_get_user_assignment(&self, response: HttpResponse) -> Result<UserAssignment> {
        parse_json(response)
    }

    pub fn parse_create_user_assignment(&self, response: HttpResponse) -> Result<UserAssignment> {
        parse_json(response)
    }

    pub fn parse_update_user_assignment(&self, response: HttpResponse) -> Result<UserAssignment> {
        parse_json(response)
    }

    /// `true` only for status 200. Any other status, 204 and 404 included, is `false`.
    pub fn parse_delete_user_assignment(&self, response: &HttpResponse) -> bool {
        let deleted = response.status == DELETE_OK;
        if !deleted {
            warn!(status = response.status, "user assignment was not deleted");
        }
        deleted
    }

    /// List the assignments of a project, optionally only those updated since a moment.
    pub fn list_user_assignments<T>(
        &self,
        transport: &T,
        project_id: i64,
        updated_since: Option<NaiveDateTime>,
    ) -> Result<Vec<UserAssignment>>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_list_user_assignments(project_id, updated_since);
        self.execute(transport, &request)
    }

    pub fn user_assignment<T>(&self, transport: &T, project_id: i64, user_assignment_id: i64) -> Result<UserAssignment>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_get_user_assignment(project_id, user_assignment_id);
        self.execute(transport, &request)
    }

    /// Assign a user to a project.
    pub fn create_user_assignment<T>(&self, transport: &T, project_id: i64, user_id: i64) -> Result<UserAssignment>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_create_user_assignment(project_id, user_id)?;
        self.execute(transport, &request)
    }

    /// Remove a user from a project. Transport failures are still errors.
    pub fn delete_user_assignment<T>(&self, transport: &T, project_id: i64, user_assignment_id: i64) -> Result<bool>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_delete_user_assignment(project_id, user_assignment_id);
        let response = self.execute_raw(transport, &request)?;
        Ok(self.parse_delete_user_assignment(&response))
    }

    /// Update an assignment from individual fields. The body always names
    /// `project_id` and `user_id`; unset fields in `update` are left out.
    pub fn update_user_assignment<T>(
        &self,
        transport: &T,
        project_id: i64,
        user_assignment_id: i64,
        user_id: i64,
        update: UserAssignmentUpdate,
    ) -> Result<UserAssignment>
    where
        T: Transport + ?Sized,
    {
        let options = UserAssignmentOptions::for_assignment(project_id, user_id, update);
        self.update_user_assignment_with(transport, project_id, user_assignment_id, &options)
    }

    pub fn update_user_assignment_with<T>(
        &self,
        transport: &T,
        project_id: i64,
        user_assignment_id: i64,
        options: &UserAssignmentOptions,
    ) -> Result<UserAssignment>
    where
        T: Transport + ?Sized,
    {
        let request = self.build_update_user_assignment(project_id, user_assignment_id, options)?;
        self.execute(transport, &request)
    }
}
