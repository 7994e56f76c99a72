//! Config group operations (`/iot/services`).

use tracing::debug;

use super::{decode, encode, is_empty_payload, paths, query, status};
use crate::agent::IotAgent;
use crate::domain::{ApiKey, ConfigGroup, ConfigGroupList, CreateConfigGroups, FiwareService, Resource};
use crate::error::AgentError;
use crate::http_client::HttpMethod;
use crate::validation::Validate;

impl IotAgent {
    fn config_group_url(&self, resource: &Resource, apikey: &ApiKey) -> String {
        format!(
            "{}{}",
            self.url(paths::SERVICES),
            query(resource.as_str(), apikey.as_str())
        )
    }

    /// Config groups matching `resource` and `apikey`.
    pub async fn read_config_group(
        &self,
        fs: &FiwareService,
        resource: &Resource,
        apikey: &ApiKey,
    ) -> Result<ConfigGroupList, AgentError> {
        let request = self.scoped_request(
            HttpMethod::Get,
            self.config_group_url(resource, apikey),
            fs,
        );
        let response = self
            .dispatch(request, status::OK, "error while reading config group")
            .await?;
        decode(&response, "error while reading config group")
    }

    /// Every config group under `fs`.
    pub async fn list_config_groups(&self, fs: &FiwareService) -> Result<ConfigGroupList, AgentError> {
        let request = self.scoped_request(HttpMethod::Get, self.url(paths::SERVICES), fs);
        let response = self
            .dispatch(request, status::OK, "error while listing config groups")
            .await?;
        decode(&response, "error while listing config groups")
    }

    /// `true` when a read finds at least one group; read errors count as absent.
    pub async fn config_group_exists(
        &self,
        fs: &FiwareService,
        resource: &Resource,
        apikey: &ApiKey,
    ) -> bool {
        match self.read_config_group(fs, resource, apikey).await {
            Ok(groups) => groups.count > 0,
            Err(error) => {
                debug!(%error, "config group read failed, treating as absent");
                false
            }
        }
    }

    pub async fn create_config_group(
        &self,
        fs: &FiwareService,
        group: &ConfigGroup,
    ) -> Result<(), AgentError> {
        self.create_config_groups(fs, std::slice::from_ref(group)).await
    }

    /// Create all `groups` in one request. Every group is validated and
    /// checked for encodability first.
    pub async fn create_config_groups(
        &self,
        fs: &FiwareService,
        groups: &[ConfigGroup],
    ) -> Result<(), AgentError> {
        for group in groups {
            group.validate()?;
            group.ensure_encodable()?;
        }

        let payload = encode(&CreateConfigGroups { services: groups })?;
        let request = self
            .scoped_request(HttpMethod::Post, self.url(paths::SERVICES), fs)
            .with_json_body(payload);
        self.dispatch(request, status::CREATED, "error while creating config groups")
            .await?;
        Ok(())
    }

    /// Replace the group addressed by `resource` and `apikey` with `group`.
    pub async fn update_config_group(
        &self,
        fs: &FiwareService,
        resource: &Resource,
        apikey: &ApiKey,
        group: &ConfigGroup,
    ) -> Result<(), AgentError> {
        group.validate()?;
        group.ensure_encodable()?;

        let payload = encode(group)?;
        if is_empty_payload(&payload) {
            return Ok(());
        }

        let request = self
            .scoped_request(HttpMethod::Put, self.config_group_url(resource, apikey), fs)
            .with_json_body(payload);
        self.dispatch(request, status::NO_CONTENT, "error while updating config group")
            .await?;
        Ok(())
    }

    pub async fn delete_config_group(
        &self,
        fs: &FiwareService,
        resource: &Resource,
        apikey: &ApiKey,
    ) -> Result<(), AgentError> {
        let request = self.scoped_request(
            HttpMethod::Delete,
            self.config_group_url(resource, apikey),
            fs,
        );
        self.dispatch(request, status::NO_CONTENT, "error while deleting config group")
            .await?;
        Ok(())
    }

    /// Create `group`, or update it when its resource/apikey pair exists.
    pub async fn upsert_config_group(
        &self,
        fs: &FiwareService,
        group: &ConfigGroup,
    ) -> Result<(), AgentError> {
        if self
            .config_group_exists(fs, &group.resource, &group.apikey)
            .await
        {
            debug!(resource = %group.resource, "updating config group");
            self.update_config_group(fs, &group.resource, &group.apikey, group)
                .await
        } else {
            debug!(resource = %group.resource, "creating config group");
            self.create_config_group(fs, group).await
        }
    }

    /// Create `group` and replace it with the agent's stored version.
    pub async fn create_config_group_wse(
        &self,
        fs: &FiwareService,
        group: &mut ConfigGroup,
    ) -> Result<(), AgentError> {
        self.create_config_group(fs, group).await?;

        let stored = self
            .read_config_group(fs, &group.resource, &group.apikey)
            .await?;
        let created = if stored.count == 0 {
            None
        } else {
            stored.services.into_iter().next()
        };

        *group = created.ok_or_else(|| AgentError::NotCreated {
            resource: group.resource.to_string(),
            apikey: group.apikey.to_string(),
        })?;
        Ok(())
    }
}
