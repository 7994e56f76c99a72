//! Device operations (`/iot/devices`).

use tracing::debug;

use super::{decode, encode, is_empty_payload, paths, segment, status};
use crate::agent::IotAgent;
use crate::domain::{CreateDevices, Device, DeviceId, DeviceList, FiwareService};
use crate::error::AgentError;
use crate::http_client::HttpMethod;
use crate::validation::Validate;

impl IotAgent {
    fn device_url(&self, id: &DeviceId) -> String {
        format!("{}{}", self.url(paths::DEVICES), segment(id.as_str()))
    }

    pub async fn read_device(&self, fs: &FiwareService, id: &DeviceId) -> Result<Device, AgentError> {
        let request = self.scoped_request(HttpMethod::Get, self.device_url(id), fs);
        let response = self
            .dispatch(request, status::OK, "error while reading device")
            .await?;
        decode(&response, "error while reading device")
    }

    /// `true` when the device can be read; read errors count as absent.
    pub async fn device_exists(&self, fs: &FiwareService, id: &DeviceId) -> bool {
        match self.read_device(fs, id).await {
            Ok(_) => true,
            Err(error) => {
                debug!(device_id = %id, %error, "device read failed, treating as absent");
                false
            }
        }
    }

    pub async fn list_devices(&self, fs: &FiwareService) -> Result<DeviceList, AgentError> {
        let request = self.scoped_request(HttpMethod::Get, self.url(paths::DEVICES), fs);
        let response = self
            .dispatch(request, status::OK, "error while listing devices")
            .await?;
        decode(&response, "error while listing devices")
    }

    pub async fn create_device(&self, fs: &FiwareService, device: &Device) -> Result<(), AgentError> {
        self.create_devices(fs, std::slice::from_ref(device)).await
    }

    /// Create all `devices` in one request. Every device is validated and
    /// checked for encodability first.
    pub async fn create_devices(&self, fs: &FiwareService, devices: &[Device]) -> Result<(), AgentError> {
        for device in devices {
            device.validate()?;
            device.ensure_encodable()?;
        }

        let payload = encode(&CreateDevices { devices })?;
        let request = self
            .scoped_request(HttpMethod::Post, self.url(paths::DEVICES), fs)
            .with_json_body(payload);
        self.dispatch(request, status::CREATED, "error while creating devices")
            .await?;
        Ok(())
    }

    /// Update the device named by `device.id`.
    ///
    /// The id, transport, service and service path are never sent. An update
    /// left with no fields is skipped.
    pub async fn update_device(&self, fs: &FiwareService, device: &Device) -> Result<(), AgentError> {
        device.validate()?;
        let url = self.device_url(&device.id);

        let mut changes = device.clone();
        changes.clear_identity();
        let payload = changes.to_json()?;
        if is_empty_payload(&payload) {
            debug!(device_id = %device.id, "nothing to update");
            return Ok(());
        }

        let request = self
            .scoped_request(HttpMethod::Put, url, fs)
            .with_json_body(payload);
        self.dispatch(request, status::NO_CONTENT, "error while updating device")
            .await?;
        Ok(())
    }

    pub async fn delete_device(&self, fs: &FiwareService, id: &DeviceId) -> Result<(), AgentError> {
        let request = self.scoped_request(HttpMethod::Delete, self.device_url(id), fs);
        self.dispatch(request, status::NO_CONTENT, "error while deleting device")
            .await?;
        Ok(())
    }

    /// Create `device`, or update it when it already exists.
    ///
    /// An update keeps the entity name stored in the agent and never sends the
    /// transport.
    pub async fn upsert_device(&self, fs: &FiwareService, device: &Device) -> Result<(), AgentError> {
        device.validate()?;
        if !self.device_exists(fs, &device.id).await {
            debug!(device_id = %device.id, "creating device");
            return self.create_device(fs, device).await;
        }

        let stored = self.read_device(fs, &device.id).await?;
        let entity_name = stored
            .entity_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AgentError::MissingEntityName {
                device_id: device.id.to_string(),
            })?;

        debug!(device_id = %device.id, %entity_name, "updating device");
        let mut changes = device.clone();
        changes.transport = None;
        changes.entity_name = Some(entity_name);
        self.update_device(fs, &changes).await
    }

    /// Create `device` and replace it with the agent's stored version.
    pub async fn create_device_wse(&self, fs: &FiwareService, device: &mut Device) -> Result<(), AgentError> {
        self.create_device(fs, device).await?;
        *device = self.read_device(fs, &device.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AnyValue;
    use crate::domain::{Attribute, StaticAttribute};
    use crate::http_client::{HttpError, HttpRequest, HttpResponse};
    use crate::testing::RecordingHttpClient;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn fs() -> FiwareService {
        FiwareService::new("smartcity", "/garden")
    }

    fn agent(responses: Vec<Result<HttpResponse, HttpError>>) -> (IotAgent, Arc<RecordingHttpClient>) {
        let client = RecordingHttpClient::new(responses);
        let agent = IotAgent::with_http_client("localhost", 4061, 1_000, client.clone());
        (agent, client)
    }

    fn body(request: &HttpRequest) -> Value {
        serde_json::from_str(request.body.as_deref().expect("request has a body"))
            .expect("body is json")
    }

    fn stored(entity_name: &str) -> Result<HttpResponse, HttpError> {
        Ok(HttpResponse::ok_json(
            json!({
                "device_id": "sensor01",
                "service": "smartcity",
                "service_path": "/garden",
                "entity_name": entity_name,
                "entity_type": "Thing",
                "transport": "MQTT"
            })
            .to_string(),
        ))
    }

    #[tokio::test]
    async fn read_addresses_device_by_id() {
        let (agent, client) = agent(vec![stored("urn:Thing:sensor01")]);

        let device = agent
            .read_device(&fs(), &DeviceId::from("sensor01"))
            .await
            .expect("read succeeds");
        assert_eq!(device.entity_name.as_deref(), Some("urn:Thing:sensor01"));
        assert_eq!(device.transport.as_deref(), Some("MQTT"));

        let request = &client.recorded_requests()[0];
        assert_eq!(request.url, "http://localhost:4061/iot/devices/sensor01");
        assert_eq!(request.header("fiware-servicepath"), Some("/garden"));
    }

    #[tokio::test]
    async fn list_decodes_count_and_devices() {
        let (agent, _) = agent(vec![Ok(HttpResponse::ok_json(
            r#"{"count":2,"devices":[{"device_id":"a"},{"device_id":"b"}]}"#,
        ))]);

        let devices = agent.list_devices(&fs()).await.expect("list succeeds");
        assert_eq!(devices.count, 2);
        assert_eq!(devices.devices[1].id, DeviceId::from("b"));
    }

    #[tokio::test]
    async fn create_wraps_devices() {
        let (agent, client) = agent(vec![Ok(HttpResponse::new(201, ""))]);
        let device = Device::new("sensor01")
            .with_entity("urn:Thing:sensor01", "Thing")
            .with_attribute(Attribute::new("temperature", "Number").with_object_id("t"));

        agent.create_device(&fs(), &device).await.expect("create succeeds");

        let request = &client.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            body(request),
            json!({"devices": [{
                "device_id": "sensor01",
                "entity_name": "urn:Thing:sensor01",
                "entity_type": "Thing",
                "attributes": [{"object_id": "t", "name": "temperature", "type": "Number"}]
            }]})
        );
    }

    #[tokio::test]
    async fn create_rejects_missing_id_and_bad_flag() {
        let (agent, client) = agent(Vec::new());

        let missing = agent
            .create_device(&fs(), &Device::default())
            .await
            .expect_err("must fail");
        assert!(matches!(missing, AgentError::MissingFields(ref fields) if fields.fields() == ["device_id"]));

        let flagged = Device::new("sensor01").with_explicit_attrs(AnyValue::Raw(json!([1])));
        let invalid = agent
            .create_devices(&fs(), &[flagged])
            .await
            .expect_err("must fail");
        assert!(matches!(invalid, AgentError::InvalidFieldType { field: "explicitAttrs", .. }));

        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn update_strips_identity_fields() {
        let (agent, client) = agent(vec![Ok(HttpResponse::no_content())]);
        let mut device = Device::new("sensor01")
            .with_static_attribute(StaticAttribute::new("floor", "Number", "2"));
        device.transport = Some(String::from("HTTP"));
        device.service = Some(String::from("smartcity"));

        agent.update_device(&fs(), &device).await.expect("update succeeds");

        let request = &client.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://localhost:4061/iot/devices/sensor01");
        assert_eq!(
            body(request),
            json!({"static_attributes": [{"value": 2, "name": "floor", "type": "Number"}]})
        );
    }

    #[tokio::test]
    async fn update_without_changes_sends_nothing() {
        let (agent, client) = agent(Vec::new());
        let mut device = Device::new("sensor01");
        device.transport = Some(String::from("MQTT"));

        agent.update_device(&fs(), &device).await.expect("nothing to do");
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn delete_escapes_id() {
        let (agent, client) = agent(vec![Ok(HttpResponse::no_content())]);

        agent
            .delete_device(&fs(), &DeviceId::from("room 1"))
            .await
            .expect("delete succeeds");
        let request = &client.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://localhost:4061/iot/devices/room%201");
    }

    #[tokio::test]
    async fn upsert_creates_unknown_device() {
        let (agent, client) = agent(vec![
            Ok(HttpResponse::new(
                404,
                r#"{"name":"DEVICE_NOT_FOUND","message":"No device was found with id:sensor01"}"#,
            )),
            Ok(HttpResponse::new(201, "")),
        ]);

        agent
            .upsert_device(&fs(), &Device::new("sensor01"))
            .await
            .expect("upsert succeeds");
        assert_eq!(client.recorded_requests()[1].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn upsert_keeps_stored_entity_name() {
        let (agent, client) = agent(vec![
            stored("urn:Thing:sensor01"),
            stored("urn:Thing:sensor01"),
            Ok(HttpResponse::no_content()),
        ]);
        let mut device = Device::new("sensor01").with_entity("other", "Thing");
        device.transport = Some(String::from("HTTP"));

        agent.upsert_device(&fs(), &device).await.expect("upsert succeeds");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].method, HttpMethod::Put);
        assert_eq!(
            body(&requests[2]),
            json!({"entity_name": "urn:Thing:sensor01", "entity_type": "Thing"})
        );
    }

    #[tokio::test]
    async fn upsert_requires_stored_entity_name() {
        let (agent, client) = agent(vec![stored(""), stored("")]);

        let error = agent
            .upsert_device(&fs(), &Device::new("sensor01"))
            .await
            .expect_err("must fail");
        assert!(matches!(error, AgentError::MissingEntityName { ref device_id } if device_id == "sensor01"));
        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn create_wse_adopts_server_state() {
        let (agent, _) = agent(vec![Ok(HttpResponse::new(201, "")), stored("urn:Thing:sensor01")]);
        let mut device = Device::new("sensor01");

        agent
            .create_device_wse(&fs(), &mut device)
            .await
            .expect("create succeeds");
        assert_eq!(device.entity_name.as_deref(), Some("urn:Thing:sensor01"));
        assert_eq!(device.service.as_deref(), Some("smartcity"));
    }

    #[tokio::test]
    async fn update_and_upsert_without_id_send_nothing() {
        let (agent, client) = agent(Vec::new());
        let anonymous = Device::default().with_entity("urn:Thing:sensor01", "Thing");

        let updated = agent.update_device(&fs(), &anonymous).await.expect_err("must fail");
        assert!(matches!(updated, AgentError::MissingFields(ref fields) if fields.fields() == ["device_id"]));

        let upserted = agent.upsert_device(&fs(), &anonymous).await.expect_err("must fail");
        assert!(matches!(upserted, AgentError::MissingFields(_)));

        assert!(client.recorded_requests().is_empty());
    }
}
