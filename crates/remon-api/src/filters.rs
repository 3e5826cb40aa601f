// Device group filter endpoints
//
// The console treats filter documents as opaque JSON: the service owns the
// schema and the client passes values through untouched.

use serde_json::Value;
use tracing::debug;

use crate::client::ConfigClient;
use crate::error::Error;

impl ConfigClient {
    /// List all device-group filters, unnormalized.
    ///
    /// `GET /devicegroupfilters`
    pub async fn list_device_group_filters(&self) -> Result<Value, Error> {
        debug!("listing device group filters");
        self.get("devicegroupfilters").await
    }

    /// Create a device-group filter.
    ///
    /// `POST /devicegroupfilters`
    pub async fn create_device_group_filter(&self, payload: &Value) -> Result<Value, Error> {
        debug!("creating device group filter");
        self.post("devicegroupfilters", payload).await
    }

    /// Modify a device-group filter by id.
    ///
    /// `PUT /devicegroupfilters/{id}`
    pub async fn update_device_group_filter(
        &self,
        id: &str,
        payload: &Value,
    ) -> Result<Value, Error> {
        debug!(id, "updating device group filter");
        self.put(&format!("devicegroupfilters/{id}"), payload).await
    }

    /// Delete a device-group filter by id.
    ///
    /// `DELETE /devicegroupfilters/{id}`
    pub async fn delete_device_group_filter(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting device group filter");
        self.delete(&format!("devicegroupfilters/{id}")).await
    }
}
