// Device group endpoints
//
// CRUD over /devicegroups. Reads come back inside an `items` envelope;
// writes use the PascalCase request schema.

use tracing::debug;

use crate::client::ConfigClient;
use crate::error::Error;
use crate::models::{DeviceGroupList, DeviceGroupResource, DeviceGroupWrite};

impl ConfigClient {
    /// List all device groups.
    ///
    /// `GET /devicegroups`
    pub async fn list_device_groups(&self) -> Result<Vec<DeviceGroupResource>, Error> {
        debug!("listing device groups");
        let list: DeviceGroupList = self.get("devicegroups").await?;
        Ok(list.items)
    }

    /// Create a device group.
    ///
    /// `POST /devicegroups` with `{DisplayName, Conditions}`
    pub async fn create_device_group(
        &self,
        body: &DeviceGroupWrite,
    ) -> Result<DeviceGroupResource, Error> {
        debug!(display_name = %body.display_name, "creating device group");
        self.post("devicegroups", body).await
    }

    /// Update a device group by id.
    ///
    /// `PUT /devicegroups/{id}` with `{DisplayName, Conditions, ETag}` —
    /// the service rejects stale `ETag`s, which surfaces as an `Api` error.
    pub async fn update_device_group(
        &self,
        id: &str,
        body: &DeviceGroupWrite,
    ) -> Result<DeviceGroupResource, Error> {
        debug!(id, "updating device group");
        self.put(&format!("devicegroups/{id}"), body).await
    }

    /// Delete a device group by id.
    ///
    /// `DELETE /devicegroups/{id}`
    pub async fn delete_device_group(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting device group");
        self.delete(&format!("devicegroups/{id}")).await
    }
}
