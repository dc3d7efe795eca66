use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Device, DeviceKind, Target, TargetKind};

/// Read-only reference data: targets, devices, and the location list used by
/// the synthetic event generator.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    targets: Vec<Target>,
    devices: Vec<Device>,
    locations: Vec<String>,
}

impl CatalogRepository {
    /// Create a catalog over injected reference data.
    pub fn new(targets: Vec<Target>, devices: Vec<Device>, locations: Vec<String>) -> Self {
        Self {
            targets,
            devices,
            locations,
        }
    }

    /// Build the demo catalog the dashboard is seeded with at startup.
    pub fn with_fixtures() -> Self {
        let targets = vec![
            Target::new("Zhang Wei", TargetKind::Person, "badge V-1024, grey jacket"),
            Target::new("Li Na", TargetKind::Person, "visitor pass T-88"),
            Target::new("Wang Qiang", TargetKind::Person, "former contractor, access revoked"),
            Target::new("AF-3721", TargetKind::Vehicle, "white van, rear door dented"),
            Target::new("BK-9054", TargetKind::Vehicle, "black sedan, tinted windows"),
        ];
        let devices = vec![
            Device::new("Gate Camera 01", DeviceKind::Camera, "North Gate"),
            Device::new("Gate Camera 02", DeviceKind::Camera, "South Gate"),
            Device::new("Lobby Dome 01", DeviceKind::Camera, "Main Lobby"),
            Device::new("Garage IR 01", DeviceKind::Sensor, "Parking Garage B1"),
            Device::new("Perimeter Ctrl 01", DeviceKind::Controller, "Perimeter Fence East"),
        ];
        let locations = vec![
            "North Gate".to_string(),
            "South Gate".to_string(),
            "Main Lobby".to_string(),
            "Parking Garage B1".to_string(),
            "Perimeter Fence East".to_string(),
            "Loading Dock".to_string(),
        ];
        Self::new(targets, devices, locations)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn target(&self, id: &Uuid) -> Result<&Target> {
        self.targets
            .iter()
            .find(|t| t.id == *id)
            .ok_or_else(|| Error::NotFound(format!("target {}", id)))
    }

    pub fn device(&self, id: &Uuid) -> Result<&Device> {
        self.devices
            .iter()
            .find(|d| d.id == *id)
            .ok_or_else(|| Error::NotFound(format!("device {}", id)))
    }

    pub fn targets_by_kind(&self, kind: TargetKind) -> Vec<&Target> {
        self.targets.iter().filter(|t| t.kind == kind).collect()
    }
}
