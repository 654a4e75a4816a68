//! CSV roster loading so the CLI can hydrate candidate pools from
//! technician and vendor exports instead of live storage.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{SkillsField, TechnicianCandidate, TechnicianId, VendorCandidate, VendorId};

/// Error raised while loading a roster export.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster row: {0}")]
    Csv(#[from] csv::Error),
}

pub fn technicians_from_path(path: impl AsRef<Path>) -> Result<Vec<TechnicianCandidate>, RosterError> {
    technicians_from_reader(File::open(path)?)
}

pub fn technicians_from_reader<R: Read>(reader: R) -> Result<Vec<TechnicianCandidate>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut technicians = Vec::new();
    for row in csv_reader.deserialize::<TechnicianRow>() {
        technicians.push(row?.into_candidate());
    }
    Ok(technicians)
}

pub fn vendors_from_path(path: impl AsRef<Path>) -> Result<Vec<VendorCandidate>, RosterError> {
    vendors_from_reader(File::open(path)?)
}

pub fn vendors_from_reader<R: Read>(reader: R) -> Result<Vec<VendorCandidate>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut vendors = Vec::new();
    for row in csv_reader.deserialize::<VendorRow>() {
        vendors.push(row?.into_candidate());
    }
    Ok(vendors)
}

#[derive(Debug, Deserialize)]
struct TechnicianRow {
    #[serde(rename = "Technician ID")]
    technician_id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(
        rename = "Specializations",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    specializations: Option<String>,
    #[serde(
        rename = "Current Location",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    current_location: Option<String>,
    #[serde(rename = "Open Assignments", default)]
    open_assignments: u32,
    #[serde(rename = "Available", default = "default_true")]
    available: bool,
}

impl TechnicianRow {
    fn into_candidate(self) -> TechnicianCandidate {
        TechnicianCandidate {
            technician_id: TechnicianId(self.technician_id),
            display_name: self.name,
            // Exports store skills as a serialized JSON array; normalization
            // happens at scoring time.
            specializations: self.specializations.map(SkillsField::Raw),
            current_location: self.current_location,
            open_assignments: self.open_assignments,
            is_available: self.available,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VendorRow {
    #[serde(rename = "Vendor ID")]
    vendor_id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Specialty", default, deserialize_with = "empty_string_as_none")]
    specialty: Option<String>,
    #[serde(rename = "Average Rating", default)]
    average_rating: f64,
    #[serde(rename = "SLA", default, deserialize_with = "empty_string_as_none")]
    service_level_agreement: Option<String>,
    #[serde(rename = "Active", default = "default_true")]
    active: bool,
}

impl VendorRow {
    fn into_candidate(self) -> VendorCandidate {
        VendorCandidate {
            vendor_id: VendorId(self.vendor_id),
            display_name: self.name,
            specialty: self.specialty,
            average_rating: self.average_rating,
            service_level_agreement: self.service_level_agreement,
            is_active: self.active,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn default_true() -> bool {
    true
}
