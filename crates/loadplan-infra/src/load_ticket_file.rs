//! JSON files for load tickets and completion reports

use std::fs;
use std::path::Path;

use loadplan_domain::model::{LoadReport, LoadTicket};
use loadplan_types::{Error, Result};
use tracing::info;

/// Write a ticket as pretty JSON, creating parent directories
pub fn save_ticket(path: &Path, ticket: &LoadTicket) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(ticket)?;
    fs::write(path, content)?;
    info!(load_id = %ticket.load_id, path = %path.display(), "saved load ticket");
    Ok(())
}

/// Read a ticket written by [`save_ticket`]
pub fn load_ticket(path: &Path) -> Result<LoadTicket> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a completion report as pretty JSON
pub fn save_report(path: &Path, report: &LoadReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loadplan_domain::model::{LoadLine, PlannedTotals};
    use tempfile::tempdir;

    fn ticket() -> LoadTicket {
        LoadTicket {
            load_id: "0b6f5a34-7a2e-4c57-9a54-2f3f0e1f9c11".to_string(),
            snapshot_version: 1,
            combo_id: "c1".to_string(),
            terminal_id: None,
            cg_bias: 0.0,
            ambient_temp_f: Some(80.0),
            product_temp_f: Some(72.0),
            tare_lbs: 32000.0,
            buffer_lbs: 0.0,
            totals: PlannedTotals {
                planned_total_gal: 1000.0,
                planned_total_lbs: 7000.0,
                planned_gross_lbs: 39000.0,
            },
            lines: vec![LoadLine {
                comp_number: 1,
                product_id: "ulsd".to_string(),
                planned_gallons: 1000.0,
                planned_lbs: 7000.0,
                lbs_per_gal: 7.0,
                temp_f: Some(72.0),
            }],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ticket_file_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tickets").join("load.json");
        let original = ticket();
        save_ticket(&path, &original).unwrap();
        assert_eq!(load_ticket(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_ticket() {
        let dir = tempdir().unwrap();
        let err = load_ticket(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
