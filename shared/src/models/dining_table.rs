//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `qr_code` holds the routing token encoded in the table's printed QR code,
/// e.g. `/menu?table=5`. It is derived from `number` at registration and
/// never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub number: u32,
    pub qr_code: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_layout_matches_frontend() {
        let table = DiningTable {
            id: "table-5".to_string(),
            number: 5,
            qr_code: "/menu?table=5".to_string(),
            is_active: true,
        };

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["qrCode"], "/menu?table=5");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["number"], 5);
    }
}
