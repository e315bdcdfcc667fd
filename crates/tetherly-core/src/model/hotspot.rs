// ── Hotspot access-point configuration ──

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Radio band of the simulated access point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    #[strum(to_string = "2.4GHz", serialize = "2.4", serialize = "2g")]
    Ghz2_4,
    #[serde(rename = "5GHz")]
    #[strum(to_string = "5GHz", serialize = "5", serialize = "5g")]
    Ghz5,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SecurityType {
    #[serde(rename = "WPA2")]
    #[strum(to_string = "WPA2")]
    Wpa2,
    #[serde(rename = "WPA3")]
    #[strum(to_string = "WPA3")]
    Wpa3,
    Open,
}

/// Singleton describing the access point whose settings the dashboard edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotConfig {
    pub is_active: bool,
    pub ssid: String,
    pub password: String,
    pub band: Band,
    pub max_clients: u32,
    pub is_rooted: bool,
    #[serde(rename = "gatewayIP")]
    pub gateway_ip: Ipv4Addr,
    pub security_type: SecurityType,
}

impl HotspotConfig {
    /// Password with every character but the last two masked.
    pub fn masked_password(&self) -> String {
        let len = self.password.chars().count();
        let visible: String = self.password.chars().skip(len.saturating_sub(2)).collect();
        format!("{}{visible}", "*".repeat(len.saturating_sub(2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_parses_short_and_wire_forms() {
        assert_eq!("5GHz".parse::<Band>().ok(), Some(Band::Ghz5));
        assert_eq!("2.4".parse::<Band>().ok(), Some(Band::Ghz2_4));
        assert_eq!(Band::Ghz2_4.to_string(), "2.4GHz");
    }

    #[test]
    fn security_type_round_trips_wire_names() {
        assert_eq!("wpa3".parse::<SecurityType>().ok(), Some(SecurityType::Wpa3));
        assert_eq!(
            serde_json::to_string(&SecurityType::Wpa2).unwrap_or_default(),
            "\"WPA2\""
        );
    }

    #[test]
    fn masked_password_keeps_tail() {
        let cfg = HotspotConfig {
            is_active: true,
            ssid: "Net".into(),
            password: "secure2024".into(),
            band: Band::Ghz5,
            max_clients: 10,
            is_rooted: false,
            gateway_ip: Ipv4Addr::new(192, 168, 43, 1),
            security_type: SecurityType::Wpa3,
        };
        assert_eq!(cfg.masked_password(), "********24");
    }
}
