// ── Reference shell commands ──
//
// The root-level commands a rooted Android hotspot would use to carry out
// each dashboard action. These are display text only; nothing here is
// ever spawned.

use std::net::IpAddr;

use serde::Serialize;

use crate::model::{Bandwidth, Device, MacAddress};

pub const DEFAULT_INTERFACE: &str = "wlan0";

/// A titled shell snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellSnippet {
    pub title: &'static str,
    pub command: String,
}

impl ShellSnippet {
    fn new(title: &'static str, command: impl Into<String>) -> Self {
        Self {
            title,
            command: command.into(),
        }
    }
}

/// Command builder bound to one wireless interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommands {
    interface: String,
}

impl Default for ShellCommands {
    fn default() -> Self {
        Self::new(DEFAULT_INTERFACE)
    }
}

impl ShellCommands {
    pub fn new(interface: impl Into<String>) -> Self {
        let interface = interface.into();
        let interface = if interface.trim().is_empty() {
            DEFAULT_INTERFACE.to_owned()
        } else {
            interface.trim().to_owned()
        };
        Self { interface }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    // ── Discovery ────────────────────────────────────────────────────

    pub fn list_neighbors(&self) -> String {
        format!("ip neigh show dev {}", self.interface)
    }

    pub fn arp_table() -> &'static str {
        "cat /proc/net/arp"
    }

    pub fn arp_lookup(ip: IpAddr) -> String {
        format!("cat /proc/net/arp | grep {ip}")
    }

    // ── Access control ───────────────────────────────────────────────

    pub fn block(mac: &MacAddress) -> String {
        format!("iptables -I FORWARD -m mac --mac-source {mac} -j DROP")
    }

    pub fn unblock(mac: &MacAddress) -> String {
        format!("iptables -D FORWARD -m mac --mac-source {mac} -j DROP")
    }

    // ── Traffic shaping ──────────────────────────────────────────────

    /// Root qdisc, one HTB class at the download cap and a filter steering
    /// the client's traffic into it.
    pub fn speed_limit(&self, ip: IpAddr, cap: Bandwidth) -> Vec<String> {
        let rate = cap.download_mbps;
        vec![
            format!("tc qdisc add dev {} root handle 1: htb", self.interface),
            format!(
                "tc class add dev {} parent 1: classid 1:1 htb rate {rate}mbit ceil {rate}mbit",
                self.interface
            ),
            format!(
                "tc filter add dev {} protocol ip parent 1:0 prio 1 u32 match ip dst {ip}/32 flowid 1:1",
                self.interface
            ),
        ]
    }

    pub fn data_usage() -> &'static str {
        "iptables -L FORWARD -v -n"
    }

    // ── Hotspot ──────────────────────────────────────────────────────

    pub fn tethering(enable: bool) -> &'static str {
        if enable {
            "svc wifi enable-tethering"
        } else {
            "svc wifi disable-tethering"
        }
    }

    pub fn root_check() -> &'static str {
        "su -c id"
    }

    // ── Bundles ──────────────────────────────────────────────────────

    /// Everything relevant to one connected device.
    pub fn for_device(&self, device: &Device) -> Vec<ShellSnippet> {
        let mut out = vec![
            ShellSnippet::new("ARP lookup", Self::arp_lookup(device.ip_address)),
            ShellSnippet::new("Block", Self::block(&device.mac_address)),
            ShellSnippet::new("Unblock", Self::unblock(&device.mac_address)),
        ];
        out.extend(
            self.speed_limit(device.ip_address, device.caps())
                .into_iter()
                .map(|cmd| ShellSnippet::new("Speed limit", cmd)),
        );
        out
    }

    /// Hotspot-wide commands.
    pub fn for_hotspot(&self) -> Vec<ShellSnippet> {
        vec![
            ShellSnippet::new("Root check", Self::root_check()),
            ShellSnippet::new("Enable tethering", Self::tethering(true)),
            ShellSnippet::new("Disable tethering", Self::tethering(false)),
            ShellSnippet::new("Connected clients", self.list_neighbors()),
            ShellSnippet::new("ARP table", Self::arp_table()),
            ShellSnippet::new("Data usage", Self::data_usage()),
        ]
    }
}
