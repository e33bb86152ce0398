//! Built-in catalogue for the stock discovery probes.

use std::collections::{BTreeMap, BTreeSet};

use fm_types::groups;

use crate::recon::{ComponentConfig, QualityScores};

/// Quality for (probe, component) pairs with no configured entry.
pub const DEFAULT_QUALITY: i32 = 1;

pub const IGNORED_LOOKUP_FIELDS: &[&str] = &["device", "model_name"];

pub const IGNORED_COMPARE_FIELDS: &[&str] = &["device", "index", "model_name"];

pub const DIFF_EXCLUDED: &[&str] = &["subdevices"];

/// Device type names as they appear in `model_name` annotations.
pub const DEVICE_TYPES: &[&str] = &[
    "rack",
    "blade system",
    "management",
    "power distribution unit",
    "data center",
    "switch",
    "router",
    "load balancer",
    "firewall",
    "SMTP gateway",
    "Appliance",
    "rack server",
    "blade server",
    "virtual server",
    "cloud server",
    "storage",
    "fibre channel switch",
    "unknown",
];

const SCALARS: &[&str] = &[
    "hostname",
    "model_description",
    "model_name",
    "serial_number",
    "type",
];

const FLAT_LISTS: &[&str] = &["mac_addresses", "management_ip_addresses", "system_ip_addresses"];

// (probe, &[(component, quality)])
const QUALITY: &[(&str, &[(&str, i32)])] = &[
    (
        "puppet",
        &[
            ("disks", 51),
            ("disk_shares", 51),
            ("hostname", 52),
            ("installed_software", 52),
            ("mac_addresses", 51),
            ("memory", 51),
            ("model_name", 51),
            ("processors", 51),
            ("serial_number", 51),
            ("system_ip_addresses", 51),
        ],
    ),
    (
        "ssh_linux",
        &[
            ("disks", 50),
            ("hostname", 50),
            ("mac_addresses", 50),
            ("memory", 50),
            ("processors", 50),
            ("system_ip_addresses", 50),
        ],
    ),
    (
        "ipmi",
        &[
            ("mac_addresses", 40),
            ("memory", 40),
            ("model_name", 40),
            ("parts", 40),
            ("processors", 40),
            ("serial_number", 40),
            ("type", 40),
        ],
    ),
    (
        "idrac",
        &[
            ("disks", 55),
            ("fibrechannel_cards", 55),
            ("mac_addresses", 55),
            ("memory", 55),
            ("model_name", 60),
            ("processors", 55),
            ("serial_number", 60),
            ("type", 60),
        ],
    ),
    (
        "hp_oa",
        &[
            ("management_ip_addresses", 45),
            ("model_name", 45),
            ("serial_number", 45),
            ("subdevices", 45),
            ("type", 45),
        ],
    ),
    ("snmp_macs", &[("mac_addresses", 20), ("model_name", 20)]),
    (
        "ssh_xen",
        &[("mac_addresses", 30), ("subdevices", 30), ("type", 30)],
    ),
    ("proxmox_2_3", &[("subdevices", 35)]),
    (
        "ssh_hp_p2000",
        &[("disk_exports", 50), ("serial_number", 50)],
    ),
];

pub(crate) fn strings(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn quality_scores() -> QualityScores {
    QUALITY
        .iter()
        .map(|(probe, scores)| {
            let by_component = scores
                .iter()
                .map(|(component, quality)| (component.to_string(), *quality))
                .collect();
            (probe.to_string(), by_component)
        })
        .collect()
}

pub(crate) fn components() -> BTreeMap<String, ComponentConfig> {
    let mut out = BTreeMap::new();
    for name in SCALARS {
        out.insert(name.to_string(), ComponentConfig::scalar());
    }
    for name in FLAT_LISTS {
        out.insert(name.to_string(), ComponentConfig::flat_list());
    }
    let tables: &[(&str, &[&[&str]])] = &[
        ("disks", &[&["serial_number"], &["device", "mount_point"]]),
        ("disk_exports", &[&["serial_number"]]),
        ("disk_shares", &[&["share", "device"]]),
        (
            "fibrechannel_cards",
            &[&["physical_id", "device"], &["device", "model_name"]],
        ),
        ("installed_software", &[&["device", "path"]]),
        ("memory", &[&["device", "index"]]),
        ("parts", &[&["serial_number"]]),
        ("processors", &[&["device", "index"]]),
        ("subdevices", &[&["serial_number"], &["id"]]),
    ];
    for (name, unique) in tables {
        out.insert(name.to_string(), ComponentConfig::record_table(groups(unique)));
    }
    out
}
