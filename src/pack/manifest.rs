//! Pack manifest (`manifest.json`).

use crate::translator::BridgeConfig;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// RFC 4122 URL namespace, used for name-derived UUIDs.
const UUID_NAMESPACE: [u8; 16] = [
    0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub header: ManifestHeader,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub description: String,
    pub name: String,
    pub uuid: String,
    pub version: [u32; 3],
    pub min_engine_version: [u32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestModule {
    pub description: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub uuid: String,
    pub version: [u32; 3],
}

impl Manifest {
    /// A resource pack manifest. UUIDs are derived from the pack name and
    /// version unless the config asks for random ones.
    pub fn for_config(config: &BridgeConfig) -> Self {
        let [major, minor, patch] = config.pack_version;
        let version_id = format!("{}-{}.{}.{}", config.pack_name, major, minor, patch);

        let (header_uuid, module_uuid) = if config.randomize_uuids {
            (random_uuid(), random_uuid())
        } else {
            (
                name_uuid(&version_id),
                name_uuid(&format!("{}-resources", version_id)),
            )
        };

        Self {
            format_version: 2,
            header: ManifestHeader {
                description: config.pack_description.clone(),
                name: config.pack_name.clone(),
                uuid: header_uuid,
                version: config.pack_version,
                min_engine_version: config.min_engine_version,
            },
            modules: vec![ManifestModule {
                description: format!("{} Resources", config.pack_name),
                module_type: "resources".to_string(),
                uuid: module_uuid,
                version: config.pack_version,
            }],
        }
    }
}

/// Version 5 (SHA-1, name-based) UUID of `name`.
pub fn name_uuid(name: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(UUID_NAMESPACE);
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    bytes[6] = (bytes[6] & 0x0f) | 0x50;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    format_uuid(&bytes)
}

/// Version 4 (random) UUID.
pub fn random_uuid() -> String {
    let mut bytes: [u8; 16] = rand::random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    format_uuid(&bytes)
}

fn format_uuid(bytes: &[u8; 16]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
