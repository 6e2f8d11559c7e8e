//! Tools for provisioning the key material of a local volnix testnet.
mod config;
mod ids;
mod keys;
mod persist;
mod records;
mod run;
pub mod testonly;


pub use config::{
    Config, CONFIG_DIR, DEFAULT_NUM_NODES, DEFAULT_TESTNET_DIR, NODE_HOME_DIR, NODE_KEY_FILE,
    VALIDATOR_KEY_FILE,
};
pub use ids::{NodeId, ValidatorAddress};
pub use keys::{check_entropy, check_os_entropy, KeyGenerator};
pub use persist::{decode_json, encode_json, FsPersister, Persister};
pub use records::{
    KeyValue, NodeKeyRecord, RecordError, ValidatorKeyRecord, PRIV_KEY_TYPE, PUB_KEY_TYPE,
};
pub use run::{generate, verify, NodeSummary};
